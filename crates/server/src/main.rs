use std::error::Error;
use std::fs;

use clap::Parser;
use mast_report::fonts::FontStore;
use mast_report::{ReportBuilder, ReportRequest};
use mast_report_server::config::{Cli, Command, RenderArgs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Serve(args)) => mast_report_server::run(args).await,
        None => mast_report_server::run(cli.serve).await,
        Some(Command::Render(args)) => render(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render(args: RenderArgs) -> Result<(), Box<dyn Error>> {
    let body = fs::read(&args.input)?;
    let request = ReportRequest::from_slice(&body)?;
    let translations = args.report.translations()?;
    let fonts = FontStore::new(args.report.fonts_dir.clone());

    let rendered = ReportBuilder::new(&translations).render(&request, &fonts)?;
    fs::write(&args.output, &rendered.bytes)?;
    tracing::info!("wrote {}", args.output.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
