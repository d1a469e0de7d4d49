//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mast_report::i18n::DEFAULT_FALLBACK_LOCALE;
use mast_report::Translations;

/// Renders mobile application security scan results to PDF audit reports.
///
/// The Source Han Sans TC fonts must be available under `assets/fonts` next to the binary, in
/// the `mast_report` crate directory, or in the directory given by `--fonts-dir`.
#[derive(Debug, Parser)]
#[command(author, version, about = "MAST audit report service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `POST /api/report` (the default when no command is given).
    Serve(ServeArgs),

    /// Render a single request body from a file.
    Render(RenderArgs),
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Directory containing the report fonts.
    #[arg(long, env = "MAST_REPORT_FONTS_DIR")]
    pub fonts_dir: Option<PathBuf>,

    /// Directory with `<locale>.json` tables layered over the bundled translations.
    #[arg(long, env = "MAST_REPORT_TRANSLATIONS_DIR")]
    pub translations_dir: Option<PathBuf>,

    /// Locale used for labels missing from the requested locale.
    #[arg(long, env = "MAST_REPORT_FALLBACK_LOCALE", default_value = DEFAULT_FALLBACK_LOCALE)]
    pub fallback_locale: String,
}

impl ReportArgs {
    /// Loads the translation tables described by the options.
    pub fn translations(&self) -> Result<Translations, mast_report::TranslationError> {
        let translations = match &self.translations_dir {
            Some(directory) => Translations::load_dir(directory)?,
            None => Translations::embedded(),
        };
        Ok(translations.with_fallback(self.fallback_locale.as_str()))
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address the HTTP server listens on.
    #[arg(long, env = "MAST_REPORT_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// JSON request body to render.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Where to write the PDF.
    #[arg(long, short, default_value = "report.pdf")]
    pub output: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}
