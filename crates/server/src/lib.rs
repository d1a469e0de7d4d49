//! HTTP front end for `mast_report`.

pub mod config;
pub mod handlers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::routing::get;
use axum::Router;
use mast_report::fonts::FontStore;
use mast_report::Translations;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServeArgs;

/// Upper bound on accepted request bodies.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub translations: Arc<Translations>,
    pub fonts: Arc<FontStore>,
}

impl AppState {
    pub fn new(translations: Translations, fonts: FontStore) -> Self {
        Self {
            translations: Arc::new(translations),
            fonts: Arc::new(fonts),
        }
    }
}

/// Builds the router serving `/api/report`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([
            header::CONTENT_DISPOSITION,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
        ]);

    Router::new()
        .route(
            "/api/report",
            get(handlers::send_report).post(handlers::send_report),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Loads configuration-dependent state and serves until the process is stopped.
pub async fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let translations = args.report.translations()?;
    let fonts = FontStore::new(args.report.fonts_dir.clone());
    if !fonts.is_available() {
        tracing::warn!("report fonts not found; renders will fail until they are installed");
    }
    tracing::info!(
        locales = ?translations.locales().collect::<Vec<_>>(),
        fallback = translations.fallback(),
        "translations loaded"
    );

    let app = app(AppState::new(translations, fonts));
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("listening on {}", args.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
