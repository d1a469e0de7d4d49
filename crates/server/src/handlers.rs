//! HTTP handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mast_report::{ReportBuilder, ReportRequest, RequestError};
use serde_json::{json, Value};

use crate::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_CONTENT_DISPOSITION: &str = "attachment; filename=\"report.pdf\"";

/// Error responses produced by the report endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("failed to render report: {0}")]
    Render(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) | ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "report request failed");
        } else {
            tracing::warn!(error = %self, "rejected report request");
        }
        (status, Json(json!({ "msg": self.to_string() }))).into_response()
    }
}

/// `GET|POST /api/report`: renders the JSON body to a PDF attachment.
pub async fn send_report(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    tracing::debug!(payload = %String::from_utf8_lossy(&body), "report request received");

    let value: Value = serde_json::from_slice(&body).map_err(ApiError::InvalidJson)?;
    let request = ReportRequest::from_value(value)?;
    tracing::info!(system = %request.system, lang = %request.lang, "rendering report");

    let rendered = tokio::task::spawn_blocking(move || {
        ReportBuilder::new(&state.translations)
            .render(&request, &state.fonts)
            .map_err(|err| err.to_string())
    })
    .await
    .map_err(|err| ApiError::Render(err.to_string()))?
    .map_err(ApiError::Render)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, PDF_CONTENT_DISPOSITION),
        ],
        rendered.bytes,
    )
        .into_response())
}
