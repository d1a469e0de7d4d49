//! Error types shared across the crate.

use std::path::PathBuf;

/// Reasons a report request is rejected before any rendering takes place.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The `system` key is absent from the request body.
    #[error("no system data in request body")]
    MissingSystem,
    /// The `rule` key is absent from the request body.
    #[error("no rule in request body")]
    MissingRule,
    /// The `result` key is absent from the request body.
    #[error("no result in request body")]
    MissingResult,
    /// The request body is valid JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,
    /// The body is not JSON or its fields cannot be decoded.
    #[error("malformed report payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failures while loading translation tables.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("failed to read translations from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse translation table {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The table root is not a JSON object.
    #[error("translation table {} must be a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}

/// Errors that abort the rendering of a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The font family required by the document could not be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),
    /// The layout engine failed while producing the PDF.
    #[error("failed to render PDF: {0}")]
    Render(#[from] genpdf::error::Error),
}

/// A finding detail entry lacks one of the fields shown in the report.
///
/// This error never aborts a render; the detail block of the affected rule is omitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("finding detail entry does not include the `{field}` key")]
pub struct MalformedFindingError {
    /// Name of the missing field.
    pub field: &'static str,
}
