//! Core entry point for the mast_report crate.
//!
//! The crate turns a mobile application security scan (rule catalog, per-rule findings, app
//! metadata and discovered URLs) into a localized PDF audit report.  Report assembly produces a
//! plain [`model::FlowDocument`] that can be inspected without fonts; [`render`] hands that
//! document to `genpdf` to obtain the PDF bytes.

pub mod builder;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod i18n;
pub mod model;
pub mod render;
pub mod report;
pub mod request;
pub mod richtext;

pub use error::{MalformedFindingError, ReportError, RequestError, TranslationError};
pub use i18n::{Localizer, Translations};
pub use report::{RenderedReport, ReportBuilder};
pub use request::ReportRequest;
