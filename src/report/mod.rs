//! Report assembly and rendering.
//!
//! [`ReportBuilder::assemble`] turns a [`ReportRequest`] into a [`FlowDocument`] made of four
//! sections (header, app information, findings, URL list).  [`ReportBuilder::render`] lays that
//! document out on A4 pages.

pub mod findings;
pub mod sections;

use genpdf::elements::Paragraph;
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins, PaperSize};
use log::info;

use crate::builder::DocumentBuilder;
use crate::elements::mm_from_f64;
use crate::error::ReportError;
use crate::fonts::FontStore;
use crate::i18n::{self, Translations};
use crate::model::FlowDocument;
use crate::render;
use crate::request::ReportRequest;

const PAGE_MARGIN_MM: f64 = 20.0;
const FOOTER_HEIGHT_MM: f64 = 8.0;
const FOOTER_FONT_SIZE: u8 = 8;

/// Output of a successful render.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    /// The PDF document.
    pub bytes: Vec<u8>,
}

/// Builds reports using a shared set of translation tables.
#[derive(Clone, Copy, Debug)]
pub struct ReportBuilder<'a> {
    translations: &'a Translations,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a builder resolving labels from `translations`.
    pub fn new(translations: &'a Translations) -> Self {
        Self { translations }
    }

    /// Assembles the flow content of the report in the request locale.
    pub fn assemble(&self, request: &ReportRequest) -> FlowDocument {
        let localizer = self.translations.localizer(request.lang.as_str());
        let title =
            localizer.t_with("label.audit_report", &[("system", request.system.as_str())]);

        let mut document = FlowDocument::new(title.as_str());
        sections::header(&mut document, &title);
        sections::app_info(&mut document, &request.result.app_info, &localizer);
        sections::findings(
            &mut document,
            &request.rules,
            &request.result.mast_report,
            &localizer,
        );
        sections::url_list(&mut document, &request.result.url_list, &localizer);
        document
    }

    /// Assembles and renders the report to PDF bytes.
    pub fn render(
        &self,
        request: &ReportRequest,
        fonts: &FontStore,
    ) -> Result<RenderedReport, ReportError> {
        let font_family = fonts.family().map_err(ReportError::FontLoad)?;
        let flow = self.assemble(request);

        let footer_template = self
            .translations
            .localizer(request.lang.as_str())
            .t("label.page_footer");
        let margin = mm_from_f64(PAGE_MARGIN_MM);
        let builder = DocumentBuilder::new()
            .with_paper_size(PaperSize::A4)
            .with_margins(Margins::trbl(margin, margin, margin, margin))
            .with_font_family(font_family)
            .with_footer(mm_from_f64(FOOTER_HEIGHT_MM), move |page| {
                let page = page.to_string();
                let text = i18n::interpolate(&footer_template, &[("page", page.as_str())]);
                Paragraph::new(text)
                    .aligned(Alignment::Center)
                    .styled(Style::new().with_font_size(FOOTER_FONT_SIZE))
            });

        let bytes = render::render_flow(&flow, builder)?;
        info!(
            "Rendered report for '{}' in locale '{}' ({} bytes)",
            request.system,
            request.lang,
            bytes.len()
        );
        Ok(RenderedReport { bytes })
    }
}
