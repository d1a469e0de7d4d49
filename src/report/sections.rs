//! The four section assemblers, each appending to the document flow.

use std::collections::HashMap;

use genpdf::style::Color;

use crate::i18n::Localizer;
use crate::model::{
    Cell, FlowDocument, FlowElement, HorizontalAlignment, RichParagraph, Table, TableFrame,
    TableLines, TextStyle,
};
use crate::request::{Finding, OrderedMap, RuleDef};
use crate::richtext::Span;

use super::findings;

/// Colour of the header rules and the findings/URL table frames.
pub const LINE_COLOR: Color = Color::Rgb(50, 140, 140);
/// Colour of the app information table lines.
pub const APP_INFO_LINE_COLOR: Color = Color::Rgb(122, 180, 225);

/// Relative widths of the app information columns (label, value).
pub const APP_INFO_COLUMNS: [usize; 2] = [120, 380];
/// Relative widths of the findings columns (result, rule).
pub const FINDINGS_COLUMNS: [usize; 2] = [90, 400];

const SECTION_GAP_PT: f64 = 50.0;
const HEADING_GAP_PT: f64 = 15.0;

fn section_heading(document: &mut FlowDocument, text: String) {
    document.push(FlowElement::paragraph(
        TextStyle::SectionHeading,
        RichParagraph::plain(text),
    ));
    document.push(FlowElement::Spacer(HEADING_GAP_PT));
}

fn boxed(color: Color) -> TableFrame {
    TableFrame {
        color,
        lines: TableLines::Boxed,
    }
}

/// Report title followed by a heavy and a light rule.
pub fn header(document: &mut FlowDocument, title: &str) {
    document.push(FlowElement::paragraph(
        TextStyle::Title,
        RichParagraph::plain(title).with_alignment(HorizontalAlignment::Center),
    ));
    document.push(FlowElement::Spacer(20.0));
    document.push(FlowElement::Rule {
        weight_pt: 2.0,
        color: LINE_COLOR,
    });
    document.push(FlowElement::Spacer(1.0));
    document.push(FlowElement::Rule {
        weight_pt: 0.5,
        color: LINE_COLOR,
    });
    document.push(FlowElement::Spacer(10.0));
}

/// Two-column table of the app metadata, labels localized as `label.<lowercase key>`.
///
/// Rows are only underlined; the table has no outer box.
pub fn app_info(
    document: &mut FlowDocument,
    entries: &[(String, String)],
    localizer: &Localizer<'_>,
) {
    section_heading(document, localizer.t("label.app_information"));

    let mut table = Table::new(
        APP_INFO_COLUMNS,
        TableFrame {
            color: APP_INFO_LINE_COLOR,
            lines: TableLines::BelowRows,
        },
    );
    for (key, value) in entries {
        let label = localizer.t(&format!("label.{}", key.to_lowercase()));
        table.push_row(vec![
            Cell::single(RichParagraph::plain(label)),
            Cell::single(RichParagraph::plain(value.as_str())),
        ]);
    }
    document.push(FlowElement::Table(table));
    document.push(FlowElement::Spacer(SECTION_GAP_PT));
}

/// One row per catalog rule that has a finding, in catalog order.
///
/// Rules without a finding are skipped without notice.
pub fn findings(
    document: &mut FlowDocument,
    rules: &OrderedMap<RuleDef>,
    mast_report: &HashMap<String, Finding>,
    localizer: &Localizer<'_>,
) {
    section_heading(document, localizer.t("label.scan_report"));

    let header_cell = |key: &str, alignment: HorizontalAlignment| {
        Cell::single(
            RichParagraph::new(vec![Span::new(localizer.t(key)).bold()])
                .with_alignment(alignment),
        )
    };
    let mut table = Table::new(FINDINGS_COLUMNS, boxed(LINE_COLOR)).with_header(vec![
        header_cell("label.result_column", HorizontalAlignment::Center),
        header_cell("label.rule_column", HorizontalAlignment::Left),
    ]);

    for (rule_id, rule) in rules.iter() {
        let Some(finding) = mast_report.get(rule_id) else {
            continue;
        };
        table.push_row(vec![
            findings::status_cell(finding, localizer),
            findings::rule_cell(rule_id, rule, finding, localizer),
        ]);
    }

    document.push(FlowElement::Table(table));
    document.push(FlowElement::Spacer(SECTION_GAP_PT));
}

/// Single-column list of discovered URLs, or a hint row when there are none.
pub fn url_list(document: &mut FlowDocument, urls: &[String], localizer: &Localizer<'_>) {
    section_heading(document, localizer.t("label.url_list"));

    let mut table = Table::new([1usize], boxed(LINE_COLOR));
    if urls.is_empty() {
        table.push_row(vec![Cell::single(RichParagraph::plain(
            localizer.t("label.empty_url_list_hint"),
        ))]);
    } else {
        for url in urls {
            table.push_row(vec![Cell::single(RichParagraph::plain(url.as_str()))]);
        }
    }
    document.push(FlowElement::Table(table));
}
