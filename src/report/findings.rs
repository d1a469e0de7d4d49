//! Cell content of the findings table.
//!
//! Each optional block of the rule cell has its own function that returns no paragraphs when
//! its source field is empty; [`rule_cell`] joins them in a fixed order.

use genpdf::style::Color;
use log::warn;

use crate::i18n::Localizer;
use crate::model::{Cell, HorizontalAlignment, RichParagraph};
use crate::request::{Finding, RuleDef};
use crate::richtext::{self, Span};

/// Colour of the label shown for detected findings.
pub const DETECTED_COLOR: Color = Color::Rgb(255, 0, 0);

fn pipe_entries(field: &str) -> impl Iterator<Item = &str> {
    field.split('|')
}

/// A blank line, a bold title and the given lines.
fn titled_block<I>(title: String, lines: I) -> Vec<RichParagraph>
where
    I: IntoIterator<Item = RichParagraph>,
{
    let mut block = vec![
        RichParagraph::blank(),
        RichParagraph::new(vec![Span::new(title).bold()]),
    ];
    block.extend(lines);
    block
}

/// Bold `"<rule id> - <rule title>"` line opening every rule cell.
pub fn rule_heading(rule_id: &str, rule: &RuleDef) -> RichParagraph {
    RichParagraph::new(vec![Span::new(format!("{} - {}", rule_id, rule.title)).bold()])
}

/// MASVS controls with their localized titles.
pub fn mas_block(mas: &str, localizer: &Localizer<'_>) -> Vec<RichParagraph> {
    if mas.is_empty() {
        return Vec::new();
    }
    titled_block(
        localizer.t("label.mas_title"),
        pipe_entries(mas).map(|mas_id| {
            RichParagraph::plain(format!(
                "{} - {}",
                mas_id,
                localizer.t(&format!("mas.{mas_id}"))
            ))
        }),
    )
}

/// MASTG references, one per line.
pub fn mstg_block(real_mstg: &str, localizer: &Localizer<'_>) -> Vec<RichParagraph> {
    if real_mstg.is_empty() {
        return Vec::new();
    }
    titled_block(
        localizer.t("label.mstg_title"),
        pipe_entries(real_mstg).map(RichParagraph::plain),
    )
}

/// OWASP Mobile Top 10 entries, one per line.
pub fn owasp_mobile_block(owasp_mobile: &str, localizer: &Localizer<'_>) -> Vec<RichParagraph> {
    if owasp_mobile.is_empty() {
        return Vec::new();
    }
    titled_block(
        localizer.t("label.owasp_mobile_title"),
        pipe_entries(owasp_mobile).map(RichParagraph::plain),
    )
}

/// Rule description; `<br/>` breaks lines and `<b>` marks bold text.
pub fn description_block(desc: &str, localizer: &Localizer<'_>) -> Vec<RichParagraph> {
    if desc.is_empty() {
        return Vec::new();
    }
    titled_block(
        localizer.t("label.description_title"),
        richtext::parse_inline_markup(desc)
            .into_iter()
            .map(RichParagraph::new),
    )
}

/// Evidence of the first detail entry of `finding`.
///
/// A malformed entry is logged and the block is left out.
pub fn detail_block(
    rule_id: &str,
    finding: &Finding,
    localizer: &Localizer<'_>,
) -> Vec<RichParagraph> {
    match finding.first_detail() {
        None => Vec::new(),
        Some(Ok(item)) => titled_block(
            localizer.t("label.detail_info_title"),
            [
                RichParagraph::plain(format!("· {}", item.details)),
                RichParagraph::plain(item.description),
            ],
        ),
        Some(Err(err)) => {
            warn!("Skipping detail information of rule {}: {}", rule_id, err);
            Vec::new()
        }
    }
}

/// Left cell: passed, or detected in red.
pub fn status_cell(finding: &Finding, localizer: &Localizer<'_>) -> Cell {
    let span = if finding.is_detected {
        Span::new(localizer.t("label.rule_detected")).colored(DETECTED_COLOR)
    } else {
        Span::new(localizer.t("label.rule_passed"))
    };
    Cell::single(RichParagraph::new(vec![span]).with_alignment(HorizontalAlignment::Center))
}

/// Right cell: heading followed by every non-empty block.
pub fn rule_cell(
    rule_id: &str,
    rule: &RuleDef,
    finding: &Finding,
    localizer: &Localizer<'_>,
) -> Cell {
    let mut paragraphs = vec![rule_heading(rule_id, rule)];
    paragraphs.extend(mas_block(&rule.mas, localizer));
    paragraphs.extend(mstg_block(&rule.real_mstg, localizer));
    paragraphs.extend(owasp_mobile_block(&rule.owasp_mobile, localizer));
    paragraphs.extend(description_block(&rule.desc, localizer));
    paragraphs.extend(detail_block(rule_id, finding, localizer));
    Cell::new(paragraphs)
}
