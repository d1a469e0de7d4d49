//! Data structures describing the flow content of a report document.
//!
//! A [`FlowDocument`] is an append-only list of [`FlowElement`]s in page order.  The types avoid
//! any `genpdf` element so an assembled report can be inspected and tested without fonts; the
//! conversion into layout elements happens in [`crate::render`].

use genpdf::style::Color;

use crate::richtext::{self, Span};

/// Horizontal alignment of a paragraph, mapped to [`genpdf::Alignment`] when rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
}

/// Named text styles used by the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Large centered document title.
    Title,
    /// Heading printed above each report section.
    SectionHeading,
    /// Regular table cell text.
    Cell,
}

/// Rich text paragraph carrying inline styling information and alignment metadata.
///
/// A paragraph without spans is a blank line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans using left alignment.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Creates a paragraph holding a single unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Span::new(text)])
    }

    /// Creates an empty paragraph used as line separator.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Returns whether the paragraph has no text at all.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|span| span.text().is_empty())
    }

    /// Returns the paragraph text without styling.
    pub fn plain_text(&self) -> String {
        richtext::plain_text(&self.spans)
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Content of a single table cell: paragraphs stacked vertically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    paragraphs: Vec<RichParagraph>,
}

impl Cell {
    /// Creates a cell from the given paragraphs.
    pub fn new(paragraphs: impl Into<Vec<RichParagraph>>) -> Self {
        Self {
            paragraphs: paragraphs.into(),
        }
    }

    /// Creates a cell holding a single paragraph.
    pub fn single(paragraph: RichParagraph) -> Self {
        Self::new(vec![paragraph])
    }

    /// Returns the paragraphs of the cell.
    pub fn paragraphs(&self) -> &[RichParagraph] {
        &self.paragraphs
    }

    /// Returns the cell text with one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(RichParagraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Which table lines are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableLines {
    /// Outer box plus a line above every row.
    Boxed,
    /// A line below every row.
    BelowRows,
}

/// Lines drawn around and between table rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableFrame {
    pub color: Color,
    pub lines: TableLines,
}

/// A table with fixed relative column widths.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    column_weights: Vec<usize>,
    header: Option<Vec<Cell>>,
    rows: Vec<Vec<Cell>>,
    frame: TableFrame,
}

impl Table {
    /// Creates an empty table with the given relative column widths.
    pub fn new(column_weights: impl Into<Vec<usize>>, frame: TableFrame) -> Self {
        Self {
            column_weights: column_weights.into(),
            header: None,
            rows: Vec::new(),
            frame,
        }
    }

    /// Sets the header row and returns the updated table.
    pub fn with_header(mut self, header: Vec<Cell>) -> Self {
        self.header = Some(header);
        self
    }

    /// Appends a data row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Returns the relative column widths.
    pub fn column_weights(&self) -> &[usize] {
        &self.column_weights
    }

    /// Returns the header row, if any.
    pub fn header(&self) -> Option<&[Cell]> {
        self.header.as_deref()
    }

    /// Returns the data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the frame style.
    pub fn frame(&self) -> TableFrame {
        self.frame
    }
}

/// A unit of document content consumed by the renderer in sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowElement {
    /// Text block with a named style.
    Paragraph {
        style: TextStyle,
        content: RichParagraph,
    },
    /// Table with per-cell rich text.
    Table(Table),
    /// Vertical whitespace, in points.
    Spacer(f64),
    /// Full-width horizontal rule.
    Rule { weight_pt: f64, color: Color },
}

impl FlowElement {
    /// Convenience helper for a styled paragraph element.
    pub fn paragraph(style: TextStyle, content: RichParagraph) -> Self {
        Self::Paragraph { style, content }
    }
}

/// Ordered flow content of one report.
///
/// Elements can only be appended; their order is the visual page order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowDocument {
    title: String,
    elements: Vec<FlowElement>,
}

impl FlowDocument {
    /// Creates an empty document with the given metadata title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// Returns the document title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends an element at the end of the flow.
    pub fn push(&mut self, element: FlowElement) {
        self.elements.push(element);
    }

    /// Returns the elements in page order.
    pub fn elements(&self) -> &[FlowElement] {
        &self.elements
    }

    /// Returns all tables in page order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(|element| match element {
            FlowElement::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Returns the text of all paragraphs with the given style, in page order.
    pub fn paragraphs_with_style(&self, style: TextStyle) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                FlowElement::Paragraph {
                    style: current,
                    content,
                } if *current == style => Some(content.plain_text()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> TableFrame {
        TableFrame {
            color: Color::Rgb(0, 0, 0),
            lines: TableLines::Boxed,
        }
    }

    #[test]
    fn blank_paragraph_has_no_text() {
        assert!(RichParagraph::blank().is_blank());
        assert!(RichParagraph::plain("").is_blank());
        assert!(!RichParagraph::plain("x").is_blank());
    }

    #[test]
    fn header_is_not_counted_as_row() {
        let mut table = Table::new(vec![1, 2], frame())
            .with_header(vec![Cell::default(), Cell::default()]);
        table.push_row(vec![Cell::single(RichParagraph::plain("a")), Cell::default()]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.header().map(<[Cell]>::len), Some(2));
    }

    #[test]
    fn document_keeps_insertion_order() {
        let mut document = FlowDocument::new("t");
        document.push(FlowElement::Spacer(1.0));
        document.push(FlowElement::Table(Table::new(vec![1], frame())));
        document.push(FlowElement::paragraph(
            TextStyle::SectionHeading,
            RichParagraph::plain("h"),
        ));
        assert!(matches!(document.elements()[0], FlowElement::Spacer(_)));
        assert!(matches!(document.elements()[1], FlowElement::Table(_)));
        assert_eq!(
            document.paragraphs_with_style(TextStyle::SectionHeading),
            vec!["h".to_string()]
        );
    }
}
