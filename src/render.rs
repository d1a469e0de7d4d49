//! Conversion of a [`FlowDocument`] into `genpdf` elements and PDF bytes.

use genpdf::elements::{Break, LinearLayout, Paragraph, TableLayout};
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element, Margins};

use crate::builder::DocumentBuilder;
use crate::elements::{mm_from_f64, HorizontalRule, TableFrameDecorator, VerticalSpace};
use crate::model::{
    Cell, FlowDocument, FlowElement, HorizontalAlignment, RichParagraph, Table, TextStyle,
};

/// Text colour of the document title.
pub const TITLE_COLOR: Color = Color::Rgb(45, 166, 153);
/// Text colour of section headings.
pub const HEADING_COLOR: Color = Color::Rgb(54, 122, 179);

const CELL_PADDING_MM: f64 = 1.5;

fn text_style(style: TextStyle) -> Style {
    match style {
        TextStyle::Title => Style::new().with_font_size(24).with_color(TITLE_COLOR),
        TextStyle::SectionHeading => Style::new().with_font_size(12).with_color(HEADING_COLOR),
        TextStyle::Cell => Style::new().with_font_size(10),
    }
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
    }
}

fn paragraph_element(paragraph: &RichParagraph) -> Paragraph {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(span.to_styled_string());
    }
    element.set_alignment(alignment(paragraph.alignment()));
    element
}

fn cell_element(cell: &Cell) -> impl Element {
    let mut layout = LinearLayout::vertical();
    for paragraph in cell.paragraphs() {
        if paragraph.is_blank() {
            layout.push(Break::new(1));
        } else {
            layout.push(paragraph_element(paragraph));
        }
    }

    let padding = mm_from_f64(CELL_PADDING_MM);
    layout
        .padded(Margins::trbl(padding, padding, padding, padding))
        .styled(text_style(TextStyle::Cell))
}

fn table_element(table: &Table) -> Result<TableLayout, Error> {
    let mut layout = TableLayout::new(table.column_weights().to_vec());
    let frame = table.frame();
    layout.set_cell_decorator(TableFrameDecorator::new(frame.lines, frame.color));

    let rows = table
        .header()
        .into_iter()
        .chain(table.rows().iter().map(Vec::as_slice));
    for row in rows {
        let mut table_row = layout.row();
        for cell in row {
            table_row = table_row.element(cell_element(cell));
        }
        table_row.push()?;
    }

    Ok(layout)
}

fn push_element(document: &mut genpdf::Document, element: &FlowElement) -> Result<(), Error> {
    match element {
        FlowElement::Paragraph { style, content } => {
            document.push(paragraph_element(content).styled(text_style(*style)));
        }
        FlowElement::Table(table) => document.push(table_element(table)?),
        FlowElement::Spacer(points) => document.push(VerticalSpace::new(*points)),
        FlowElement::Rule { weight_pt, color } => {
            document.push(HorizontalRule::new(*weight_pt, *color));
        }
    }
    Ok(())
}

/// Lays out `flow` with the document settings of `builder` and returns the PDF bytes.
///
/// Pagination is left to `genpdf`.
pub fn render_flow(flow: &FlowDocument, builder: DocumentBuilder) -> Result<Vec<u8>, Error> {
    let mut document = builder.with_title(flow.title()).build()?;
    for element in flow.elements() {
        push_element(&mut document, element)?;
    }

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}
