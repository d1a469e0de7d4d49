//! Layout elements that `genpdf` does not ship with.
//!
//! The report header needs full-width rules of a given weight, sections are separated by fixed
//! amounts of whitespace expressed in points rather than in line heights, and tables are framed
//! in a colour of their own.  `genpdf` strokes every line with the default PDF line width, so a
//! heavier rule is drawn as several parallel strokes.

use genpdf::elements::CellDecorator;
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{render, Element, Margins, Mm, Position, RenderResult, Size};

use crate::model::TableLines;

const MM_PER_POINT: f64 = 25.4 / 72.0;
const STROKE_PITCH_PT: f64 = 0.5;
const FRAME_INSET_MM: f64 = 0.3;

/// Converts a length in millimetres into the `genpdf` unit.
pub fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts a length in typographic points into the `genpdf` unit.
pub fn mm_from_points(points: f64) -> Mm {
    mm_from_f64(points * MM_PER_POINT)
}

fn stroke_count(weight_pt: f64) -> usize {
    (weight_pt / STROKE_PITCH_PT).ceil().max(1.0) as usize
}

/// Strokes evenly spread over the top `weight_pt` points of `area`.
fn draw_rule(area: &render::Area<'_>, weight_pt: f64, color: Color) {
    let width = area.size().width;
    let count = stroke_count(weight_pt);
    let pitch = weight_pt / count as f64;
    let style = Style::new().with_color(color);
    for index in 0..count {
        let y = mm_from_points(pitch * (index as f64 + 0.5));
        area.draw_line(vec![Position::new(0, y), Position::new(width, y)], style);
    }
}

/// A horizontal line spanning the full width of the available area.
pub struct HorizontalRule {
    weight_pt: f64,
    color: Color,
}

impl HorizontalRule {
    /// Creates a rule with the given weight in points.
    pub fn new(weight_pt: f64, color: Color) -> Self {
        Self { weight_pt, color }
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let thickness = mm_from_points(self.weight_pt);
        if thickness > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        draw_rule(&area, self.weight_pt, self.color);
        result.size = Size::new(area.size().width, thickness);
        Ok(result)
    }
}

/// Fixed vertical whitespace.
///
/// At the bottom of a page the space is truncated to what is left instead of being carried over.
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    /// Creates a space with the given height in points.
    pub fn new(height_pt: f64) -> Self {
        Self {
            height: mm_from_points(height_pt),
        }
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edges {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
}

/// Cell decorator drawing table lines in a fixed colour.
///
/// [`TableLines::Boxed`] draws the outer box and a line above every row, without lines between
/// columns.  [`TableLines::BelowRows`] only underlines each row.
pub struct TableFrameDecorator {
    lines: TableLines,
    color: Color,
    num_columns: usize,
    num_rows: usize,
}

impl TableFrameDecorator {
    pub fn new(lines: TableLines, color: Color) -> Self {
        Self {
            lines,
            color,
            num_columns: 0,
            num_rows: 0,
        }
    }

    fn edges(&self, column: usize, row: usize) -> Edges {
        match self.lines {
            TableLines::Boxed => Edges {
                top: true,
                right: column + 1 == self.num_columns,
                bottom: row + 1 == self.num_rows,
                left: column == 0,
            },
            TableLines::BelowRows => Edges {
                top: false,
                right: false,
                bottom: true,
                left: false,
            },
        }
    }
}

fn inset(drawn: bool) -> Mm {
    if drawn {
        mm_from_f64(FRAME_INSET_MM)
    } else {
        Mm::default()
    }
}

impl CellDecorator for TableFrameDecorator {
    fn set_table_size(&mut self, num_columns: usize, num_rows: usize) {
        self.num_columns = num_columns;
        self.num_rows = num_rows;
    }

    fn prepare_cell<'p>(
        &self,
        column: usize,
        row: usize,
        mut area: render::Area<'p>,
    ) -> render::Area<'p> {
        let edges = self.edges(column, row);
        area.add_margins(Margins::trbl(
            inset(edges.top),
            inset(edges.right),
            inset(edges.bottom),
            inset(edges.left),
        ));
        area
    }

    fn decorate_cell(
        &mut self,
        column: usize,
        row: usize,
        has_more: bool,
        area: render::Area<'_>,
        row_height: Mm,
        _style: Style,
    ) -> Mm {
        let edges = self.edges(column, row);
        let size = area.size();
        let mut height = inset(edges.top) + row_height + inset(edges.bottom);
        if height > size.height {
            height = size.height;
        }

        let style = Style::new().with_color(self.color);
        let top_left = Position::new(0, 0);
        let top_right = Position::new(size.width, 0);
        let bottom_left = Position::new(0, height);
        let bottom_right = Position::new(size.width, height);

        if edges.top {
            area.draw_line(vec![top_left, top_right], style);
        }
        // A boxed row split by a page break is closed at the bottom of the page.
        if edges.bottom || (has_more && self.lines == TableLines::Boxed) {
            area.draw_line(vec![bottom_left, bottom_right], style);
        }
        if edges.left {
            area.draw_line(vec![top_left, bottom_left], style);
        }
        if edges.right {
            area.draw_line(vec![top_right, bottom_right], style);
        }

        height
    }
}
