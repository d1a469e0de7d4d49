//! Styled text fragments used inside report paragraphs and table cells.
//!
//! A [`Span`] carries the subset of inline styling the report needs (bold and color) and
//! converts into [`genpdf`][genpdf] styled strings once the document is rendered.
//!
//! Rule descriptions may contain a small inline markup: `<br/>` starts a new line, `<b>...</b>`
//! sets bold text and the entities `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&#39;` and `&nbsp;` are
//! decoded.  Any other tag is printed as it is.  All other scan data is plain text.
//!
//! [genpdf]: https://docs.rs/genpdf/

use std::mem;

use genpdf::style::{Color, Style, StyledString};

const LINE_BREAK_TAGS: &[&str] = &["<br/>", "<br />", "<br>"];
const BOLD_OPEN_TAGS: &[&str] = &["<b>"];
const BOLD_CLOSE_TAGS: &[&str] = &["</b>"];
const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&nbsp;", '\u{a0}'),
];

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Sets the bold flag and returns the updated span.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Convenience shorthand that marks the span as bold.
    pub fn bold(self) -> Self {
        self.with_bold(true)
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        style
    }

    /// Converts the span to a [`StyledString`].
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

/// Concatenates the text of all spans, dropping style information.
pub fn plain_text<'a, I>(spans: I) -> String
where
    I: IntoIterator<Item = &'a Span>,
{
    spans.into_iter().map(Span::text).collect()
}

fn strip_tag<'a>(input: &'a str, tags: &[&str]) -> Option<&'a str> {
    tags.iter().find_map(|tag| {
        input
            .get(..tag.len())
            .filter(|head| head.eq_ignore_ascii_case(tag))
            .map(|_| &input[tag.len()..])
    })
}

fn strip_entity(input: &str) -> Option<(char, &str)> {
    ENTITIES
        .iter()
        .find(|(entity, _)| input.starts_with(entity))
        .map(|(entity, decoded)| (*decoded, &input[entity.len()..]))
}

/// Splits `source` into lines of spans, applying the inline markup described in the module
/// documentation.  Always returns at least one line; a line may be empty.
pub fn parse_inline_markup(source: &str) -> Vec<Vec<Span>> {
    fn flush(line: &mut Vec<Span>, buffer: &mut String, bold: bool) {
        if !buffer.is_empty() {
            line.push(Span::new(mem::take(buffer)).with_bold(bold));
        }
    }

    let mut lines = Vec::new();
    let mut line = Vec::new();
    let mut buffer = String::new();
    let mut bold = false;
    let mut rest = source;

    while let Some(index) = rest.find(|c: char| c == '<' || c == '&') {
        buffer.push_str(&rest[..index]);
        rest = &rest[index..];

        if let Some(after) = strip_tag(rest, LINE_BREAK_TAGS) {
            flush(&mut line, &mut buffer, bold);
            lines.push(mem::take(&mut line));
            rest = after;
        } else if let Some(after) = strip_tag(rest, BOLD_OPEN_TAGS) {
            flush(&mut line, &mut buffer, bold);
            bold = true;
            rest = after;
        } else if let Some(after) = strip_tag(rest, BOLD_CLOSE_TAGS) {
            flush(&mut line, &mut buffer, bold);
            bold = false;
            rest = after;
        } else if let Some((decoded, after)) = strip_entity(rest) {
            buffer.push(decoded);
            rest = after;
        } else {
            // `<` and `&` are single bytes.
            buffer.push_str(&rest[..1]);
            rest = &rest[1..];
        }
    }

    buffer.push_str(rest);
    flush(&mut line, &mut buffer, bold);
    lines.push(line);
    lines
}
