//! Pipe table capture and rendering.
//!
//! A table span is a pipe-delimited header line, an optional caption in
//! square brackets immediately after it, a pipe-delimited alignment row, and
//! any number of pipe-delimited data rows. The caption is captured in the
//! same match as the header, so its text never needs to be re-parsed out of
//! the header line.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
    error::RenderError,
    escape, inline,
    placeholder::{Category, PlaceholderTable},
};

static TABLE_RE: LazyLock<Regex> = lazy_regex!(
    r"(?m)^(\|[^\n]+\|)(?:\[([^\]]*)\])?\n((?:\|[^\n]+\|\n?)+)",
    "valid table regex",
);

/// Column alignment resolved from a table's alignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Resolve one alignment cell: `:---:` centers, a trailing `:` right-aligns.
    fn from_cell(cell: &str) -> Self {
        if cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    fn css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Split a pipe-delimited row into trimmed cells, discarding empty ones.
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parsed table span ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    headers: Vec<String>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
    caption: Option<String>,
}

impl TableModel {
    /// Parses a captured table span.
    ///
    /// The first line is the header row and the second the alignment row;
    /// anything after that is data. Rows are never bounds-checked against the
    /// alignment row: short and long rows render as-is.
    ///
    /// # Errors
    /// Returns [`RenderError::TruncatedTable`] when fewer than two lines are
    /// supplied.
    pub fn parse(lines: &[&str], caption: Option<&str>) -> Result<Self, RenderError> {
        let [header_line, align_line, data @ ..] = lines else {
            return Err(RenderError::TruncatedTable { lines: lines.len() });
        };
        Ok(Self {
            headers: split_cells(header_line),
            alignments: split_cells(align_line)
                .iter()
                .map(|cell| Alignment::from_cell(cell))
                .collect(),
            rows: data.iter().map(|line| split_cells(line)).collect(),
            caption: caption.map(ToString::to_string),
        })
    }

    fn alignment_for(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or(Alignment::Left)
    }

    /// Renders the table element, applying column alignment by position.
    ///
    /// Header and data cells pass through inline formatting; the caption is
    /// escaped, never formatted.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table>");
        if let Some(caption) = &self.caption {
            html.push_str(&format!(
                "<caption>{}</caption>",
                escape::html_text(caption)
            ));
        }
        html.push_str("<thead><tr>");
        for (column, header) in self.headers.iter().enumerate() {
            html.push_str(&format!(
                "<th style=\"text-align: {}\">{}</th>",
                self.alignment_for(column).css(),
                inline::format_inline(header),
            ));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for (column, cell) in row.iter().enumerate() {
                html.push_str(&format!(
                    "<td style=\"text-align: {}\">{}</td>",
                    self.alignment_for(column).css(),
                    inline::format_inline(cell),
                ));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// Replaces every table span with a token, storing the rendered HTML.
///
/// # Errors
/// Returns [`RenderError::TruncatedTable`] when a captured span cannot supply
/// both a header row and an alignment row.
pub fn extract_tables(
    text: &str,
    spans: &mut PlaceholderTable,
) -> Result<String, RenderError> {
    let mut first_err = None;
    let out = TABLE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let mut lines = vec![&caps[1]];
            let rest = caps.get(3).map_or("", |m| m.as_str());
            lines.extend(rest.lines().map(str::trim).filter(|line| !line.is_empty()));
            let caption = caps.get(2).map(|m| m.as_str());
            match TableModel::parse(&lines, caption) {
                Ok(model) => spans.insert(Category::Table, model.to_html()),
                Err(err) => {
                    first_err.get_or_insert(err);
                    String::new()
                }
            }
        })
        .into_owned();
    match first_err {
        Some(err) => Err(err),
        None => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        let mut spans = PlaceholderTable::new();
        let out = extract_tables(source, &mut spans).expect("table should render");
        spans.restore(&out)
    }

    #[test]
    fn alignment_row_styles_headers_and_cells() {
        let html = render("| N | A | R |\n|---|:-:|--:|\n| x | 1 | 2 |\n");
        assert!(html.contains("<th style=\"text-align: left\">N</th>"));
        assert!(html.contains("<th style=\"text-align: center\">A</th>"));
        assert!(html.contains("<th style=\"text-align: right\">R</th>"));
        assert!(html.contains("<td style=\"text-align: center\">1</td>"));
    }

    #[test]
    fn caption_is_captured_structurally() {
        let html = render("| A | B |[totals for 2024]\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<caption>totals for 2024</caption>"));
        // The caption text must not leak into the header cells.
        assert!(!html.contains("<th style=\"text-align: left\">totals"));
    }

    #[test]
    fn caption_with_regex_metacharacters_is_plain_text() {
        let html = render("| A | B |[a (b) * c?]\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<caption>a (b) * c?</caption>"));
    }

    #[test]
    fn ragged_rows_render_without_bounds_checking() {
        let html = render("| A | B |\n|---|---|\n| 1 |\n| 2 | 3 | 4 |\n");
        assert!(html.contains("<td style=\"text-align: left\">4</td>"));
    }

    #[test]
    fn cells_receive_inline_formatting_but_caption_does_not() {
        let html = render("| **H** |[**cap**]\n|---|\n| `x` |\n");
        assert!(html.contains("<th style=\"text-align: left\"><b>H</b></th>"));
        assert!(html.contains("<td style=\"text-align: left\"><code>x</code></td>"));
        assert!(html.contains("<caption>**cap**</caption>"));
    }

    #[test]
    fn parse_requires_header_and_alignment_rows() {
        let err = TableModel::parse(&["| A |"], None).unwrap_err();
        assert_eq!(err, RenderError::TruncatedTable { lines: 1 });
    }

    #[test]
    fn non_table_pipes_are_untouched() {
        let mut spans = PlaceholderTable::new();
        let out = extract_tables("a | b\nplain text\n", &mut spans).expect("no table expected");
        assert_eq!(out, "a | b\nplain text\n");
        assert!(spans.is_empty());
    }
}
