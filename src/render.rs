//! The rendering pipeline.
//!
//! Data flow is strictly linear: escape protection, blank-line marking, the
//! five span-extraction passes, the line-oriented block scan, then
//! reassembly (span restoration, break conversion, escape restoration, and
//! wrapping).

use crate::{
    admonitions, escape, fences, figures,
    lists::CheckboxIds,
    placeholder::{BREAK_TOKEN, PlaceholderTable},
    scan, style, table,
    RenderError,
};

/// Options accepted by [`render`].
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Embed the companion stylesheet in `full_html` and report it in `css`.
    pub include_css: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { include_css: true }
    }
}

/// A rendered document fragment with its companion stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The fragment, wrapped in the container element.
    pub html: String,
    /// The stylesheet, or empty when CSS was not requested.
    pub css: String,
    /// The fragment preceded by an embedded style block when requested.
    pub full_html: String,
}

/// Converts a source document into an HTML fragment plus companion CSS.
///
/// # Errors
/// Returns a [`RenderError`] when a structural precondition is violated;
/// all other malformed syntax degrades to plain paragraph rendering.
pub fn render(markdown: &str, options: RenderOptions) -> Result<Rendered, RenderError> {
    let (protected, escapes) = escape::protect(markdown);
    let marked = mark_blank_lines(&protected);

    let mut spans = PlaceholderTable::new();
    let text = fences::extract_code_blocks(&marked, &mut spans);
    let text = figures::extract_images(&text, &mut spans);
    let text = figures::extract_internal_links(&text, &mut spans);
    let text = admonitions::extract_admonitions(&text, &mut spans);
    let text = table::extract_tables(&text, &mut spans)?;
    log::debug!(
        "protected {} escapes and {} spans",
        escapes.len(),
        spans.len()
    );

    let mut ids = CheckboxIds::new();
    let body = scan::scan_blocks(&text, &mut ids)?;

    let restored = spans.restore(&body);
    let restored = restored.replace(BREAK_TOKEN, "<br>");
    let html = format!(
        "<div class=\"mdweave-body\">{}</div>",
        escape::restore(&restored, &escapes)
    );

    let css = if options.include_css {
        style::STYLESHEET.to_string()
    } else {
        String::new()
    };
    let full_html = if options.include_css {
        format!("<style>{css}</style>{html}")
    } else {
        html.clone()
    };
    Ok(Rendered {
        html,
        css,
        full_html,
    })
}

/// Replaces every blank line except the last with a break marker.
///
/// The marker lives on its own line so the scanner still sees a line
/// boundary where the blank used to be.
fn mark_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if line.trim().is_empty() && i < last {
                format!("\n{BREAK_TOKEN}")
            } else {
                (*line).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_of(source: &str) -> String {
        render(source, RenderOptions { include_css: false })
            .expect("render should succeed")
            .html
    }

    #[test]
    fn fragment_is_wrapped_in_container() {
        let html = html_of("hello");
        assert!(html.starts_with("<div class=\"mdweave-body\">"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn css_is_embedded_only_when_requested() {
        let with = render("x", RenderOptions::default()).expect("render should succeed");
        assert!(with.full_html.starts_with("<style>"));
        assert_eq!(with.css, style::STYLESHEET);

        let without =
            render("x", RenderOptions { include_css: false }).expect("render should succeed");
        assert!(without.css.is_empty());
        assert_eq!(without.full_html, without.html);
    }

    #[test]
    fn blank_lines_become_breaks() {
        let html = html_of("a\n\nb");
        assert!(html.contains("<br>"));
    }

    #[test]
    fn escaped_markers_render_literally() {
        let html = html_of("\\*lit\\*");
        assert!(html.contains("*lit*"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn sentinel_lookalike_text_passes_through() {
        let html = html_of("plain \u{E000}code:0\u{E001} text");
        assert!(html.contains("plain \u{E000}code:0\u{E001} text"));
    }

    #[test]
    fn pipeline_combines_all_stages() {
        let source = "# Title\n\n> quoted\n\n- [x] done\n\n```\ncode < here\n```";
        let html = html_of(source);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<blockquote>quoted</blockquote>"));
        assert!(html.contains("checked disabled"));
        assert!(html.contains("code &lt; here"));
    }
}
