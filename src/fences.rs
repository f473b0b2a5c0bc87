//! Fenced code block extraction.
//!
//! Runs first of the five protection passes so nothing inside a fence can
//! match any later syntax. A fence body may carry an embedded `:::output`
//! section, which renders as a separate output region paired with the
//! program region in a single container.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
    escape,
    placeholder::{BREAK_TOKEN, BREAK_TOKEN_LINE, Category, PlaceholderTable},
};

static FENCE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?s)```([^\n]*)\n(.*?)```", "valid fence regex");

// Everything before the marker is the program region; everything between the
// marker and the closing `:::` is the output region. Text after the closing
// `:::` is dropped.
static OUTPUT_SPLIT_RE: LazyLock<Regex> =
    lazy_regex!(r"(?s)(.*?):::output\n(.*?)\n:::", "valid output split regex");

/// Replaces every fenced block with a token, storing the rendered HTML.
///
/// The language tag after the opening fence is accepted but not rendered.
#[must_use]
pub fn extract_code_blocks(text: &str, spans: &mut PlaceholderTable) -> String {
    FENCE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[2];
            let html = match OUTPUT_SPLIT_RE.captures(body) {
                Some(split) => {
                    let program = strip_break_markers(split[1].trim());
                    let output = split[2].trim();
                    format!(
                        "<div class=\"code-block-container\">\
                         <pre class=\"code-program\"><code>{}</code></pre>\
                         <pre class=\"code-output\"><code>{}</code></pre>\
                         </div>",
                        escape::html_text(&program),
                        escape::html_text(output),
                    )
                }
                None => format!(
                    "<pre><code>{}</code></pre>",
                    escape::html_text(&strip_break_markers(body.trim())),
                ),
            };
            spans.insert(Category::Code, html)
        })
        .into_owned()
}

/// Remove blank-line markers left in the body by the marking stage.
///
/// A marker at the very end of a trimmed body has lost its newline, so it is
/// stripped separately.
fn strip_break_markers(body: &str) -> String {
    let stripped = body.replace(BREAK_TOKEN_LINE, "");
    match stripped.strip_suffix(BREAK_TOKEN) {
        Some(rest) => rest.trim_end().to_string(),
        None => stripped,
    }
}
