//! Inline formatting for emphasis, code spans, and external links.
//!
//! Each marker has exactly one role: `**bold**`, `__underline__`,
//! `~~strike~~`, `` `code` ``, and `[text](url)`. The passes run in a fixed
//! order so code spans are wrapped before the emphasis markers are examined.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape;

static CODE_SPAN_RE: LazyLock<Regex> = lazy_regex!(r"`([^`]+)`", "valid code span regex");
static BOLD_RE: LazyLock<Regex> = lazy_regex!(r"\*\*([^*]+)\*\*", "valid bold regex");
static UNDERLINE_RE: LazyLock<Regex> = lazy_regex!(r"__([^_]+)__", "valid underline regex");
static STRIKE_RE: LazyLock<Regex> = lazy_regex!(r"~~([^~]+)~~", "valid strikethrough regex");
static LINK_RE: LazyLock<Regex> =
    lazy_regex!(r"\[([^\]]+)\]\(([^)]+)\)", "valid link regex");

/// Apply inline formatting to one run of text.
#[must_use]
pub fn format_inline(text: &str) -> String {
    let text = CODE_SPAN_RE.replace_all(text, "<code>$1</code>");
    let text = BOLD_RE.replace_all(&text, "<b>$1</b>");
    let text = UNDERLINE_RE.replace_all(&text, "<u>$1</u>");
    let text = STRIKE_RE.replace_all(&text, "<s>$1</s>");
    let text = LINK_RE.replace_all(&text, |caps: &Captures<'_>| {
        format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape::html_attr(&caps[2]),
            &caps[1]
        )
    });
    text.into_owned()
}
