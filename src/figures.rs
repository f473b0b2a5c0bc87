//! Image figures and internal cross-document links.
//!
//! Both syntaxes are lifted out of the text before block scanning. Internal
//! links deliberately render as spans rather than anchors; the host
//! application intercepts clicks via the `data-path` attribute instead of
//! letting the browser navigate.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
    escape,
    placeholder::{Category, PlaceholderTable},
};

static IMAGE_RE: LazyLock<Regex> =
    lazy_regex!(r"!\[([^\]]*)\]\(([^)]+)\)", "valid image regex");

static INTERNAL_LINK_RE: LazyLock<Regex> =
    lazy_regex!(r"!!([^!]+)!!\(([^)]+)\)", "valid internal link regex");

/// Replaces every `![alt](url)` with a token, storing a rendered figure.
///
/// The caption is emitted only when the alt text is non-empty.
#[must_use]
pub fn extract_images(text: &str, spans: &mut PlaceholderTable) -> String {
    IMAGE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let alt = &caps[1];
            let url = &caps[2];
            let caption = if alt.is_empty() {
                String::new()
            } else {
                format!("<figcaption>{}</figcaption>", escape::html_text(alt))
            };
            let html = format!(
                "<figure class=\"article-image\"><img src=\"{}\" alt=\"{}\" />{caption}</figure>",
                escape::html_attr(url),
                escape::html_attr(alt),
            );
            spans.insert(Category::Image, html)
        })
        .into_owned()
}

/// Replaces every `!!text!!(path)` with a token, storing a rendered span.
#[must_use]
pub fn extract_internal_links(text: &str, spans: &mut PlaceholderTable) -> String {
    INTERNAL_LINK_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let html = format!(
                "<span class=\"internal-link\" data-path=\"{}\">{}</span>",
                escape::html_attr(&caps[2]),
                escape::html_text(&caps[1]),
            );
            spans.insert(Category::InternalLink, html)
        })
        .into_owned()
}
