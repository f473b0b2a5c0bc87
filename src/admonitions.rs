//! Admonition callouts: info, warn, and alert blocks.
//!
//! Each kind is its own fenced syntax (`:::info` … `:::` and so on) and is
//! extracted by its own pass. Bodies are literal text, escaped but never
//! formatted.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
    escape,
    placeholder::{Category, PlaceholderTable},
};

/// Kind marker and header label for each admonition syntax.
const KINDS: [(&str, &str); 3] = [
    ("info", "Info"),
    ("warn", "Warning"),
    ("alert", "Alert"),
];

static KIND_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    KINDS.map(|(kind, _)| {
        Regex::new(&format!("(?s):::{kind}\n(.*?)\n:::")).expect("valid admonition regex")
    })
});

fn admonition_html(kind: &str, label: &str, body: &str) -> String {
    format!(
        "<div class=\"info-block info-type-{kind}\">\
         <div class=\"info-header\">{label}</div>\
         <div class=\"info-content\">{}</div></div>",
        escape::html_text(body.trim()),
    )
}

/// Replaces every admonition block with a token, storing the rendered HTML.
#[must_use]
pub fn extract_admonitions(text: &str, spans: &mut PlaceholderTable) -> String {
    let mut out = text.to_string();
    for (&(kind, label), re) in KINDS.iter().zip(KIND_RES.iter()) {
        out = re
            .replace_all(&out, |caps: &Captures<'_>| {
                spans.insert(Category::Admonition, admonition_html(kind, label, &caps[1]))
            })
            .into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        let mut spans = PlaceholderTable::new();
        let out = extract_admonitions(source, &mut spans);
        spans.restore(&out)
    }

    #[test]
    fn each_kind_gets_its_class_and_label() {
        let html = render(":::info\nnote body\n:::");
        assert!(html.contains("info-type-info"));
        assert!(html.contains("<div class=\"info-header\">Info</div>"));

        let html = render(":::warn\ncareful\n:::");
        assert!(html.contains("info-type-warn"));
        assert!(html.contains(">Warning<"));

        let html = render(":::alert\nstop\n:::");
        assert!(html.contains("info-type-alert"));
        assert!(html.contains(">Alert<"));
    }

    #[test]
    fn body_is_escaped_literal_text() {
        let html = render(":::info\n**not bold** <tag>\n:::");
        assert!(html.contains("**not bold** &lt;tag&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn multiline_bodies_are_kept_whole() {
        let html = render(":::warn\nline one\nline two\n:::");
        assert!(html.contains("line one\nline two"));
    }
}
