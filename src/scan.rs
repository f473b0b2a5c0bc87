//! Line-oriented block scanner.
//!
//! Walks the placeholder-substituted text with a single forward cursor and
//! groups lines into headings, blockquote runs, list runs, and paragraphs.
//! Dispatch is first-match: heading, then blockquote, then list, then plain
//! paragraph.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::RenderError,
    inline,
    lists::{self, CheckboxIds},
    quotes,
};

static HEADING_RE: LazyLock<Regex> =
    lazy_regex!(r"^(#{1,6})\s+(.+)$", "valid heading regex");
static QUOTE_RE: LazyLock<Regex> = lazy_regex!(r"^>\s", "valid blockquote regex");
static BULLET_RE: LazyLock<Regex> = lazy_regex!(r"^\s*[-*]\s", "valid bullet regex");
static ORDERED_RE: LazyLock<Regex> = lazy_regex!(r"^\s*[0-9]+\.\s", "valid ordered regex");
static CHECKLIST_RE: LazyLock<Regex> =
    lazy_regex!(r"^\s*- \[[ x]\]\s", "valid checklist regex");

fn is_list_line(line: &str) -> bool {
    BULLET_RE.is_match(line) || ORDERED_RE.is_match(line) || CHECKLIST_RE.is_match(line)
}

/// Scans `text` line by line and emits block-level HTML joined by newlines.
///
/// # Errors
/// Propagates [`RenderError`] from the nested list builder.
pub fn scan_blocks(text: &str, ids: &mut CheckboxIds) -> Result<String, RenderError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].len();
            blocks.push(format!(
                "<h{level}>{}</h{level}>",
                inline::format_inline(&caps[2])
            ));
            i += 1;
            continue;
        }

        if QUOTE_RE.is_match(line) {
            let start = i;
            while i < lines.len() && QUOTE_RE.is_match(lines[i]) {
                i += 1;
            }
            blocks.push(quotes::render_blockquote(&lines[start..i]));
            continue;
        }

        if is_list_line(line) {
            let mut items: Vec<String> = Vec::new();
            while i < lines.len() {
                let current = lines[i];
                if is_list_line(current) {
                    items.push(current.to_string());
                } else if !current.trim_start().is_empty()
                    && i > 0
                    && lines[i - 1].ends_with("  ")
                {
                    // Continuation of the previous item, signalled by the two
                    // trailing spaces on the raw line before it.
                    if let Some(last) = items.last_mut() {
                        last.push('\n');
                        last.push_str(current);
                    }
                } else {
                    break;
                }
                i += 1;
            }
            blocks.push(lists::render_list(&items, ids)?);
            continue;
        }

        blocks.push(format!("<p>{}</p>", inline::format_inline(line)));
        i += 1;
    }
    Ok(blocks.join("\n"))
}
