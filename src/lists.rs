//! Nested list construction, including checklist items.
//!
//! A run of list lines is tokenized into level/kind/content records and
//! folded into nested list elements. Two spaces of indentation make one
//! nesting level. The kind of each container follows the first item rendered
//! inside it, so a numbered child can nest under a bulleted parent.

use std::sync::LazyLock;

use regex::Regex;

use crate::{error::RenderError, inline};

static CHECKLIST_RE: LazyLock<Regex> =
    lazy_regex!(r"^(\s*)- \[([ x])\]\s(.+)$", "valid checklist regex");
static ORDERED_RE: LazyLock<Regex> = lazy_regex!(r"^\s*[0-9]+\.\s", "valid ordered regex");
static MARKER_RE: LazyLock<Regex> =
    lazy_regex!(r"^\s*(?:[-*]|[0-9]+\.)\s", "valid list marker regex");

/// What kind of marker introduced a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Unordered,
    Ordered,
    Checklist { checked: bool },
}

/// One item of a list run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Nesting level derived from leading whitespace (two spaces per level).
    pub level: usize,
    pub kind: ItemKind,
    pub content: String,
}

/// Allocates checkbox element ids for one render call.
///
/// Ids are a plain sequence, so identical input renders identical output
/// across calls.
#[derive(Debug, Default)]
pub struct CheckboxIds {
    issued: usize,
}

impl CheckboxIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("checkbox-{}", self.issued)
    }
}

/// Tokenizes raw list lines into level/kind/content records.
///
/// Kind is inferred independently per line. A checklist marker whose content
/// holds an embedded continuation newline no longer matches the checklist
/// pattern and degrades to an unordered item with the marker text kept.
#[must_use]
pub fn parse_list_items(items: &[String]) -> Vec<ListItem> {
    items
        .iter()
        .map(|item| {
            let indent = item.chars().take_while(|c| c.is_whitespace()).count();
            let level = indent / 2;
            if let Some(caps) = CHECKLIST_RE.captures(item) {
                return ListItem {
                    level,
                    kind: ItemKind::Checklist {
                        checked: &caps[2] == "x",
                    },
                    content: caps[3].replace("  \n", "<br>"),
                };
            }
            let kind = if ORDERED_RE.is_match(item) {
                ItemKind::Ordered
            } else {
                ItemKind::Unordered
            };
            ListItem {
                level,
                kind,
                content: MARKER_RE.replace(item, "").replace("  \n", "<br>"),
            }
        })
        .collect()
}

fn container_tag(kind: ItemKind) -> &'static str {
    if matches!(kind, ItemKind::Ordered) {
        "ol"
    } else {
        "ul"
    }
}

/// Renders a run of raw list lines as nested list elements.
///
/// The outermost container's kind follows the run's first item.
///
/// # Errors
/// Returns [`RenderError::EmptyListRun`] when the run holds no items.
pub fn render_list(items: &[String], ids: &mut CheckboxIds) -> Result<String, RenderError> {
    let parsed = parse_list_items(items);
    let Some(first) = parsed.first() else {
        return Err(RenderError::EmptyListRun);
    };
    let tag = container_tag(first.kind);
    let (body, _) = build_level(&parsed, 0, None, ids);
    Ok(format!("<{tag}>{body}</{tag}>"))
}

/// Folds items one level below `parent`, recursing for deeper items.
///
/// An item renders only when its level is exactly one below the recursion's
/// parent; items that skip a level are dropped. The child container's tag
/// follows the child run's own first item, independent of the parent's.
/// Returns the rendered items and the index of the first item not consumed.
fn build_level(
    items: &[ListItem],
    start: usize,
    parent: Option<usize>,
    ids: &mut CheckboxIds,
) -> (String, usize) {
    let child_level = parent.map_or(0, |p| p + 1);
    let mut html = String::new();
    let mut i = start;
    while let Some(item) = items.get(i) {
        if parent.is_some_and(|p| item.level <= p) {
            break;
        }
        if item.level == child_level {
            match item.kind {
                ItemKind::Checklist { checked } => {
                    let id = ids.next_id();
                    let checked_attr = if checked { " checked" } else { "" };
                    html.push_str(&format!(
                        "<li class=\"checklist-item\"><div class=\"checklist-content\">\
                         <input type=\"checkbox\" id=\"{id}\"{checked_attr} disabled>\
                         <label for=\"{id}\">{}</label></div>",
                        inline::format_inline(&item.content),
                    ));
                }
                ItemKind::Unordered | ItemKind::Ordered => {
                    html.push_str(&format!("<li>{}", inline::format_inline(&item.content)));
                }
            }
            if let Some(next) = items.get(i + 1) {
                if next.level > item.level {
                    let child_tag = container_tag(next.kind);
                    let (child, consumed_to) = build_level(items, i + 1, Some(item.level), ids);
                    html.push_str(&format!("<{child_tag}>{child}</{child_tag}>"));
                    i = consumed_to - 1;
                }
            }
            html.push_str("</li>");
        }
        i += 1;
    }
    (html, i)
}
