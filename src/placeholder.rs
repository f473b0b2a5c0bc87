//! Out-of-band storage for spans lifted out of the working text.
//!
//! Extraction passes store fully rendered HTML here and splice an opaque
//! token into the text in its place. Tokens are delimited by private-use-area
//! characters which the escape pass removes from user input first, so a token
//! in the working text can only have been produced by the pipeline itself.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Opening delimiter of every sentinel token.
pub(crate) const MARK_OPEN: char = '\u{E000}';
/// Closing delimiter of every sentinel token.
pub(crate) const MARK_CLOSE: char = '\u{E001}';

/// Marker substituted for blank lines before block scanning.
pub(crate) const BREAK_TOKEN: &str = "\u{E000}br\u{E001}";
/// A break marker together with the newline that follows it inside spans.
pub(crate) const BREAK_TOKEN_LINE: &str = "\u{E000}br\u{E001}\n";

static TOKEN_RE: LazyLock<Regex> =
    lazy_regex!("\u{E000}([a-z]+):([0-9]+)\u{E001}", "valid span token regex");

/// The five kinds of span the protector lifts out of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Code,
    Image,
    InternalLink,
    Admonition,
    Table,
}

impl Category {
    const ALL: [Category; 5] = [
        Category::Code,
        Category::Image,
        Category::InternalLink,
        Category::Admonition,
        Category::Table,
    ];

    fn tag(self) -> &'static str {
        match self {
            Category::Code => "code",
            Category::Image => "img",
            Category::InternalLink => "link",
            Category::Admonition => "note",
            Category::Table => "tbl",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

/// Indexed side-table of rendered spans, one sequence per category.
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    code: Vec<String>,
    images: Vec<String>,
    links: Vec<String>,
    admonitions: Vec<String>,
    tables: Vec<String>,
}

impl PlaceholderTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored spans across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.slot(*c).len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, category: Category) -> &Vec<String> {
        match category {
            Category::Code => &self.code,
            Category::Image => &self.images,
            Category::InternalLink => &self.links,
            Category::Admonition => &self.admonitions,
            Category::Table => &self.tables,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Code => &mut self.code,
            Category::Image => &mut self.images,
            Category::InternalLink => &mut self.links,
            Category::Admonition => &mut self.admonitions,
            Category::Table => &mut self.tables,
        }
    }

    /// Stores a rendered span and returns the token to splice into the text.
    pub fn insert(&mut self, category: Category, html: String) -> String {
        let slot = self.slot_mut(category);
        let token = format!("{MARK_OPEN}{}:{}{MARK_CLOSE}", category.tag(), slot.len());
        slot.push(html);
        token
    }

    fn get(&self, category: Category, index: usize) -> Option<&str> {
        self.slot(category).get(index).map(String::as_str)
    }

    /// Splices stored spans back into `text` by token lookup.
    ///
    /// Spans captured by a late pass may embed tokens minted by an earlier
    /// pass (an image inside a table cell, say), so the substitution repeats
    /// until it reaches a fixed point. One pass per category bounds the loop.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        let mut current = text.to_string();
        for _ in 0..Category::ALL.len() {
            let mut replaced = false;
            let next = TOKEN_RE.replace_all(&current, |caps: &Captures<'_>| {
                let span = Category::from_tag(&caps[1])
                    .zip(caps[2].parse::<usize>().ok())
                    .and_then(|(category, index)| self.get(category, index));
                match span {
                    Some(html) => {
                        replaced = true;
                        html.to_string()
                    }
                    None => caps[0].to_string(),
                }
            });
            if !replaced {
                break;
            }
            current = next.into_owned();
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_returns_distinct_tokens_per_category() {
        let mut table = PlaceholderTable::new();
        let a = table.insert(Category::Code, "<pre>a</pre>".to_string());
        let b = table.insert(Category::Code, "<pre>b</pre>".to_string());
        let c = table.insert(Category::Table, "<table></table>".to_string());
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn restore_splices_spans_by_handle() {
        let mut table = PlaceholderTable::new();
        let token = table.insert(Category::Image, "<figure/>".to_string());
        let text = format!("before {token} after");
        assert_eq!(table.restore(&text), "before <figure/> after");
    }

    #[test]
    fn restore_reaches_tokens_nested_in_spans() {
        let mut table = PlaceholderTable::new();
        let inner = table.insert(Category::Image, "<figure/>".to_string());
        let outer = table.insert(Category::Table, format!("<table>{inner}</table>"));
        assert_eq!(table.restore(&outer), "<table><figure/></table>");
    }

    #[test]
    fn restore_leaves_unknown_tokens_alone() {
        let table = PlaceholderTable::new();
        let stray = format!("{MARK_OPEN}tbl:7{MARK_CLOSE}");
        assert_eq!(table.restore(&stray), stray);
    }
}
