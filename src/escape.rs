//! Backslash-escape protection and HTML entity escaping.
//!
//! Escape protection runs before every other stage: each `\X` sequence is
//! replaced with an opaque sentinel token, so the escaped character can never
//! trigger a syntax match downstream. Restoration runs last and substitutes
//! the recorded literals verbatim.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::placeholder::{MARK_CLOSE, MARK_OPEN};

// A backslash escapes exactly one following character on the same line; a
// trailing backslash stays literal. Bare sentinel delimiters in the input are
// lifted into the map as well, mapping to themselves.
static ESCAPE_RE: LazyLock<Regex> =
    lazy_regex!("\\\\(.)|[\u{E000}\u{E001}]", "valid escape regex");

static ESCAPE_TOKEN_RE: LazyLock<Regex> =
    lazy_regex!("\u{E000}e([0-9]+)\u{E001}", "valid escape token regex");

/// Ordered record of the characters lifted out by escape protection.
///
/// The sentinel key is the character's position in insertion order.
#[derive(Debug, Default)]
pub struct EscapeMap {
    chars: Vec<char>,
}

impl EscapeMap {
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn push(&mut self, ch: char) -> String {
        let token = format!("{MARK_OPEN}e{}{MARK_CLOSE}", self.chars.len());
        self.chars.push(ch);
        token
    }
}

/// Replaces every `\X` with a sentinel token recorded in the returned map.
///
/// Literal sentinel delimiter characters in the input are lifted the same
/// way, which is what keeps tokens in the working text unambiguous.
#[must_use]
pub fn protect(source: &str) -> (String, EscapeMap) {
    let mut map = EscapeMap::default();
    let protected = ESCAPE_RE.replace_all(source, |caps: &Captures<'_>| {
        let lifted = match caps.get(1) {
            Some(escaped) => escaped.as_str(),
            None => &caps[0],
        };
        let ch = lifted.chars().next().unwrap_or_default();
        map.push(ch)
    });
    (protected.into_owned(), map)
}

/// Substitutes every sentinel token with its recorded literal, verbatim.
#[must_use]
pub fn restore(text: &str, map: &EscapeMap) -> String {
    ESCAPE_TOKEN_RE
        .replace_all(text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| map.chars.get(index))
                .map_or_else(|| caps[0].to_string(), char::to_string)
        })
        .into_owned()
}

/// Escape text destined for an element body.
#[must_use]
pub fn html_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Escape a value destined for a double-quoted attribute.
#[must_use]
pub fn html_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protect_hides_escaped_characters() {
        let (protected, map) = protect(r"\*not bold\*");
        assert!(!protected.contains('*'));
        assert_eq!(map.len(), 2);
        assert_eq!(restore(&protected, &map), "*not bold*");
    }

    #[test]
    fn trailing_backslash_stays_literal() {
        let (protected, map) = protect("tail\\");
        assert_eq!(protected, "tail\\");
        assert!(map.is_empty());
    }

    #[test]
    fn backslash_does_not_escape_across_lines() {
        let (protected, map) = protect("a\\\nb");
        assert_eq!(protected, "a\\\nb");
        assert!(map.is_empty());
    }

    #[test]
    fn sentinel_delimiters_in_input_are_neutralised() {
        let input = "x\u{E000}code:0\u{E001}y";
        let (protected, map) = protect(input);
        assert_eq!(map.len(), 2);
        // The lifted delimiters come back exactly where they were.
        assert_eq!(restore(&protected, &map), input);
    }

    #[test]
    fn html_text_escapes_angle_brackets() {
        assert_eq!(html_text("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn html_attr_escapes_quotes() {
        assert_eq!(html_attr("say \"hi\""), "say &quot;hi&quot;");
    }
}
