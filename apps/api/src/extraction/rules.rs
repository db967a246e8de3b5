//! Ordered line rules shared by the entry parsers.
//!
//! Each parser declares a table of `LineRule`s; the first rule whose predicate
//! accepts a line decides the action. Tables are plain data, so every rule can
//! be tested on its own and reordering is a one-line change.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

#[derive(Clone, Copy)]
pub struct LineRule<A: Copy> {
    pub name: &'static str,
    pub predicate: fn(&str) -> bool,
    pub action: A,
}

/// First matching rule for a trimmed line.
pub fn classify<A: Copy>(rules: &[LineRule<A>], line: &str) -> Option<LineRule<A>> {
    let rule = rules.iter().copied().find(|rule| (rule.predicate)(line));
    trace!(rule = rule.map(|r| r.name), chars = line.len(), "Classified line");
    rule
}

static BULLET_GLYPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•·▪◦‣*\-]\s*").unwrap());

pub fn starts_with_bullet(line: &str) -> bool {
    BULLET_GLYPH.is_match(line)
}

/// Removes a leading bullet glyph and the whitespace after it.
pub fn strip_bullet(line: &str) -> &str {
    match BULLET_GLYPH.find(line) {
        Some(m) => line[m.end()..].trim_end(),
        None => line.trim(),
    }
}

/// Builds a case-insensitive whole-word matcher for a keyword list.
pub fn word_set(words: &[&str]) -> Regex {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).unwrap()
}

/// Trimmed, non-empty lines of a section.
pub fn content_lines(section: &str) -> impl Iterator<Item = &str> {
    section.lines().map(str::trim).filter(|line| !line.is_empty())
}
