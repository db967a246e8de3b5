//! Date recognition for entry header lines.
//!
//! Resumes write dates many ways: `2019`, `06/2020`, `Jan 2020`, `Summer 2021`,
//! `September 2018 - Present`. Tokens are reported in reading order and kept
//! verbatim so the structured output never reformats what the author wrote.

use once_cell::sync::Lazy;
use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const SEASON: &str = r"(?:winter|spring|summer|fall|autumn)";
const OPEN_END: &str = r"(?:present|current)";

static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{MONTH}\s+\d{{4}}|{SEASON}\s+\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}}|{OPEN_END})\b"
    ))
    .unwrap()
});

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let point = format!(r"(?:{MONTH}\s+\d{{4}}|{SEASON}\s+\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}})");
    Regex::new(&format!(
        r"(?i)\b{point}\s*(?:-|to)\s*(?:{point}|{OPEN_END})\b"
    ))
    .unwrap()
});

static OPEN_END_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"(?i)^{OPEN_END}$")).unwrap());

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").unwrap());

/// Start and end dates as written in the source line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSpan {
    pub start: String,
    pub end: String,
}

/// All date tokens in reading order.
pub fn date_tokens(text: &str) -> Vec<&str> {
    DATE_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn contains_year(text: &str) -> bool {
    YEAR.is_match(text)
}

fn is_open_end(token: &str) -> bool {
    OPEN_END_TOKEN.is_match(token)
}

/// First dated token is the start, last token (which may be `Present`) the end.
/// A lone `Present` yields no start.
pub fn date_span(text: &str) -> DateSpan {
    let tokens = date_tokens(text);
    let start = tokens
        .iter()
        .find(|t| !is_open_end(t))
        .map(|t| t.to_string())
        .unwrap_or_default();
    let end = tokens.last().map(|t| t.to_string()).unwrap_or_default();
    DateSpan { start, end }
}

/// Last dated token, ignoring open ends. Used for graduation dates.
pub fn last_date(text: &str) -> String {
    date_tokens(text)
        .into_iter()
        .filter(|t| !is_open_end(t))
        .last()
        .map(str::to_string)
        .unwrap_or_default()
}

/// Removes date ranges and stray date tokens so the remainder can be read as
/// title/company text.
pub fn strip_dates(text: &str) -> String {
    let without_ranges = DATE_RANGE.replace_all(text, " ");
    let without_tokens = DATE_TOKEN.replace_all(&without_ranges, |caps: &regex::Captures| {
        if is_open_end(&caps[0]) {
            // "Present" on its own is only a date next to another date
            caps[0].to_string()
        } else {
            " ".to_string()
        }
    });
    without_tokens.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the text holds dates and nothing else but separators.
pub fn is_date_only(text: &str) -> bool {
    if date_tokens(text).is_empty() {
        return false;
    }
    let remainder = DATE_TOKEN.replace_all(text, " ");
    !remainder
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| !word.is_empty() && !word.eq_ignore_ascii_case("to"))
}
