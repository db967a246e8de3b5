use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::models::PersonalInfo;
use crate::extraction::rules::content_lines;

const NAME_CANDIDATE_LINES: usize = 3;
const LOCATION_CANDIDATE_LINES: usize = 5;
const MAX_SYMBOL_RATIO: f64 = 0.2;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
// each alternative starts on a word boundary so digits inside "2019-2022" never match
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\(\d{3}\)\s?\d{3}|\b\d{3}[-.\s]?\d{3}|\b\d{3})[-.\s]?\d{4}\b").unwrap()
});
static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[a-zA-Z0-9_-]+").unwrap());
static CITY_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*, [A-Z]{2}\b").unwrap());

fn looks_like_name(line: &str) -> bool {
    let words = line.split_whitespace().count();
    let len = line.chars().count();
    if !(2..=4).contains(&words) || !(3..=80).contains(&len) {
        return false;
    }
    let symbols = line
        .chars()
        .filter(|c| !c.is_alphabetic() && !c.is_whitespace())
        .count();
    (symbols as f64) / (len as f64) < MAX_SYMBOL_RATIO
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().trim().to_string())
}

/// Pulls contact details out of normalized resume text. Never fails; fields
/// that were not found stay empty (or `None` for the optional ones).
pub fn extract_personal(text: &str) -> PersonalInfo {
    let name = content_lines(text)
        .take(NAME_CANDIDATE_LINES)
        .find(|line| looks_like_name(line))
        .unwrap_or_default()
        .to_string();

    let location = content_lines(text)
        .take(LOCATION_CANDIDATE_LINES)
        .find_map(|line| first_match(&CITY_STATE, line));

    PersonalInfo {
        name,
        email: first_match(&EMAIL, text).unwrap_or_default(),
        phone: first_match(&PHONE, text).unwrap_or_default(),
        linkedin: first_match(&LINKEDIN, text),
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_block() {
        let info = extract_personal(
            "Jane Doe\njane@x.com\n(555) 123-4567\nlinkedin.com/in/jane-doe\nAustin, TX",
        );
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.email, "jane@x.com");
        assert_eq!(info.phone, "(555) 123-4567");
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(info.location.as_deref(), Some("Austin, TX"));
    }

    #[test]
    fn test_name_skips_lines_that_are_not_names() {
        let info = extract_personal("RESUME\nMary Ann Smith\nmary@example.org");
        assert_eq!(info.name, "Mary Ann Smith");
    }

    #[test]
    fn test_name_must_appear_in_first_three_lines() {
        let info = extract_personal("CV\njane@x.com\n555.123.4567\nJane Doe");
        assert_eq!(info.name, "");
    }

    #[test]
    fn test_symbol_heavy_line_is_not_a_name() {
        assert!(!looks_like_name("jane@x.com | 555-123-4567"));
        assert!(looks_like_name("Jean-Luc Picard"));
    }

    #[test]
    fn test_phone_without_area_code_separators() {
        assert_eq!(extract_personal("call 555.123.4567 now").phone, "555.123.4567");
    }

    #[test]
    fn test_unseparated_ten_digit_phone() {
        assert_eq!(extract_personal("Jane Doe\nPhone: 5551234567").phone, "5551234567");
        assert_eq!(extract_personal("Jane Doe\n555-123-4567").phone, "555-123-4567");
    }

    #[test]
    fn test_seven_digit_phone() {
        assert_eq!(extract_personal("tel 123-4567").phone, "123-4567");
    }

    #[test]
    fn test_year_ranges_are_not_phones() {
        assert_eq!(extract_personal("Engineer 2019-2022").phone, "");
        assert_eq!(extract_personal("Engineer 2019 - 2022").phone, "");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_personal(""), PersonalInfo::default());
    }
}
