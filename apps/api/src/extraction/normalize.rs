use once_cell::sync::Lazy;
use regex::Regex;

// printf-style artifacts (`%5`, `%B`) that some PDF producers leave in the text layer
static FORMAT_ARTIFACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[a-zA-Z0-9]").unwrap());
static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static LINE_BREAK_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s+").unwrap());

/// Cleans raw extracted text into the form every later stage expects.
///
/// Anything outside printable ASCII (other than `\n`) becomes a space, runs of
/// spaces collapse, indentation and blank lines after a line break disappear,
/// and the result is trimmed. Total and pure.
pub fn normalize_text(raw: &str) -> String {
    let text = FORMAT_ARTIFACT.replace_all(raw, " ");
    let printable: String = text
        .chars()
        .map(|c| match c {
            '\n' | ' '..='~' => c,
            _ => ' ',
        })
        .collect();
    let collapsed = HORIZONTAL_SPACE.replace_all(&printable, " ");
    let unindented = LINE_BREAK_INDENT.replace_all(&collapsed, "\n");
    unindented.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_ascii_becomes_space() {
        assert_eq!(normalize_text("Café • Bar"), "Caf Bar");
    }

    #[test]
    fn test_collapses_spaces_and_tabs() {
        assert_eq!(normalize_text("a  \t b"), "a b");
    }

    #[test]
    fn test_removes_indentation_and_blank_lines() {
        assert_eq!(
            normalize_text("EXPERIENCE\n\n   Engineer\n\t- Built things"),
            "EXPERIENCE\nEngineer\n- Built things"
        );
    }

    #[test]
    fn test_carriage_returns_do_not_survive_as_control_bytes() {
        let out = normalize_text("Line one\r\nLine two");
        assert!(!out.contains('\r'));
        assert_eq!(out, "Line one \nLine two");
    }

    #[test]
    fn test_strips_format_artifacts() {
        assert_eq!(normalize_text("Skills%B list"), "Skills list");
    }

    #[test]
    fn test_trims_whole_result() {
        assert_eq!(normalize_text("\n\n  Jane Doe  \n\n"), "Jane Doe");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
    }
}
