//! Positioned-text reflow: rebuilds reading-order lines from PDF text runs.
//!
//! PDF text layers hand back runs in arbitrary order with bottom-left origin
//! coordinates. Runs are bucketed by baseline (2-unit granularity absorbs
//! float jitter), buckets are read top to bottom, and each line is joined
//! left to right with spacing inferred from the horizontal gap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const BASELINE_BUCKET: f64 = 2.0;
const WORD_GAP: f64 = 5.0;
const COLUMN_GAP: f64 = 30.0;
const COLUMN_BREAK: &str = "   ";

/// One run of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Rendered width. Unknown widths fall back to a single space before the next run.
    #[serde(default)]
    pub width: Option<f64>,
}

/// A text item in the shape pdf.js `getTextContent()` emits.
/// Only `transform[4]` (x) and `transform[5]` (y) are used.
#[derive(Debug, Clone, Deserialize)]
pub struct PdfTextItem {
    #[serde(rename = "str")]
    pub text: String,
    pub transform: [f64; 6],
    #[serde(default)]
    pub width: Option<f64>,
}

impl From<PdfTextItem> for TextRun {
    fn from(item: PdfTextItem) -> Self {
        TextRun {
            text: item.text,
            x: item.transform[4],
            y: item.transform[5],
            width: item.width,
        }
    }
}

fn baseline_key(y: f64) -> i64 {
    (y / BASELINE_BUCKET).round() as i64
}

/// Reflows a single page. A page without runs yields an empty string.
pub fn reflow_page(runs: &[TextRun]) -> String {
    let mut lines: BTreeMap<i64, Vec<&TextRun>> = BTreeMap::new();
    for run in runs {
        lines.entry(baseline_key(run.y)).or_default().push(run);
    }

    lines
        .into_values()
        .rev()
        .filter_map(|mut line| {
            // stable: equal x keeps input order
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            let text = join_line(&line);
            (!text.is_empty()).then_some(text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reflows every page and separates pages with a blank line.
pub fn reflow_pages(pages: &[Vec<TextRun>]) -> String {
    pages
        .iter()
        .map(|runs| reflow_page(runs))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn join_line(runs: &[&TextRun]) -> String {
    let mut line = String::new();
    // end of the previous run; `None` before the first run or after a run of unknown width
    let mut last_end: Option<f64> = None;

    for run in runs {
        let text = run.text.trim();
        if text.is_empty() {
            continue;
        }
        if !line.is_empty() {
            match last_end.map(|end| run.x - end) {
                Some(gap) if gap > COLUMN_GAP => line.push_str(COLUMN_BREAK),
                Some(gap) if gap <= WORD_GAP => {}
                _ if line.ends_with(char::is_whitespace) => {}
                _ => line.push(' '),
            }
        }
        line.push_str(text);
        last_end = run.width.map(|width| run.x + width);
    }

    line.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: f64, y: f64, width: f64) -> TextRun {
        TextRun {
            text: text.to_string(),
            x,
            y,
            width: Some(width),
        }
    }

    #[test]
    fn test_words_on_one_baseline_get_single_spaces() {
        let runs = vec![
            run("Bachelor", 0.0, 100.0, 50.0),
            run("of", 60.0, 100.0, 12.0),
            run("Science", 90.0, 100.0, 45.0),
        ];
        assert_eq!(reflow_page(&runs), "Bachelor of Science");
    }

    #[test]
    fn test_wide_gap_becomes_column_break() {
        let runs = vec![
            run("Jane Doe", 0.0, 700.0, 60.0),
            run("jane@x.com", 300.0, 700.0, 70.0),
        ];
        assert_eq!(reflow_page(&runs), "Jane Doe   jane@x.com");
    }

    #[test]
    fn test_tight_gap_concatenates() {
        let runs = vec![run("Engin", 0.0, 10.0, 30.0), run("eer", 32.0, 10.0, 18.0)];
        assert_eq!(reflow_page(&runs), "Engineer");
    }

    #[test]
    fn test_lines_read_top_to_bottom_and_left_to_right() {
        let runs = vec![
            run("second", 0.0, 80.0, 40.0),
            run("line", 50.0, 80.0, 25.0),
            run("first", 0.0, 100.0, 30.0),
        ];
        assert_eq!(reflow_page(&runs), "first\nsecond line");
    }

    #[test]
    fn test_baseline_jitter_is_merged() {
        let runs = vec![
            run("Senior", 0.0, 100.4, 40.0),
            run("Engineer", 50.0, 99.6, 55.0),
        ];
        assert_eq!(reflow_page(&runs), "Senior Engineer");
    }

    #[test]
    fn test_blank_runs_are_skipped() {
        let runs = vec![
            run("  ", 0.0, 100.0, 10.0),
            run("Skills", 20.0, 100.0, 30.0),
            run("", 0.0, 50.0, 0.0),
        ];
        assert_eq!(reflow_page(&runs), "Skills");
    }

    #[test]
    fn test_empty_page_is_empty_string() {
        assert_eq!(reflow_page(&[]), "");
    }

    #[test]
    fn test_pages_are_separated_by_blank_line() {
        let pages = vec![
            vec![run("Page", 0.0, 10.0, 25.0), run("one", 35.0, 10.0, 20.0)],
            vec![run("Page two", 0.0, 10.0, 50.0)],
        ];
        assert_eq!(reflow_pages(&pages), "Page one\n\nPage two");
    }

    #[test]
    fn test_pdf_item_uses_translation_components() {
        let item: PdfTextItem = serde_json::from_str(
            r#"{"str": "Education", "transform": [12, 0, 0, 12, 72.5, 640], "width": 58.2}"#,
        )
        .unwrap();
        let run = TextRun::from(item);
        assert_eq!(run.text, "Education");
        assert_eq!(run.x, 72.5);
        assert_eq!(run.y, 640.0);
        assert_eq!(run.width, Some(58.2));
    }

    #[test]
    fn test_runs_without_width_get_single_spaces() {
        let items: Vec<PdfTextItem> = serde_json::from_str(
            r#"[
                {"str": "Bachelor", "transform": [1, 0, 0, 1, 0, 100]},
                {"str": "of", "transform": [1, 0, 0, 1, 60, 100]},
                {"str": "Science", "transform": [1, 0, 0, 1, 90, 100]}
            ]"#,
        )
        .unwrap();
        let runs: Vec<TextRun> = items.into_iter().map(TextRun::from).collect();
        assert!(runs.iter().all(|r| r.width.is_none()));
        assert_eq!(reflow_page(&runs), "Bachelor of Science");
    }

    #[test]
    fn test_unknown_width_only_affects_the_following_gap() {
        let mut runs = vec![
            run("Jane", 0.0, 700.0, 30.0),
            run("Doe", 40.0, 700.0, 0.0),
            run("jane@x.com", 300.0, 700.0, 70.0),
        ];
        runs[0].width = None;
        assert_eq!(reflow_page(&runs), "Jane Doe   jane@x.com");
    }
}
