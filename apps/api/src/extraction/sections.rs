//! Section Locator: finds the span of lines under a heading banner.
//!
//! A banner is any short line (< 50 chars) containing one of the section's
//! keywords. The span runs from the line after the banner to the next short
//! line naming a different section. Unconventional headings simply leave the
//! section absent.

const MAX_BANNER_LEN: usize = 50;
const MIN_BANNER_LEN: usize = 2;

/// Keywords that terminate any section span.
pub const SECTION_UNIVERSE: &[&str] = &[
    "experience",
    "education",
    "skills",
    "summary",
    "projects",
    "certifications",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Summary,
}

impl SectionKind {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Experience => &["experience", "employment", "work history", "professional"],
            SectionKind::Education => &["education", "academic", "degree"],
            SectionKind::Skills => &["skills", "technical", "competencies"],
            SectionKind::Summary => &["summary", "profile", "objective", "overview"],
        }
    }
}

/// Line range `[start, end)` of a located section plus its joined text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

/// Locates the span for a keyword set. `None` when no banner matched.
pub fn locate_span(text: &str, keywords: &[&str]) -> Option<SectionSpan> {
    let lines: Vec<&str> = text.split('\n').collect();

    let banner = lines.iter().position(|line| {
        let line = line.trim().to_lowercase();
        line.len() < MAX_BANNER_LEN && keywords.iter().any(|k| line.contains(k))
    })?;
    let start_line = banner + 1;

    let end_line = lines
        .iter()
        .enumerate()
        .skip(start_line)
        .find(|(_, line)| {
            let line = line.trim().to_lowercase();
            line.len() < MAX_BANNER_LEN
                && line.len() > MIN_BANNER_LEN
                && SECTION_UNIVERSE
                    .iter()
                    .any(|k| line.contains(k) && !keywords.contains(k))
        })
        .map(|(i, _)| i)
        .unwrap_or(lines.len());

    Some(SectionSpan {
        start_line,
        end_line,
        text: lines[start_line..end_line].join("\n").trim().to_string(),
    })
}

/// Text of a section, or `None` when the section is absent or empty.
pub fn locate_section(text: &str, keywords: &[&str]) -> Option<String> {
    locate_span(text, keywords)
        .map(|span| span.text)
        .filter(|text| !text.is_empty())
}

pub fn find_section(text: &str, kind: SectionKind) -> Option<String> {
    locate_section(text, kind.keywords())
}
