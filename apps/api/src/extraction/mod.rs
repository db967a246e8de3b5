// Resume extraction pipeline
// Implements: positioned-text reflow, normalization, section location, entry parsers, contact info.
// Pure and synchronous: no I/O, so handlers call it inline.

pub mod dates;
pub mod education;
pub mod experience;
pub mod models;
pub mod normalize;
pub mod personal;
pub mod reflow;
pub mod rules;
pub mod sections;
pub mod skills;

use tracing::debug;

pub use models::ResumeDocument;
pub use normalize::normalize_text;
pub use reflow::{reflow_pages, PdfTextItem, TextRun};

use education::parse_education_entries;
use experience::parse_job_entries;
use personal::extract_personal;
use sections::{find_section, SectionKind};
use skills::parse_skill_categories;

/// Runs the full pipeline over raw extracted text.
///
/// Missing sections and fields come back empty; nothing here fails.
pub fn extract_resume(raw: &str) -> ResumeDocument {
    let text = normalize_text(raw);

    let experience = find_section(&text, SectionKind::Experience)
        .map(|s| parse_job_entries(&s))
        .unwrap_or_default();
    let education = find_section(&text, SectionKind::Education)
        .map(|s| parse_education_entries(&s))
        .unwrap_or_default();
    let skills = find_section(&text, SectionKind::Skills)
        .map(|s| parse_skill_categories(&s))
        .unwrap_or_default();
    let summary = find_section(&text, SectionKind::Summary);

    debug!(
        jobs = experience.len(),
        education = education.len(),
        skills = skills.len(),
        has_summary = summary.is_some(),
        "Structured resume text ({} chars)",
        text.len()
    );

    ResumeDocument {
        personal: extract_personal(&text),
        experience,
        education,
        skills,
        summary,
        raw_extracted_text: text,
    }
}

/// Reflows positioned PDF runs into text, then structures it.
pub fn extract_from_pages(pages: &[Vec<TextRun>]) -> (String, ResumeDocument) {
    let text = reflow_pages(pages);
    let document = extract_resume(&text);
    (text, document)
}
