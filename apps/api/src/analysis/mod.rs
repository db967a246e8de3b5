//! Resume Analysis: ATS-style feedback from the text-generation service.
//!
//! Always answers. When the service is unconfigured, fails, or replies with
//! something that is not JSON, the caller gets a static fallback analysis and
//! a `note` saying which fallback was used. A partial answer keeps what the
//! model did provide and fills the gaps with defaults.

pub mod prompts;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::extraction::models::ResumeDocument;
use crate::llm_client::TextGenerator;
use prompts::{ANALYSIS_PROMPT, ANALYSIS_SYSTEM};

const DEFAULT_ATS_SCORE: u32 = 75;
const DEFAULT_KEYWORD_MATCHES: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedTips {
    pub content_keywords: Vec<String>,
    pub format_structure: Vec<String>,
    pub skills_certifications: Vec<String>,
    pub common_mistakes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub ats_score: u32,
    pub keyword_matches: u32,
    pub missing_skills: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub personalized_tips: PersonalizedTips,
    pub analyzed_at: DateTime<Utc>,
}

/// Response body of the analyze endpoint. `status` is always `"success"`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub analysis: ResumeAnalysis,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl AnalysisOutcome {
    fn answered(analysis: ResumeAnalysis) -> Self {
        AnalysisOutcome {
            analysis,
            status: "success",
            note: None,
        }
    }

    fn fallback(reason: Fallback) -> Self {
        AnalysisOutcome {
            analysis: reason.analysis(),
            status: "success",
            note: Some(reason.note()),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Unconfigured,
    MalformedAnswer,
    ServiceError,
}

impl Fallback {
    pub fn note(self) -> &'static str {
        match self {
            Fallback::Unconfigured => "AI service unavailable - using local analysis",
            Fallback::MalformedAnswer => "Analysis completed with fallback due to formatting issues",
            Fallback::ServiceError => "Analysis completed with fallback due to service unavailability",
        }
    }

    pub fn analysis(self) -> ResumeAnalysis {
        let analyzed_at = Utc::now();
        match self {
            Fallback::Unconfigured => ResumeAnalysis {
                ats_score: 78,
                keyword_matches: 14,
                missing_skills: strings(&["Communication", "Project Management", "Data Analysis"]),
                strengths: strings(&[
                    "Professional experience shown",
                    "Educational background included",
                ]),
                improvements: strings(&[
                    "Add quantified achievements with numbers",
                    "Include more industry-specific keywords",
                    "Optimize formatting for ATS systems",
                ]),
                personalized_tips: PersonalizedTips {
                    content_keywords: strings(&[
                        "Research job postings to find relevant keywords to include",
                    ]),
                    format_structure: strings(&[
                        "Use standard section headings like \"Experience\" and \"Education\"",
                    ]),
                    skills_certifications: strings(&[
                        "Consider adding relevant certifications for your field",
                    ]),
                    common_mistakes: strings(&[
                        "Ensure consistent date formatting throughout resume",
                    ]),
                },
                analyzed_at,
            },
            Fallback::MalformedAnswer => ResumeAnalysis {
                ats_score: 72,
                keyword_matches: 10,
                missing_skills: strings(&[
                    "Project Management",
                    "Data Analysis",
                    "Communication Skills",
                ]),
                strengths: strings(&["Professional experience", "Educational background"]),
                improvements: strings(&[
                    "Add quantified achievements",
                    "Include more industry keywords",
                    "Optimize for ATS",
                ]),
                personalized_tips: PersonalizedTips {
                    content_keywords: strings(&[
                        "Add specific technical skills from job postings",
                        "Include quantified results with numbers and percentages",
                    ]),
                    format_structure: strings(&[
                        "Use standard section headings",
                        "Ensure consistent date formatting",
                    ]),
                    skills_certifications: strings(&[
                        "Consider adding relevant certifications",
                        "Highlight technical skills",
                    ]),
                    common_mistakes: strings(&[
                        "Review resume for ATS-friendly formatting",
                        "Avoid using tables or graphics",
                    ]),
                },
                analyzed_at,
            },
            Fallback::ServiceError => ResumeAnalysis {
                ats_score: 75,
                keyword_matches: 12,
                missing_skills: strings(&["Communication", "Project Management", "Problem Solving"]),
                strengths: strings(&["Relevant experience", "Educational qualifications"]),
                improvements: strings(&[
                    "Optimize for ATS systems",
                    "Add quantified achievements",
                    "Include relevant keywords",
                ]),
                personalized_tips: PersonalizedTips {
                    content_keywords: strings(&[
                        "Research job postings for relevant keywords to include",
                    ]),
                    format_structure: strings(&["Use a clean, ATS-friendly format"]),
                    skills_certifications: strings(&["Consider industry-relevant certifications"]),
                    common_mistakes: strings(&["Ensure consistent formatting throughout"]),
                },
                analyzed_at,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt context
// ────────────────────────────────────────────────────────────────────────────

/// Plain-text rendering of a structured resume for prompt context.
pub fn build_ai_context(document: &ResumeDocument, full_text: &str) -> String {
    let mut context = String::from("User's Resume Information:\n");
    let personal = &document.personal;

    if !personal.name.is_empty() {
        context.push_str(&format!("Name: {}\n", personal.name));
    }
    if !personal.email.is_empty() {
        context.push_str(&format!("Email: {}\n", personal.email));
    }
    if !personal.phone.is_empty() {
        context.push_str(&format!("Phone: {}\n", personal.phone));
    }
    if let Some(summary) = &document.summary {
        context.push_str(&format!("Summary: {summary}\n"));
    }

    let skills: Vec<&str> = document
        .skills
        .iter()
        .flat_map(|c| c.items.iter().map(String::as_str))
        .collect();
    if !skills.is_empty() {
        context.push_str(&format!("Skills: {}\n", skills.join(", ")));
    }

    if !document.experience.is_empty() {
        context.push_str("Experience:\n");
        for job in &document.experience {
            context.push_str(&format!(
                "- {} at {} ({} - {})\n",
                job.title, job.company, job.start_date, job.end_date
            ));
        }
    }

    if !document.education.is_empty() {
        context.push_str("Education:\n");
        for edu in &document.education {
            context.push_str(&format!(
                "- {}, {} {}\n",
                edu.degree, edu.institution, edu.graduation_date
            ));
        }
    }

    context.push_str(&format!("\nFull Resume Content:\n{full_text}"));
    context
}

pub fn build_analysis_prompt(document: &ResumeDocument, resume_text: &str) -> String {
    ANALYSIS_PROMPT
        .replace("{resume_context}", &build_ai_context(document, resume_text))
        .replace("{resume_text}", resume_text)
}

// ────────────────────────────────────────────────────────────────────────────
// Answer handling
// ────────────────────────────────────────────────────────────────────────────

fn count_or(value: &Value, default: u32) -> u32 {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|f| f.round() as u64))
        .filter(|n| *n > 0)
        .map(|n| n.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

fn list_or(value: &Value, default: &[&str]) -> Vec<String> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        None => strings(default),
    }
}

/// Builds an analysis from a model answer; fields that are missing or have
/// the wrong shape fall back to defaults one by one.
pub fn analysis_from_answer(answer: &Value) -> ResumeAnalysis {
    let tips = &answer["personalizedTips"];
    ResumeAnalysis {
        ats_score: count_or(&answer["atsScore"], DEFAULT_ATS_SCORE).min(100),
        keyword_matches: count_or(&answer["keywordMatches"], DEFAULT_KEYWORD_MATCHES),
        missing_skills: list_or(
            &answer["missingSkills"],
            &["Communication", "Project Management", "Data Analysis"],
        ),
        strengths: list_or(&answer["strengths"], &["Technical background", "Work experience"]),
        improvements: list_or(
            &answer["improvements"],
            &["Add more keywords", "Quantify achievements"],
        ),
        personalized_tips: PersonalizedTips {
            content_keywords: list_or(
                &tips["contentKeywords"],
                &["Add industry-specific keywords"],
            ),
            format_structure: list_or(&tips["formatStructure"], &["Use consistent formatting"]),
            skills_certifications: list_or(
                &tips["skillsCertifications"],
                &["Consider relevant certifications"],
            ),
            common_mistakes: list_or(
                &tips["commonMistakes"],
                &["Review for typos and formatting"],
            ),
        },
        analyzed_at: Utc::now(),
    }
}

/// Runs one analysis. Never fails; see the module docs for the fallbacks.
pub async fn analyze_resume(
    generator: Option<&dyn TextGenerator>,
    document: &ResumeDocument,
    resume_text: &str,
) -> AnalysisOutcome {
    let Some(generator) = generator else {
        warn!("No text-generation backend configured, serving local analysis");
        return AnalysisOutcome::fallback(Fallback::Unconfigured);
    };

    let prompt = build_analysis_prompt(document, resume_text);
    match generator.generate_json(&prompt, ANALYSIS_SYSTEM).await {
        Ok(answer) if answer.is_object() => {
            info!("Resume analysis completed ({} chars)", resume_text.len());
            AnalysisOutcome::answered(analysis_from_answer(&answer))
        }
        Ok(_) => {
            warn!("Analysis answer was JSON but not an object");
            AnalysisOutcome::fallback(Fallback::MalformedAnswer)
        }
        Err(e) if e.is_malformed_answer() => {
            warn!("Analysis answer could not be parsed: {e}");
            AnalysisOutcome::fallback(Fallback::MalformedAnswer)
        }
        Err(e) => {
            warn!("Analysis call failed: {e}");
            AnalysisOutcome::fallback(Fallback::ServiceError)
        }
    }
}
