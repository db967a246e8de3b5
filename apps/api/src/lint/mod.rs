// Resume linting
// Fixed rubric over a ResumeDocument: deductions from 100, one issue per finding.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extraction::models::{JobEntry, ResumeDocument};

pub const MAX_SCORE: u32 = 100;
const MIN_SUMMARY_LEN: usize = 50;

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSection {
    Personal,
    Experience,
    Skills,
    Education,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    pub severity: Severity,
    pub section: LintSection,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
    pub score: u32,
    pub summary: String,
}

/// Accumulates issues and the deductions they carry.
#[derive(Debug, Default)]
struct Rubric {
    issues: Vec<LintIssue>,
    deducted: u32,
}

impl Rubric {
    fn flag(
        &mut self,
        points: u32,
        severity: Severity,
        section: LintSection,
        message: impl Into<String>,
        suggestion: &str,
    ) {
        self.deducted += points;
        self.issues.push(LintIssue {
            severity,
            section,
            message: message.into(),
            suggestion: Some(suggestion.to_string()),
        });
    }

    fn personal(&mut self, doc: &ResumeDocument) {
        let personal = &doc.personal;
        if personal.name.trim().is_empty() {
            self.flag(
                20,
                Severity::Error,
                LintSection::Personal,
                "Name is missing",
                "Add your full name at the top of your resume",
            );
        }
        if personal.email.trim().is_empty() {
            self.flag(
                15,
                Severity::Error,
                LintSection::Personal,
                "Email address is missing",
                "Add a professional email address",
            );
        }
        if personal.phone.trim().is_empty() {
            self.flag(
                5,
                Severity::Warning,
                LintSection::Personal,
                "Phone number is missing",
                "Consider adding your phone number for direct contact",
            );
        }
    }

    fn experience(&mut self, jobs: &[JobEntry]) {
        if jobs.is_empty() {
            self.flag(
                30,
                Severity::Error,
                LintSection::Experience,
                "No work experience found",
                "Add your work experience with job titles, companies, and dates",
            );
            return;
        }

        for (i, job) in jobs.iter().enumerate() {
            let n = i + 1;
            match job.bullets.len() {
                0 => self.flag(
                    10,
                    Severity::Warning,
                    LintSection::Experience,
                    format!("Job {n}: No bullet points describing achievements"),
                    "Add 2-4 bullet points highlighting your key achievements and responsibilities",
                ),
                1 => self.flag(
                    5,
                    Severity::Info,
                    LintSection::Experience,
                    format!("Job {n}: Only 1 bullet point"),
                    "Consider adding more bullet points to better showcase your impact",
                ),
                _ => {}
            }
            // a job without bullets has no numbers either
            if !job.bullets.iter().any(|b| DIGIT.is_match(b)) {
                self.flag(
                    3,
                    Severity::Info,
                    LintSection::Experience,
                    format!("Job {n}: No quantified achievements"),
                    "Add numbers, percentages, or metrics to demonstrate your impact",
                );
            }
        }
    }

    fn remaining_sections(&mut self, doc: &ResumeDocument) {
        if doc.skills.is_empty() {
            self.flag(
                15,
                Severity::Warning,
                LintSection::Skills,
                "No skills section found",
                "Add a skills section with relevant technical and professional skills",
            );
        }
        if doc.education.is_empty() {
            self.flag(
                5,
                Severity::Info,
                LintSection::Education,
                "No education information found",
                "Consider adding your educational background if relevant to the role",
            );
        }
        let summary_len = doc.summary.as_deref().map_or(0, |s| s.trim().len());
        if summary_len < MIN_SUMMARY_LEN {
            self.flag(
                5,
                Severity::Info,
                LintSection::Summary,
                "Professional summary is missing or too short",
                "Add a 2-3 sentence professional summary highlighting your key strengths",
            );
        }
    }

    fn report(self) -> LintReport {
        let score = MAX_SCORE.saturating_sub(self.deducted);
        LintReport {
            summary: format!(
                "Resume scored {score}/100. Found {} issues to address.",
                self.issues.len()
            ),
            issues: self.issues,
            score,
        }
    }
}

/// Scores a document against the fixed rubric. Deterministic and I/O free.
pub fn lint_resume(doc: &ResumeDocument) -> LintReport {
    let mut rubric = Rubric::default();
    rubric.personal(doc);
    rubric.experience(&doc.experience);
    rubric.remaining_sections(doc);
    rubric.report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract_resume;
    use crate::extraction::models::{EducationEntry, PersonalInfo, SkillCategory};
    use proptest::prelude::*;

    fn job(bullets: &[&str]) -> JobEntry {
        JobEntry {
            id: "job_0".into(),
            title: "Engineer".into(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        }
    }

    fn complete() -> ResumeDocument {
        ResumeDocument {
            personal: PersonalInfo {
                name: "Jane Doe".into(),
                email: "jane@x.com".into(),
                phone: "555-123-4567".into(),
                ..Default::default()
            },
            experience: vec![job(&["Cut costs 30%", "Hired 4 engineers"])],
            education: vec![EducationEntry {
                id: "edu_0".into(),
                degree: "BS".into(),
                ..Default::default()
            }],
            skills: vec![SkillCategory {
                id: "skill_0".into(),
                category: "Languages".into(),
                items: vec!["Rust".into()],
            }],
            summary: Some("Backend engineer with a decade of experience in payments and reliability.".into()),
            raw_extracted_text: String::new(),
        }
    }

    #[test]
    fn test_complete_resume_scores_full() {
        let report = lint_resume(&complete());
        assert_eq!(report.score, 100);
        assert!(report.issues.is_empty());
        assert_eq!(report.summary, "Resume scored 100/100. Found 0 issues to address.");
    }

    #[test]
    fn test_example_resume_score() {
        let doc = extract_resume(
            "Jane Doe\njane@x.com\n(555) 123-4567\n\nEXPERIENCE\nSoftware Engineer | Acme Corp | 2019-2022\nBuilt scalable systems serving 1M users\n\nEDUCATION\nBS Computer Science, State University, 2019",
        );
        let report = lint_resume(&doc);
        // one bullet (-5), no skills (-15), no summary (-5)
        assert_eq!(report.score, 75);
        let messages: Vec<_> = report.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Job 1: Only 1 bullet point",
                "No skills section found",
                "Professional summary is missing or too short",
            ]
        );
    }

    #[test]
    fn test_empty_resume() {
        let report = lint_resume(&extract_resume(""));
        assert_eq!(report.score, 5);
        assert_eq!(report.issues.len(), 7);
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message == "No work experience found"));
        assert_eq!(report.summary, "Resume scored 5/100. Found 7 issues to address.");
    }

    #[test]
    fn test_job_without_bullets_loses_both_deductions() {
        let mut doc = complete();
        doc.experience = vec![job(&[])];
        let report = lint_resume(&doc);
        assert_eq!(report.score, 87);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_unquantified_bullets() {
        let mut doc = complete();
        doc.experience.push(job(&["Led the team", "Owned on-call"]));
        let report = lint_resume(&doc);
        assert_eq!(report.score, 97);
        assert_eq!(report.issues[0].message, "Job 2: No quantified achievements");
    }

    #[test]
    fn test_short_summary_flagged() {
        let mut doc = complete();
        doc.summary = Some("Engineer.".into());
        assert_eq!(lint_resume(&doc).score, 95);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut doc = ResumeDocument::default();
        doc.experience = (0..10).map(|_| job(&[])).collect();
        assert_eq!(lint_resume(&doc).score, 0);
    }

    #[test]
    fn test_issue_serialization() {
        let report = lint_resume(&ResumeDocument::default());
        let json = serde_json::to_value(&report.issues[0]).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["section"], "personal");
    }

    fn any_document() -> impl Strategy<Value = ResumeDocument> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,12}", 0..4), 0..12),
            any::<bool>(),
            any::<bool>(),
            prop::option::of("[a-z ]{0,80}"),
        )
            .prop_map(|(name, email, phone, jobs, skills, edu, summary)| {
                let mut doc = complete();
                if !name {
                    doc.personal.name.clear();
                }
                if !email {
                    doc.personal.email.clear();
                }
                if !phone {
                    doc.personal.phone.clear();
                }
                doc.experience = jobs
                    .into_iter()
                    .map(|bullets| JobEntry {
                        id: "job".into(),
                        title: "Engineer".into(),
                        bullets,
                        ..Default::default()
                    })
                    .collect();
                if !skills {
                    doc.skills.clear();
                }
                if !edu {
                    doc.education.clear();
                }
                doc.summary = summary;
                doc
            })
    }

    proptest! {
        #[test]
        fn prop_score_in_bounds(doc in any_document()) {
            let report = lint_resume(&doc);
            prop_assert!(report.score <= MAX_SCORE);
            prop_assert_eq!(lint_resume(&doc), report);
        }

        #[test]
        fn prop_filling_a_field_never_lowers_score(doc in any_document()) {
            let before = lint_resume(&doc).score;
            let mut filled = doc.clone();
            filled.personal.email = "jane@x.com".into();
            filled.personal.name = "Jane Doe".into();
            filled.personal.phone = "555-123-4567".into();
            filled.summary = complete().summary;
            prop_assert!(lint_resume(&filled).score >= before);

            let mut emptied = doc;
            emptied.personal.email.clear();
            prop_assert!(lint_resume(&emptied).score <= before);
        }
    }
}
