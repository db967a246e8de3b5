use serde::{Deserialize, Serialize};

/// Category assigned to skill lines that carry no `Category:` label.
pub const DEFAULT_SKILL_CATEGORY: &str = "Technical Skills";

/// Contact block pulled from the top of the resume.
///
/// Empty strings mean "not found". The two optional fields are absent rather
/// than empty when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Original wording, one element per source line, bullet glyph stripped.
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coursework: Option<Vec<String>>,
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub id: String,
    pub category: String,
    /// Source order, duplicates kept.
    pub items: Vec<String>,
}

/// Structured view of one uploaded resume.
///
/// Produced fresh per upload by [`crate::extraction::extract_resume`]. Edits
/// replace sub-fields wholesale; there is no history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<JobEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full normalized text. Keeps projects, certifications and anything
    /// else the parsers do not model.
    #[serde(default)]
    pub raw_extracted_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = ResumeDocument {
            experience: vec![JobEntry {
                id: "job_0".to_string(),
                title: "Engineer".to_string(),
                start_date: "2019".to_string(),
                raw_text: "Engineer 2019".to_string(),
                ..Default::default()
            }],
            raw_extracted_text: "Engineer 2019".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["rawExtractedText"], "Engineer 2019");
        assert_eq!(json["experience"][0]["startDate"], "2019");
        assert_eq!(json["experience"][0]["rawText"], "Engineer 2019");
        assert!(json["experience"][0].get("location").is_none());
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_personal_fields_default_to_empty_strings() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"personal": {}}"#).unwrap();
        assert_eq!(doc.personal.name, "");
        assert_eq!(doc.personal.email, "");
        assert!(doc.personal.linkedin.is_none());
        assert!(doc.experience.is_empty());
    }
}
