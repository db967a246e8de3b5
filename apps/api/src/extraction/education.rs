//! Education entry parser.
//!
//! Same fold shape as the job parser. A header names a degree, an institution,
//! or both; when a resume puts them on consecutive lines the second line
//! completes the first entry instead of opening a new one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::dates::{is_date_only, last_date, strip_dates};
use crate::extraction::models::EducationEntry;
use crate::extraction::rules::{classify, content_lines, word_set, LineRule};

const MIN_DETAIL_LEN: usize = 5;
const MAX_BANNER_LEN: usize = 20;

static DEGREE_WORDS: Lazy<Regex> = Lazy::new(|| {
    word_set(&[
        "Bachelor",
        "Bachelors",
        "Master",
        "Masters",
        "PhD",
        "Doctorate",
        "Associate",
        "Certificate",
        "Diploma",
        "BS",
        "BSc",
        "BA",
        "MSc",
        "MBA",
    ])
});

static INSTITUTION_WORDS: Lazy<Regex> =
    Lazy::new(|| word_set(&["University", "College", "Institute", "School", "Academy"]));

static HONORS_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)honor|cum laude|dean's list").unwrap());

static SECTION_BANNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:education|academic)\b").unwrap());

/// `Riverside, CA` style location.
static CITY_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Za-z]+(?: [A-Z][A-Za-z]+)*, ?[A-Z]{2})\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationAction {
    Skip,
    Open,
    AttachDate,
    Detail,
}

fn is_section_banner(line: &str) -> bool {
    line.len() < MAX_BANNER_LEN && SECTION_BANNER.is_match(line)
}

fn opens_entry(line: &str) -> bool {
    DEGREE_WORDS.is_match(line) || INSTITUTION_WORDS.is_match(line)
}

fn is_detail(line: &str) -> bool {
    line.len() > MIN_DETAIL_LEN
}

pub const EDUCATION_RULES: &[LineRule<EducationAction>] = &[
    LineRule {
        name: "section-banner",
        predicate: is_section_banner,
        action: EducationAction::Skip,
    },
    LineRule {
        name: "header",
        predicate: opens_entry,
        action: EducationAction::Open,
    },
    LineRule {
        name: "date-only",
        predicate: is_date_only,
        action: EducationAction::AttachDate,
    },
    LineRule {
        name: "detail",
        predicate: is_detail,
        action: EducationAction::Detail,
    },
];

fn clean_segment(text: &str) -> String {
    strip_dates(text)
        .trim_matches(|c: char| c.is_whitespace() || ",|;-()".contains(c))
        .to_string()
}

/// Fields read from one header line.
#[derive(Debug, Default, PartialEq, Eq)]
struct EducationHeader {
    degree: String,
    institution: String,
    location: Option<String>,
    graduation_date: String,
}

impl EducationHeader {
    fn parse(line: &str) -> Self {
        let location = CITY_STATE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        // the location's own comma would otherwise split it into segments
        let body = match &location {
            Some(loc) => line.replacen(loc.as_str(), "", 1),
            None => line.to_string(),
        };

        let segments: Vec<&str> = body
            .split([',', '|'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let institution_at = segments.iter().position(|s| INSTITUTION_WORDS.is_match(s));
        let degree_at = segments
            .iter()
            .enumerate()
            .position(|(i, s)| Some(i) != institution_at && DEGREE_WORDS.is_match(s));

        let institution = institution_at
            .map(|i| clean_segment(segments[i]))
            .unwrap_or_default();
        let degree = match (degree_at, institution_at) {
            (Some(i), _) => clean_segment(segments[i]),
            (None, Some(i)) if i > 0 => match body.find(segments[i]) {
                Some(offset) => clean_segment(&body[..offset]),
                None => String::new(),
            },
            (None, Some(_)) => String::new(),
            (None, None) => clean_segment(&body),
        };

        EducationHeader {
            degree,
            institution,
            location,
            graduation_date: last_date(line),
        }
    }
}

#[derive(Debug, Default)]
struct EducationDraft {
    degree: String,
    institution: String,
    location: Option<String>,
    graduation_date: String,
    gpa: Option<String>,
    honors: Option<String>,
    coursework: Vec<String>,
    raw_lines: Vec<String>,
}

impl EducationDraft {
    fn new(header: EducationHeader, line: &str) -> Self {
        EducationDraft {
            degree: header.degree,
            institution: header.institution,
            location: header.location,
            graduation_date: header.graduation_date,
            raw_lines: vec![line.to_string()],
            ..Default::default()
        }
    }

    fn has_details(&self) -> bool {
        self.gpa.is_some() || self.honors.is_some() || !self.coursework.is_empty()
    }

    /// A header-only draft missing exactly what the new header supplies.
    fn completed_by(&self, header: &EducationHeader) -> bool {
        if self.has_details() {
            return false;
        }
        let adds_degree = self.degree.is_empty()
            && !header.degree.is_empty()
            && header.institution.is_empty();
        let adds_institution = self.institution.is_empty()
            && !header.institution.is_empty()
            && header.degree.is_empty();
        adds_degree || adds_institution
    }

    fn merge(&mut self, header: EducationHeader, line: &str) {
        if self.degree.is_empty() {
            self.degree = header.degree;
        }
        if self.institution.is_empty() {
            self.institution = header.institution;
        }
        if self.location.is_none() {
            self.location = header.location;
        }
        if self.graduation_date.is_empty() {
            self.graduation_date = header.graduation_date;
        }
        self.raw_lines.push(line.to_string());
    }

    fn attach_date(&mut self, line: &str) {
        if self.graduation_date.is_empty() {
            self.graduation_date = last_date(line);
        }
        self.raw_lines.push(line.to_string());
    }

    fn add_detail(&mut self, line: &str) {
        let lower = line.to_lowercase();
        if lower.contains("gpa") {
            self.gpa = Some(line.to_string());
        } else if HONORS_WORDS.is_match(line) {
            self.honors = Some(line.to_string());
        } else {
            self.coursework.push(line.to_string());
        }
        self.raw_lines.push(line.to_string());
    }

    fn into_entry(self, index: usize) -> Option<EducationEntry> {
        if self.degree.is_empty() && self.institution.is_empty() {
            return None;
        }
        Some(EducationEntry {
            id: format!("edu_{index}"),
            degree: self.degree,
            institution: self.institution,
            location: self.location,
            graduation_date: self.graduation_date,
            gpa: self.gpa,
            honors: self.honors,
            coursework: (!self.coursework.is_empty()).then_some(self.coursework),
            raw_text: self.raw_lines.join("\n"),
        })
    }
}

#[derive(Debug, Default)]
struct EducationFold {
    finished: Vec<EducationEntry>,
    current: Option<EducationDraft>,
}

impl EducationFold {
    fn step(mut self, line: &str) -> Self {
        let Some(rule) = classify(EDUCATION_RULES, line) else {
            return self;
        };
        match rule.action {
            EducationAction::Skip => {}
            EducationAction::Open => {
                let header = EducationHeader::parse(line);
                match self.current.as_mut() {
                    Some(draft) if draft.completed_by(&header) => draft.merge(header, line),
                    _ => {
                        self.flush();
                        self.current = Some(EducationDraft::new(header, line));
                    }
                }
            }
            EducationAction::AttachDate => {
                if let Some(draft) = self.current.as_mut() {
                    draft.attach_date(line);
                }
            }
            EducationAction::Detail => {
                if let Some(draft) = self.current.as_mut() {
                    draft.add_detail(line);
                }
            }
        }
        self
    }

    fn flush(&mut self) {
        if let Some(draft) = self.current.take() {
            if let Some(entry) = draft.into_entry(self.finished.len()) {
                self.finished.push(entry);
            }
        }
    }

    fn finish(mut self) -> Vec<EducationEntry> {
        self.flush();
        self.finished
    }
}

pub fn parse_education_entries(section: &str) -> Vec<EducationEntry> {
    content_lines(section)
        .fold(EducationFold::default(), |fold, line| fold.step(line))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_degree_institution_year() {
        let edu = parse_education_entries("BS Computer Science, State University, 2019");
        assert_eq!(edu.len(), 1);
        assert_eq!(edu[0].id, "edu_0");
        assert_eq!(edu[0].degree, "BS Computer Science");
        assert_eq!(edu[0].institution, "State University");
        assert_eq!(edu[0].graduation_date, "2019");
        assert_eq!(edu[0].coursework, None);
        assert_eq!(edu[0].raw_text, "BS Computer Science, State University, 2019");
    }

    #[test]
    fn test_institution_then_degree_lines_merge() {
        let edu = parse_education_entries(
            "University of California, Riverside\nBachelor of Science in Biology\nMay 2018",
        );
        assert_eq!(edu.len(), 1);
        assert_eq!(edu[0].institution, "University of California");
        assert_eq!(edu[0].degree, "Bachelor of Science in Biology");
        assert_eq!(edu[0].graduation_date, "May 2018");
    }

    #[test]
    fn test_details_are_classified() {
        let edu = parse_education_entries(
            "Master of Science, Georgia Institute of Technology, 2021\nGPA: 3.9/4.0\nSumma Cum Laude\nDistributed Systems, Compilers",
        );
        let entry = &edu[0];
        assert_eq!(entry.degree, "Master of Science");
        assert_eq!(entry.institution, "Georgia Institute of Technology");
        assert_eq!(entry.gpa.as_deref(), Some("GPA: 3.9/4.0"));
        assert_eq!(entry.honors.as_deref(), Some("Summa Cum Laude"));
        assert_eq!(
            entry.coursework,
            Some(vec!["Distributed Systems, Compilers".to_string()])
        );
        assert_eq!(entry.raw_text.lines().count(), 4);
    }

    #[test]
    fn test_city_state_location() {
        let edu = parse_education_entries("Bachelor of Arts | Pomona College | Claremont, CA | 2016");
        assert_eq!(edu[0].location.as_deref(), Some("Claremont, CA"));
        assert_eq!(edu[0].degree, "Bachelor of Arts");
        assert_eq!(edu[0].institution, "Pomona College");
        assert_eq!(edu[0].graduation_date, "2016");
    }

    #[test]
    fn test_new_header_after_details_opens_new_entry() {
        let edu = parse_education_entries(
            "MBA, Wharton School, 2020\nDean's List 2019\nBachelor of Commerce, McGill University, 2014",
        );
        assert_eq!(edu.len(), 2);
        assert_eq!(edu[0].honors.as_deref(), Some("Dean's List 2019"));
        assert_eq!(edu[1].id, "edu_1");
        assert_eq!(edu[1].institution, "McGill University");
    }

    #[test]
    fn test_two_complete_headers_do_not_merge() {
        let edu = parse_education_entries("BS Math, State University\nMS Physics, Tech Institute");
        assert_eq!(edu.len(), 2);
    }

    #[test]
    fn test_lines_before_any_header_are_ignored() {
        let edu = parse_education_entries("Relevant coursework follows\nDiploma, Central High School, 2010");
        assert_eq!(edu.len(), 1);
        assert_eq!(edu[0].coursework, None);
    }

    #[test]
    fn test_banner_is_skipped() {
        assert_eq!(
            classify(EDUCATION_RULES, "Education").map(|r| r.action),
            Some(EducationAction::Skip)
        );
    }

    #[test]
    fn test_empty_section() {
        assert!(parse_education_entries("").is_empty());
    }
}
