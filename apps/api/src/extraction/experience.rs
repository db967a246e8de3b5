//! Job entry parser: a left fold over the experience section's lines.
//!
//! Header lines open an entry, the lines under it become bullets, and the
//! fold's final step flushes whatever entry is still open. Wording is never
//! rewritten: bullets are source lines minus their bullet glyph.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::dates::{contains_year, date_span, is_date_only, strip_dates, DateSpan};
use crate::extraction::models::JobEntry;
use crate::extraction::rules::{
    classify, content_lines, starts_with_bullet, strip_bullet, word_set, LineRule,
};

const MIN_BULLET_LEN: usize = 10;
const MAX_BANNER_LEN: usize = 30;

/// Words whose presence makes a line a job header.
static ROLE_WORDS: Lazy<Regex> = Lazy::new(|| {
    word_set(&[
        "Manager",
        "Director",
        "Engineer",
        "Analyst",
        "Specialist",
        "Coordinator",
        "Lead",
        "Senior",
        "Developer",
        "Intern",
        "Assistant",
        "Teaching",
        "Board",
        "Project",
        "Volunteer",
    ])
});

/// Subset that reads as a job title rather than an organization.
static TITLE_WORDS: Lazy<Regex> = Lazy::new(|| {
    word_set(&[
        "Manager",
        "Director",
        "Engineer",
        "Analyst",
        "Lead",
        "Senior",
        "Developer",
        "Coordinator",
        "Specialist",
        "Assistant",
    ])
});

static ORGANIZATION_WORDS: Lazy<Regex> = Lazy::new(|| word_set(&["Project", "Club", "Team"]));
static MANAGER: Lazy<Regex> = Lazy::new(|| word_set(&["Manager"]));

static INSTITUTION_WORDS: Lazy<Regex> = Lazy::new(|| {
    word_set(&[
        "University",
        "College",
        "School",
        "District",
        "Corporation",
        "Institute",
        "Agency",
        "Department",
    ])
});

static ACRONYM_LEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,}\s*-").unwrap());

static SECTION_BANNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:experience|work|professional|employment)\b").unwrap());

static ROLE_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?i:served as|worked as|acted as|role of|position of|as)\s+(?:(?i:an?)\s+)?([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+){0,2})",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Skip,
    Bullet,
    AttachDates,
    Open,
}

fn is_section_banner(line: &str) -> bool {
    line.len() < MAX_BANNER_LEN && SECTION_BANNER.is_match(line)
}

fn opens_entry(line: &str) -> bool {
    contains_year(line) || line.contains('|') || ROLE_WORDS.is_match(line)
}

fn is_detail(line: &str) -> bool {
    strip_bullet(line).len() > MIN_BULLET_LEN
}

pub const JOB_RULES: &[LineRule<JobAction>] = &[
    LineRule {
        name: "section-banner",
        predicate: is_section_banner,
        action: JobAction::Skip,
    },
    LineRule {
        name: "bullet-glyph",
        predicate: starts_with_bullet,
        action: JobAction::Bullet,
    },
    LineRule {
        name: "date-only",
        predicate: is_date_only,
        action: JobAction::AttachDates,
    },
    LineRule {
        name: "header",
        predicate: opens_entry,
        action: JobAction::Open,
    },
    LineRule {
        name: "detail",
        predicate: is_detail,
        action: JobAction::Bullet,
    },
];

#[derive(Debug, Default)]
struct JobDraft {
    title: String,
    company: String,
    location: Option<String>,
    dates: DateSpan,
    bullets: Vec<String>,
    raw_lines: Vec<String>,
}

impl JobDraft {
    fn from_header(line: &str) -> Self {
        let header = HeaderFields::parse(line);
        JobDraft {
            title: header.title,
            company: header.company,
            location: header.location,
            dates: date_span(line),
            bullets: Vec::new(),
            raw_lines: vec![line.to_string()],
        }
    }

    fn push_bullet(&mut self, line: &str) {
        let text = strip_bullet(line);
        if text.len() <= MIN_BULLET_LEN {
            return;
        }
        if self.title.is_empty() && self.bullets.is_empty() {
            if let Some(role) = ROLE_MENTION.captures(text).and_then(|c| c.get(1)) {
                self.title = role.as_str().to_string();
            }
        }
        self.bullets.push(text.to_string());
        self.raw_lines.push(line.to_string());
    }

    fn attach_dates(&mut self, line: &str) {
        if self.dates == DateSpan::default() {
            self.dates = date_span(line);
        }
        self.raw_lines.push(line.to_string());
    }

    fn into_entry(self, index: usize) -> Option<JobEntry> {
        if self.title.is_empty() && self.company.is_empty() {
            return None;
        }
        Some(JobEntry {
            id: format!("job_{index}"),
            title: self.title,
            company: self.company,
            location: self.location,
            start_date: self.dates.start,
            end_date: self.dates.end,
            bullets: self.bullets,
            raw_text: self.raw_lines.join("\n"),
        })
    }
}

/// Title / company / location read from a header line with its dates removed.
#[derive(Debug, Default, PartialEq, Eq)]
struct HeaderFields {
    title: String,
    company: String,
    location: Option<String>,
}

impl HeaderFields {
    fn parse(line: &str) -> Self {
        let stripped = strip_dates(line);
        let working = stripped
            .trim_matches(|c: char| c.is_whitespace() || "|,;-()".contains(c))
            .to_string();

        if working.contains('|') {
            let mut parts = working.split('|').map(str::trim).filter(|p| !p.is_empty());
            return HeaderFields {
                title: parts.next().unwrap_or_default().to_string(),
                company: parts.next().unwrap_or_default().to_string(),
                location: parts.next().map(str::to_string),
            };
        }

        for separator in [" at ", " @ "] {
            if let Some((title, company)) = working.split_once(separator) {
                return HeaderFields::pair(title, company);
            }
        }

        if ACRONYM_LEAD.is_match(&working)
            || (ORGANIZATION_WORDS.is_match(&working) && !MANAGER.is_match(&working))
        {
            return HeaderFields::company(working);
        }

        if TITLE_WORDS.is_match(&working) {
            for separator in [" - ", ", "] {
                if working.matches(separator).count() == 1 {
                    if let Some((title, company)) = working.split_once(separator) {
                        return HeaderFields::pair(title, company);
                    }
                }
            }
            return HeaderFields::title(working);
        }

        if INSTITUTION_WORDS.is_match(&working) {
            HeaderFields::company(working)
        } else {
            HeaderFields::title(working)
        }
    }

    fn pair(title: &str, company: &str) -> Self {
        HeaderFields {
            title: title.trim().to_string(),
            company: company.trim().to_string(),
            location: None,
        }
    }

    fn title(title: String) -> Self {
        HeaderFields {
            title,
            ..Default::default()
        }
    }

    fn company(company: String) -> Self {
        HeaderFields {
            company,
            ..Default::default()
        }
    }
}

/// Fold state: finished entries plus the entry still collecting bullets.
#[derive(Debug, Default)]
struct JobFold {
    finished: Vec<JobEntry>,
    current: Option<JobDraft>,
}

impl JobFold {
    fn step(mut self, line: &str) -> Self {
        let Some(rule) = classify(JOB_RULES, line) else {
            return self;
        };
        match rule.action {
            JobAction::Skip => {}
            JobAction::Open => {
                self.flush();
                self.current = Some(JobDraft::from_header(line));
            }
            JobAction::AttachDates => match self.current.as_mut() {
                Some(draft) => draft.attach_dates(line),
                None => self.current = Some(JobDraft::from_header(line)),
            },
            JobAction::Bullet => {
                if let Some(draft) = self.current.as_mut() {
                    draft.push_bullet(line);
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

    fn finish(mut self) -> Vec<JobEntry> {
        self.flush();
        self.finished
    }
}

/// Parses the experience section into job entries, in source order.
pub fn parse_job_entries(section: &str) -> Vec<JobEntry> {
    content_lines(section)
        .fold(JobFold::default(), |fold, line| fold.step(line))
        .finish()
}
