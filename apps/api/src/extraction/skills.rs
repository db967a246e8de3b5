use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::models::{SkillCategory, DEFAULT_SKILL_CATEGORY};
use crate::extraction::rules::{content_lines, strip_bullet};

static ITEM_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;|]").unwrap());
static FLAT_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;|\n]").unwrap());
static GLYPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•·▪◦‣]").unwrap());
static SECTION_BANNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:skills|technical skills|core competencies)\s*:?$").unwrap());

fn split_items(list: &str) -> Vec<String> {
    ITEM_SEPARATOR
        .split(list)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Languages: Rust, Go` style line. A bare `Languages:` is a category with no items.
fn categorized(line: &str) -> Option<(String, Vec<String>)> {
    let (category, list) = line.split_once(':')?;
    Some((strip_bullet(category).to_string(), split_items(list)))
}

/// Everything in the section as one uncategorized list.
fn flat_items(section: &str) -> Vec<String> {
    let section = GLYPH.replace_all(section, ",");
    FLAT_SEPARATOR
        .split(&section)
        .map(|item| strip_bullet(item.trim()))
        .filter(|item| item.len() > 1 && !SECTION_BANNER.is_match(item))
        .map(str::to_string)
        .collect()
}

/// Parses the skills section into categories, ids `skill_0`, `skill_1`, ...
///
/// Labelled lines each become a category. Only when the section has no
/// labelled line at all does the whole section collapse into a single
/// `Technical Skills` category.
pub fn parse_skill_categories(section: &str) -> Vec<SkillCategory> {
    let labelled: Vec<(String, Vec<String>)> = content_lines(section)
        .filter(|line| !SECTION_BANNER.is_match(line))
        .filter_map(categorized)
        .collect();

    let groups = if labelled.is_empty() {
        let items = flat_items(section);
        if items.is_empty() {
            Vec::new()
        } else {
            vec![(DEFAULT_SKILL_CATEGORY.to_string(), items)]
        }
    } else {
        labelled
    };

    groups
        .into_iter()
        .enumerate()
        .map(|(i, (category, items))| SkillCategory {
            id: format!("skill_{i}"),
            category,
            items,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_lines_become_categories() {
        let skills = parse_skill_categories("Languages: Rust, Go; Python\nTools: Docker | Kubernetes");
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].id, "skill_0");
        assert_eq!(skills[0].category, "Languages");
        assert_eq!(skills[0].items, vec!["Rust", "Go", "Python"]);
        assert_eq!(skills[1].category, "Tools");
        assert_eq!(skills[1].items, vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn test_unlabelled_lines_ignored_when_any_label_exists() {
        let skills = parse_skill_categories("Languages: Rust\nGit, Linux");
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].items, vec!["Rust"]);
    }

    #[test]
    fn test_flat_fallback() {
        let skills = parse_skill_categories("Rust, Go\n- SQL; Terraform\n• Bash");
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].category, DEFAULT_SKILL_CATEGORY);
        assert_eq!(skills[0].items, vec!["Rust", "Go", "SQL", "Terraform", "Bash"]);
    }

    #[test]
    fn test_duplicates_and_order_are_kept() {
        let skills = parse_skill_categories("Rust, Go, Rust");
        assert_eq!(skills[0].items, vec!["Rust", "Go", "Rust"]);
    }

    #[test]
    fn test_single_char_items_dropped_in_fallback() {
        let skills = parse_skill_categories("C, R, Go");
        assert_eq!(skills[0].items, vec!["Go"]);
    }

    #[test]
    fn test_label_without_items_is_an_empty_category() {
        let skills = parse_skill_categories("Languages:\nRust, Go");
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].category, "Languages");
        assert!(skills[0].items.is_empty());
        assert!(skills.iter().all(|c| c.category != DEFAULT_SKILL_CATEGORY));
    }

    #[test]
    fn test_banner_with_colon_is_not_a_category() {
        let skills = parse_skill_categories("Skills:\nRust, Go");
        assert_eq!(skills[0].category, DEFAULT_SKILL_CATEGORY);
        assert_eq!(skills[0].items, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_banner_line_is_not_an_item() {
        let skills = parse_skill_categories("Technical Skills\nRust, Go");
        assert_eq!(skills[0].items, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_empty_section() {
        assert!(parse_skill_categories("").is_empty());
    }
}
