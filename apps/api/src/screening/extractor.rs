//! Skill Extractor: finds canonical skills from the taxonomy in free text.
//!
//! Variations are matched literally against the lowercased text. A hit only
//! counts when the characters on either side are absent or non-word
//! characters, which keeps "java" out of "javascript" while still letting
//! symbol-bearing variations like "c++", "c#" and ".net" match at their edges.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::taxonomy::SkillsTaxonomy;

/// Canonical skill names found in a text blob.
pub type SkillSet = BTreeSet<String>;

static EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+\+?)\s*(?:years?|yrs?)").expect("valid experience regex"));

#[derive(Debug, Clone)]
struct CompiledSkill {
    name: String,
    /// Lowercased, in taxonomy order.
    variations: Vec<String>,
}

/// Extractor built once from a validated taxonomy and shared read-only.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    skills: Vec<CompiledSkill>,
}

impl SkillExtractor {
    pub fn new(taxonomy: &SkillsTaxonomy) -> Self {
        let skills = taxonomy
            .skills()
            .map(|(name, variations)| CompiledSkill {
                name: name.to_string(),
                variations: variations.iter().map(|v| v.trim().to_lowercase()).collect(),
            })
            .collect();
        Self { skills }
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Returns every canonical skill with at least one bounded variation hit.
    /// Variations of a skill short-circuit on the first hit.
    pub fn extract(&self, text: &str) -> SkillSet {
        let text_lower = text.to_lowercase();

        self.skills
            .iter()
            .filter(|skill| {
                skill
                    .variations
                    .iter()
                    .any(|variation| contains_bounded(&text_lower, variation))
            })
            .map(|skill| skill.name.clone())
            .collect()
    }
}

/// First "N years" / "N+ yrs" mention, returned as the numeric token ("5+").
/// Returns "0" when nothing matches.
pub fn extract_experience_hint(text: &str) -> String {
    EXPERIENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "0".to_string())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True if `needle` occurs in `haystack` with no word character directly
/// before or after it. Every occurrence is tried, overlapping ones included.
fn contains_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }

        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}
