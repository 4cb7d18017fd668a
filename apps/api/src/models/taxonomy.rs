//! Skills taxonomy: category → canonical skill → ordered variations.
//!
//! Loaded once at startup from JSON shaped as `{category: {skill: [variations...]}}`
//! and validated before any extraction runs. Invalid taxonomies are fatal.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical skill name → ordered variation list.
pub type SkillVariations = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Skill '{skill}' in category '{category}' has no variations")]
    EmptyVariations { category: String, skill: String },

    #[error("Skill '{skill}' in category '{category}' has a blank variation")]
    BlankVariation { category: String, skill: String },

    #[error("Skill '{skill}' is defined in both '{first}' and '{second}'")]
    DuplicateSkill {
        skill: String,
        first: String,
        second: String,
    },
}

/// Validated, immutable skills taxonomy.
///
/// Ordered maps keep iteration deterministic; extraction results never
/// depend on it, but serialized output and error reporting do.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SkillsTaxonomy {
    categories: BTreeMap<String, SkillVariations>,
}

impl SkillsTaxonomy {
    /// Builds a taxonomy, rejecting empty/blank variations and canonical
    /// names (case-insensitive) that appear more than once.
    pub fn new(categories: BTreeMap<String, SkillVariations>) -> Result<Self, TaxonomyError> {
        let mut seen: HashMap<String, String> = HashMap::new();

        for (category, skills) in &categories {
            for (skill, variations) in skills {
                if variations.is_empty() {
                    return Err(TaxonomyError::EmptyVariations {
                        category: category.clone(),
                        skill: skill.clone(),
                    });
                }
                if variations.iter().any(|v| v.trim().is_empty()) {
                    return Err(TaxonomyError::BlankVariation {
                        category: category.clone(),
                        skill: skill.clone(),
                    });
                }
                if let Some(first) = seen.insert(skill.to_lowercase(), category.clone()) {
                    return Err(TaxonomyError::DuplicateSkill {
                        skill: skill.clone(),
                        first,
                        second: category.clone(),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let categories: BTreeMap<String, SkillVariations> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Flattened `(canonical skill, variations)` pairs across all categories.
    pub fn skills(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .values()
            .flat_map(|skills| skills.iter().map(|(s, v)| (s.as_str(), v.as_slice())))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn skill_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }
}

impl<'de> Deserialize<'de> for SkillsTaxonomy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let categories = BTreeMap::<String, SkillVariations>::deserialize(deserializer)?;
        Self::new(categories).map_err(serde::de::Error::custom)
    }
}
