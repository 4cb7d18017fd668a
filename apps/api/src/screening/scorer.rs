//! Scoring: pluggable, trait-based scorer that measures an extracted skill
//! set against a structured JD.
//!
//! Default: `WeightedSkillScorer` (pure, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn FitScorer>` built once from the configured weights.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::weights::Weights;
use crate::screening::extractor::SkillSet;
use crate::screening::jd_parser::StructuredJd;

/// Placeholder experience sub-score. Not derived from the extracted
/// experience hint; weighted totals downstream depend on this constant.
pub const EXPERIENCE_PLACEHOLDER_SCORE: f64 = 50.0;

/// Distinct skills needed for a full keyword-density sub-score.
pub const KEYWORD_SATURATION: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Four sub-scores, each 0–100 and rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub required: f64,
    pub preferred: f64,
    pub experience: f64,
    pub keywords: f64,
}

/// Lowercase-normalized matched/missing skills per JD section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub matched_required: BTreeSet<String>,
    pub missing_required: BTreeSet<String>,
    pub matched_preferred: BTreeSet<String>,
    pub missing_preferred: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub details: MatchDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The scorer trait. Implement this to swap backends without touching the
/// pipeline or handlers.
#[async_trait]
pub trait FitScorer: Send + Sync {
    async fn score(&self, resume_skills: &SkillSet, jd: &StructuredJd)
        -> Result<ScoreResult, AppError>;

    /// Label reported alongside results, e.g. "weighted".
    fn backend(&self) -> &'static str;
}

/// Weighted required/preferred/experience/keyword scorer.
#[derive(Debug, Clone)]
pub struct WeightedSkillScorer {
    weights: Weights,
}

impl WeightedSkillScorer {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }
}

#[async_trait]
impl FitScorer for WeightedSkillScorer {
    async fn score(
        &self,
        resume_skills: &SkillSet,
        jd: &StructuredJd,
    ) -> Result<ScoreResult, AppError> {
        Ok(compute_weighted_score(resume_skills, jd, &self.weights))
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Computes the weighted score of `resume_skills` against `jd`.
///
/// Sub-scores:
/// - required / preferred: 100 × |matched| / |section|, or 0 for an empty section
/// - experience: constant `EXPERIENCE_PLACEHOLDER_SCORE`
/// - keywords: 100 × min(|resume_skills| / 10, 1)
///
/// `total_score` = Σ sub-score × weight. Weights are applied as given.
pub fn compute_weighted_score(
    resume_skills: &SkillSet,
    jd: &StructuredJd,
    weights: &Weights,
) -> ScoreResult {
    let resume_lower: BTreeSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    let required = normalize_section(&jd.required_skills);
    let preferred = normalize_section(&jd.preferred_skills);

    let (required_score, matched_required, missing_required) =
        score_section(&resume_lower, required);
    let (preferred_score, matched_preferred, missing_preferred) =
        score_section(&resume_lower, preferred);

    let experience_score = EXPERIENCE_PLACEHOLDER_SCORE;
    let keyword_score =
        (resume_skills.len() as f64 / KEYWORD_SATURATION as f64).min(1.0) * 100.0;

    let total = required_score * weights.required_skills
        + preferred_score * weights.preferred_skills
        + experience_score * weights.experience
        + keyword_score * weights.keywords;

    ScoreResult {
        total_score: round2(total),
        breakdown: ScoreBreakdown {
            required: round2(required_score),
            preferred: round2(preferred_score),
            experience: round2(experience_score),
            keywords: round2(keyword_score),
        },
        details: MatchDetails {
            matched_required,
            missing_required,
            matched_preferred,
            missing_preferred,
        },
    }
}

/// Lowercases and trims JD entries; duplicates collapse.
fn normalize_section(entries: &[String]) -> BTreeSet<String> {
    entries.iter().map(|s| s.trim().to_lowercase()).collect()
}

/// Returns (sub-score, matched, missing). An empty section scores 0.
fn score_section(
    resume: &BTreeSet<String>,
    section: BTreeSet<String>,
) -> (f64, BTreeSet<String>, BTreeSet<String>) {
    if section.is_empty() {
        return (0.0, BTreeSet::new(), BTreeSet::new());
    }

    let matched: BTreeSet<String> = resume.intersection(&section).cloned().collect();
    let score = matched.len() as f64 / section.len() as f64 * 100.0;
    let missing: BTreeSet<String> = section.difference(&matched).cloned().collect();
    (score, matched, missing)
}

/// Two-decimal rounding of the exact binary value, ties to even
/// (18.125 → 18.12, 0.135 → 0.14).
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> SkillSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn jd(required: &[&str], preferred: &[&str]) -> StructuredJd {
        StructuredJd {
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            experience_notes: vec![],
        }
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_resume_misses_everything() {
        let result =
            compute_weighted_score(&skills(&[]), &jd(&["Python", "SQL"], &[]), &Weights::default());
        assert_eq!(result.breakdown.required, 0.0);
        assert!(result.details.matched_required.is_empty());
        assert_eq!(result.details.missing_required, set(&["python", "sql"]));
        assert_eq!(result.breakdown.keywords, 0.0);
    }

    #[test]
    fn test_half_required_matched() {
        let result = compute_weighted_score(
            &skills(&["python"]),
            &jd(&["Python", "SQL"], &[]),
            &Weights::default(),
        );
        assert_eq!(result.breakdown.required, 50.0);
        assert_eq!(result.details.matched_required, set(&["python"]));
        assert_eq!(result.details.missing_required, set(&["sql"]));
    }

    #[test]
    fn test_resume_skill_case_is_normalized() {
        let result = compute_weighted_score(
            &skills(&["Python", "SQL"]),
            &jd(&["  python ", "sql"], &[]),
            &Weights::default(),
        );
        assert_eq!(result.breakdown.required, 100.0);
        assert!(result.details.missing_required.is_empty());
    }

    #[test]
    fn test_empty_required_scores_zero_not_full() {
        let weights = Weights {
            required_skills: 1.0,
            preferred_skills: 0.0,
            experience: 0.0,
            keywords: 0.0,
        };
        let result = compute_weighted_score(&skills(&["Python"]), &jd(&[], &[]), &weights);
        assert_eq!(result.breakdown.required, 0.0);
        assert_eq!(result.total_score, 0.0);
        assert!(result.details.matched_required.is_empty());
        assert!(result.details.missing_required.is_empty());
    }

    #[test]
    fn test_duplicate_jd_entries_collapse() {
        let result = compute_weighted_score(
            &skills(&["docker"]),
            &jd(&[], &["Docker", "docker ", "Kubernetes"]),
            &Weights::default(),
        );
        assert_eq!(result.breakdown.preferred, 50.0);
        assert_eq!(result.details.missing_preferred, set(&["kubernetes"]));
    }

    #[test]
    fn test_keyword_density_caps_at_ten() {
        let ten: Vec<String> = (0..10).map(|i| format!("skill{i}")).collect();
        let ten_refs: Vec<&str> = ten.iter().map(String::as_str).collect();
        let result = compute_weighted_score(&skills(&ten_refs), &jd(&[], &[]), &Weights::default());
        assert_eq!(result.breakdown.keywords, 100.0);

        let fifteen: Vec<String> = (0..15).map(|i| format!("skill{i}")).collect();
        let fifteen_refs: Vec<&str> = fifteen.iter().map(String::as_str).collect();
        let result =
            compute_weighted_score(&skills(&fifteen_refs), &jd(&[], &[]), &Weights::default());
        assert_eq!(result.breakdown.keywords, 100.0);
    }

    #[test]
    fn test_keyword_density_five_skills_is_fifty() {
        let result = compute_weighted_score(
            &skills(&["a", "b", "c", "d", "e"]),
            &jd(&[], &[]),
            &Weights::default(),
        );
        assert_eq!(result.breakdown.keywords, 50.0);
    }

    #[test]
    fn test_experience_is_constant_placeholder() {
        let result = compute_weighted_score(&skills(&[]), &jd(&[], &[]), &Weights::default());
        assert_eq!(result.breakdown.experience, EXPERIENCE_PLACEHOLDER_SCORE);
    }

    #[test]
    fn test_weighted_total() {
        // required 50 × 0.5 + preferred 100 × 0.2 + experience 50 × 0.1 + keywords 20 × 0.2
        // = 25 + 20 + 5 + 4 = 54
        let result = compute_weighted_score(
            &skills(&["python", "docker"]),
            &jd(&["Python", "SQL"], &["Docker"]),
            &Weights::default(),
        );
        assert!((result.total_score - 54.0).abs() < 1e-9, "got {}", result.total_score);
    }

    #[test]
    fn test_sub_scores_rounded_to_two_decimals() {
        let result = compute_weighted_score(
            &skills(&["a"]),
            &jd(&["a", "b", "c"], &[]),
            &Weights::default(),
        );
        assert_eq!(result.breakdown.required, 33.33);
    }

    #[test]
    fn test_exact_tie_rounds_to_even() {
        let weights = Weights {
            required_skills: 0.25,
            preferred_skills: 0.25,
            experience: 0.25,
            keywords: 0.25,
        };
        // 12.5 × 0.25 + 0 + 50 × 0.25 + 10 × 0.25 = 18.125 exactly
        let result = compute_weighted_score(
            &skills(&["a"]),
            &jd(&["a", "b", "c", "d", "e", "f", "g", "h"], &[]),
            &weights,
        );
        assert_eq!(result.breakdown.required, 12.5);
        assert_eq!(result.total_score, 18.12);
    }

    #[test]
    fn test_round2_ties_and_non_ties() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(66.6666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_blank_required_entry_counts_toward_total() {
        let result = compute_weighted_score(
            &skills(&["python"]),
            &jd(&["", "Python"], &[]),
            &Weights::default(),
        );
        assert_eq!(result.breakdown.required, 50.0);
        assert_eq!(result.details.matched_required, set(&["python"]));
        assert_eq!(result.details.missing_required, set(&[""]));
    }

    #[test]
    fn test_skewed_weights_can_exceed_hundred() {
        let weights = Weights {
            required_skills: 1.0,
            preferred_skills: 1.0,
            experience: 1.0,
            keywords: 1.0,
        };
        let result = compute_weighted_score(
            &skills(&["python"]),
            &jd(&["Python"], &["Python"]),
            &weights,
        );
        // 100 + 100 + 50 + 10
        assert_eq!(result.total_score, 260.0);
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let resume = skills(&["python", "sql", "docker"]);
        let posting = jd(&["Python", "Go"], &["Docker"]);
        let a = compute_weighted_score(&resume, &posting, &Weights::default());
        let b = compute_weighted_score(&resume, &posting, &Weights::default());
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_trait_delegates_to_weighted_score() {
        let scorer = WeightedSkillScorer::new(Weights::default());
        let resume = skills(&["python"]);
        let posting = jd(&["Python", "SQL"], &[]);

        let via_trait = scorer.score(&resume, &posting).await.unwrap();
        assert_eq!(
            via_trait,
            compute_weighted_score(&resume, &posting, &Weights::default())
        );
        assert_eq!(scorer.backend(), "weighted");
    }
}
