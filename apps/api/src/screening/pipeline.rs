//! Screening pipeline: JD structure once, then text → skills → score per
//! candidate. A failing candidate is recorded and skipped; the rest of the
//! batch still runs. Results are ranked by total score.

use std::cmp::Ordering;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::documents::extract_text;
use crate::errors::AppError;
use crate::screening::extractor::{extract_experience_hint, SkillExtractor, SkillSet};
use crate::screening::jd_parser::{parse_jd, StructuredJd};
use crate::screening::scorer::{FitScorer, ScoreResult};

/// Where a candidate's résumé text comes from.
#[derive(Debug, Clone)]
pub enum CandidateSource {
    Text(String),
    Document { file_name: String, bytes: Bytes },
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: CandidateSource::Text(text.into()),
        }
    }

    /// Uploaded file; the file name doubles as the candidate name.
    pub fn from_document(file_name: impl Into<String>, bytes: Bytes) -> Self {
        let file_name = file_name.into();
        Self {
            name: file_name.clone(),
            source: CandidateSource::Document { file_name, bytes },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    pub name: String,
    pub skills: SkillSet,
    pub experience_hint: String,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub name: String,
    pub error: String,
}

/// One JD screened against a batch of candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub scorer_backend: String,
    pub jd_text: String,
    pub jd: StructuredJd,
    /// Sorted by `total_score` descending, then name.
    pub ranked: Vec<CandidateResult>,
    pub failures: Vec<CandidateFailure>,
}

impl ScreeningReport {
    pub fn candidate(&self, name: &str) -> Option<&CandidateResult> {
        self.ranked.iter().find(|c| c.name == name)
    }
}

/// Extracts skills and scores a single résumé text against a structured JD.
pub async fn score_resume_text(
    name: &str,
    resume_text: &str,
    jd: &StructuredJd,
    extractor: &SkillExtractor,
    scorer: &dyn FitScorer,
) -> Result<CandidateResult, AppError> {
    let skills = extractor.extract(resume_text);
    let experience_hint = extract_experience_hint(resume_text);
    let score = scorer.score(&skills, jd).await?;

    debug!(
        candidate = name,
        skills = skills.len(),
        total_score = score.total_score,
        "Scored candidate"
    );

    Ok(CandidateResult {
        name: name.to_string(),
        skills,
        experience_hint,
        score,
    })
}

/// Screens every candidate against `jd_text` and returns a ranked report.
pub async fn screen_candidates(
    jd_text: &str,
    candidates: Vec<Candidate>,
    extractor: &SkillExtractor,
    scorer: &dyn FitScorer,
) -> ScreeningReport {
    let jd = parse_jd(jd_text);
    if jd.is_empty() {
        warn!("No recognizable sections in job description; required/preferred scores will be 0");
    }

    let mut ranked = Vec::with_capacity(candidates.len());
    let mut failures = Vec::new();

    for candidate in candidates {
        let name = candidate.name.clone();
        let outcome = match resume_text(candidate.source).await {
            Ok(text) => score_resume_text(&name, &text, &jd, extractor, scorer).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => ranked.push(result),
            Err(e) => {
                warn!(candidate = %name, error = %e, "Skipping candidate");
                failures.push(CandidateFailure {
                    name,
                    error: e.to_string(),
                });
            }
        }
    }

    rank_results(&mut ranked);

    info!(
        scored = ranked.len(),
        failed = failures.len(),
        "Screening run complete"
    );

    ScreeningReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        scorer_backend: scorer.backend().to_string(),
        jd_text: jd_text.to_string(),
        jd,
        ranked,
        failures,
    }
}

/// Sorts by total score descending; equal scores fall back to name ascending.
pub fn rank_results(results: &mut [CandidateResult]) {
    results.sort_by(|a, b| {
        b.score
            .total_score
            .partial_cmp(&a.score.total_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}

async fn resume_text(source: CandidateSource) -> Result<String, AppError> {
    match source {
        CandidateSource::Text(text) => Ok(text),
        CandidateSource::Document { file_name, bytes } => {
            // PDF parsing is CPU-bound
            let text = tokio::task::spawn_blocking(move || extract_text(&file_name, &bytes))
                .await
                .map_err(|e| AppError::Internal(e.into()))??;
            Ok(text)
        }
    }
}
