//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::coaching::{generate_interview_questions, suggest_improvements};
use crate::screening::extractor::{extract_experience_hint, SkillSet};
use crate::screening::jd_parser::{parse_jd, StructuredJd};
use crate::screening::pipeline::{
    score_resume_text, screen_candidates, Candidate, ScreeningReport,
};
use crate::screening::scorer::ScoreResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: SkillSet,
    pub experience_hint: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub skills: SkillSet,
    pub experience_hint: String,
    pub jd: StructuredJd,
    pub score: ScoreResult,
}

#[derive(Debug, Deserialize)]
pub struct CandidateText {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    pub jd_text: String,
    pub candidates: Vec<CandidateText>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub candidate_name: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub candidate_name: String,
    pub questions: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: String,
}

fn require_jd_text(jd_text: &str) -> Result<(), AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jd/parse
///
/// Structures a raw job description into required/preferred/experience lists.
pub async fn handle_parse_jd(
    Json(request): Json<ParseJdRequest>,
) -> Result<Json<StructuredJd>, AppError> {
    require_jd_text(&request.jd_text)?;
    Ok(Json(parse_jd(&request.jd_text)))
}

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    Ok(Json(ExtractSkillsResponse {
        skills: state.extractor.extract(&request.text),
        experience_hint: extract_experience_hint(&request.text),
    }))
}

/// POST /api/v1/score
///
/// Scores a single résumé text against a JD without storing a run.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    require_jd_text(&request.jd_text)?;

    let jd = parse_jd(&request.jd_text);
    let result = score_resume_text(
        "resume",
        &request.resume_text,
        &jd,
        &state.extractor,
        state.scorer.as_ref(),
    )
    .await?;

    Ok(Json(ScoreResponse {
        skills: result.skills,
        experience_hint: result.experience_hint,
        jd,
        score: result.score,
    }))
}

/// POST /api/v1/screenings
///
/// Screens a batch of already-extracted résumé texts and stores the run.
pub async fn handle_create_screening(
    State(state): State<AppState>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Json<ScreeningReport>, AppError> {
    require_jd_text(&request.jd_text)?;
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "candidates cannot be empty".to_string(),
        ));
    }

    let candidates = request
        .candidates
        .into_iter()
        .map(|c| Candidate::from_text(c.name, c.text))
        .collect();

    run_and_store(&state, &request.jd_text, candidates).await
}

/// POST /api/v1/screenings/upload
///
/// Multipart form: one `jd_text` text field plus any number of file fields
/// (PDF, DOCX or TXT). Unsupported or unreadable files are reported in `failures`.
pub async fn handle_upload_screening(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut jd_text: Option<String> = None;
    let mut candidates = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("jd_text") {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid jd_text field: {e}")))?;
            jd_text = Some(text);
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read {file_name}: {e}")))?;
        candidates.push(Candidate::from_document(file_name, bytes));
    }

    let jd_text = jd_text.unwrap_or_default();
    require_jd_text(&jd_text)?;
    if candidates.is_empty() {
        return Err(AppError::Validation(
            "at least one résumé file is required".to_string(),
        ));
    }

    run_and_store(&state, &jd_text, candidates).await
}

/// GET /api/v1/screenings/:id
pub async fn handle_get_screening(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Json<ScreeningReport>, AppError> {
    state
        .runs
        .get(run_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Screening {run_id} not found")))
}

/// POST /api/v1/screenings/:id/questions
///
/// Generates interview questions for a candidate's missing required skills.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let llm = state.llm.as_ref().ok_or(AppError::LlmUnavailable)?;

    let report = state
        .runs
        .get(run_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Screening {run_id} not found")))?;
    let candidate = report.candidate(&request.candidate_name).ok_or_else(|| {
        AppError::NotFound(format!(
            "Candidate '{}' not found in screening {run_id}",
            request.candidate_name
        ))
    })?;

    let missing: Vec<String> = candidate
        .score
        .details
        .missing_required
        .iter()
        .cloned()
        .collect();
    let questions =
        generate_interview_questions(llm, &candidate.name, &missing, &report.jd_text).await?;

    Ok(Json(QuestionsResponse {
        candidate_name: candidate.name.clone(),
        questions,
    }))
}

/// POST /api/v1/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let llm = state.llm.as_ref().ok_or(AppError::LlmUnavailable)?;
    require_jd_text(&request.jd_text)?;

    let suggestions = suggest_improvements(llm, &request.resume_text, &request.jd_text).await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

async fn run_and_store(
    state: &AppState,
    jd_text: &str,
    candidates: Vec<Candidate>,
) -> Result<Json<ScreeningReport>, AppError> {
    let report = screen_candidates(
        jd_text,
        candidates,
        &state.extractor,
        state.scorer.as_ref(),
    )
    .await;
    state.runs.insert(report.clone()).await;
    Ok(Json(report))
}
