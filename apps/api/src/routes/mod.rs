pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

/// Résumé uploads can exceed axum's 2 MB default.
const UPLOAD_BODY_LIMIT: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Core screening operations
        .route("/api/v1/jd/parse", post(handlers::handle_parse_jd))
        .route("/api/v1/skills/extract", post(handlers::handle_extract_skills))
        .route("/api/v1/score", post(handlers::handle_score))
        // Batch screening runs (in-memory)
        .route("/api/v1/screenings", post(handlers::handle_create_screening))
        .route(
            "/api/v1/screenings/upload",
            post(handlers::handle_upload_screening)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/screenings/:id", get(handlers::handle_get_screening))
        .route(
            "/api/v1/screenings/:id/questions",
            post(handlers::handle_interview_questions),
        )
        // LLM follow-ups
        .route("/api/v1/suggestions", post(handlers::handle_suggestions))
        .with_state(state)
}
