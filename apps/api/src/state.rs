use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::screening::extractor::SkillExtractor;
use crate::screening::scorer::FitScorer;
use crate::store::RunStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once from the taxonomy at startup; read-only afterwards.
    pub extractor: Arc<SkillExtractor>,
    /// Pluggable scorer. Default: WeightedSkillScorer with the configured weights.
    pub scorer: Arc<dyn FitScorer>,
    /// `None` when OPENROUTER_API_KEY is unset.
    pub llm: Option<LlmClient>,
    pub runs: RunStore,
}
