mod config;
mod documents;
mod errors;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::models::taxonomy::SkillsTaxonomy;
use crate::models::weights::Weights;
use crate::routes::build_router;
use crate::screening::extractor::SkillExtractor;
use crate::screening::scorer::WeightedSkillScorer;
use crate::state::AppState;
use crate::store::RunStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Taxonomy and weights are fatal at startup if missing or invalid
    let taxonomy = SkillsTaxonomy::from_path(&config.taxonomy_path).with_context(|| {
        format!(
            "Failed to load skills taxonomy from {}",
            config.taxonomy_path.display()
        )
    })?;
    info!(
        "Skills taxonomy loaded: {} categories, {} skills",
        taxonomy.category_count(),
        taxonomy.skill_count()
    );

    let weights = Weights::from_config_path(&config.weights_path).with_context(|| {
        format!(
            "Failed to load weights from {}",
            config.weights_path.display()
        )
    })?;
    let weight_sum = weights.sum();
    if (weight_sum - 1.0).abs() > 1e-6 {
        warn!("Weights sum to {weight_sum:.3}, not 1.0; total scores may fall outside 0-100");
    }
    info!("Scoring weights: {:?}", weights);

    let llm = match &config.openrouter_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone()).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            info!("OPENROUTER_API_KEY not set; LLM endpoints disabled");
            None
        }
    };

    let state = AppState {
        extractor: Arc::new(SkillExtractor::new(&taxonomy)),
        scorer: Arc::new(WeightedSkillScorer::new(weights)),
        llm,
        runs: RunStore::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
