use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_TAXONOMY_PATH: &str = "data/skills_taxonomy.json";
const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub taxonomy_path: PathBuf,
    pub weights_path: PathBuf,
    /// Enables the interview-question and suggestion endpoints when set.
    pub openrouter_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            taxonomy_path: env_or("SKILLS_TAXONOMY_PATH", DEFAULT_TAXONOMY_PATH).into(),
            weights_path: env_or("SCREENER_CONFIG_PATH", DEFAULT_CONFIG_PATH).into(),
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
