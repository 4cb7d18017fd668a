use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Weight '{name}' must be a non-negative number, got {value}")]
    Negative { name: &'static str, value: f64 },
}

/// Per-sub-score weights applied to the 0–100 sub-scores.
///
/// Weights are not normalized. `total_score` lands in [0, 100] only when the
/// caller supplies weights that sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub required_skills: f64,
    pub preferred_skills: f64,
    pub experience: f64,
    pub keywords: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            required_skills: 0.5,
            preferred_skills: 0.2,
            experience: 0.1,
            keywords: 0.2,
        }
    }
}

/// Shape of `data/config.json`.
#[derive(Debug, Deserialize)]
struct ScreenerConfigFile {
    weights: Weights,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.required_skills + self.preferred_skills + self.experience + self.keywords
    }

    /// Rejects negative or non-finite weights. Does not check the sum.
    pub fn validate(self) -> Result<Self, WeightsError> {
        for (name, value) in [
            ("required_skills", self.required_skills),
            ("preferred_skills", self.preferred_skills),
            ("experience", self.experience),
            ("keywords", self.keywords),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::Negative { name, value });
            }
        }
        Ok(self)
    }

    pub fn from_config_json(json: &str) -> Result<Self, WeightsError> {
        let file: ScreenerConfigFile = serde_json::from_str(json)?;
        file.weights.validate()
    }

    pub fn from_config_path(path: impl AsRef<Path>) -> Result<Self, WeightsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| WeightsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_config_json(&raw)
    }
}
