//! Search configuration
//!
//! Weights and lookahead depth are data, loaded from JSON:
//!
//! ```json
//! {
//!   "lookahead": "two_ply",
//!   "weights": { "aggregate_height": -0.51, "lines": 0.96, "covered_holes": -0.36 }
//! }
//! ```
//!
//! Features absent from `weights` are not computed into the score.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::features::{Feature, Features};

/// Errors loading a [`SearchConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read weights file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid weights: {0}")]
    Json(#[from] serde_json::Error),
}

/// How many pieces the search places before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookahead {
    /// The falling piece only
    #[default]
    OnePly,
    /// The falling piece, then the queued piece on the result
    TwoPly,
}

impl Lookahead {
    /// `1` or `2`, as used by environment configuration
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Lookahead::OnePly),
            2 => Some(Lookahead::TwoPly),
            _ => None,
        }
    }
}

/// Weighted heuristic used by [`search`](crate::search)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub lookahead: Lookahead,
    pub weights: BTreeMap<Feature, f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let weights = [
            (Feature::AggregateHeight, -0.510066),
            (Feature::Lines, 0.960666),
            (Feature::EnclosedHoles, -0.35663),
            (Feature::Bumpiness, -0.184483),
        ];
        Self {
            lookahead: Lookahead::OnePly,
            weights: weights.into_iter().collect(),
        }
    }
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_weight(mut self, feature: Feature, weight: f64) -> Self {
        self.weights.insert(feature, weight);
        self
    }

    /// Weighted sum of the configured features
    pub fn evaluate(&self, features: &Features) -> f64 {
        self.weights
            .iter()
            .map(|(&feature, &weight)| weight * features.value(feature))
            .sum()
    }
}
