//! Scoring configuration
//!
//! Metric weights and recommendation limits used by the health engine.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (e.g. `--config`), then the `VITALS_CONFIG` env var
//! 2. Override in data dir (~/.local/share/vitals/config/scoring.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::health::MetricKind;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/scoring.toml");

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VITALS_CONFIG";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-metric weights for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub emergency_fund: f64,
    pub savings_rate: f64,
    pub debt_to_income: f64,
    pub spending_ratio: f64,
    pub goal_progress: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            emergency_fund: 0.25,
            savings_rate: 0.20,
            debt_to_income: 0.25,
            spending_ratio: 0.20,
            goal_progress: 0.10,
        }
    }
}

impl Weights {
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::EmergencyFund => self.emergency_fund,
            MetricKind::SavingsRate => self.savings_rate,
            MetricKind::DebtToIncome => self.debt_to_income,
            MetricKind::SpendingRatio => self.spending_ratio,
            MetricKind::GoalProgress => self.goal_progress,
        }
    }

    pub fn sum(&self) -> f64 {
        MetricKind::all().iter().map(|k| self.get(*k)).sum()
    }
}

/// Health engine configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    pub weights: Weights,
    /// Fillers are appended while fewer metric recommendations than this exist
    pub min_recommendations: usize,
    /// Cap on the final recommendation list
    pub max_recommendations: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            min_recommendations: 3,
            max_recommendations: 5,
        }
    }
}

impl ScoringConfig {
    /// Load using the standard resolution order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Self::from_file(Path::new(&path));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading scoring config override");
                return Self::from_file(&path);
            }
        }

        Self::parse(DEFAULT_CONFIG)
    }

    /// Load a specific file; a missing file is an error
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse TOML content on top of the defaults and validate the result
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(weights) = raw.weights {
            let w = &mut config.weights;
            if let Some(v) = weights.emergency_fund {
                w.emergency_fund = v;
            }
            if let Some(v) = weights.savings_rate {
                w.savings_rate = v;
            }
            if let Some(v) = weights.debt_to_income {
                w.debt_to_income = v;
            }
            if let Some(v) = weights.spending_ratio {
                w.spending_ratio = v;
            }
            if let Some(v) = weights.goal_progress {
                w.goal_progress = v;
            }
        }

        if let Some(recs) = raw.recommendations {
            if let Some(min) = recs.min {
                config.min_recommendations = min;
            }
            if let Some(max) = recs.max {
                config.max_recommendations = max;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for kind in MetricKind::all() {
            let weight = self.weights.get(*kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Config(format!(
                    "Weight for {} must be a non-negative number, got {}",
                    kind, weight
                )));
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "Metric weights must sum to 1.0, got {:.4}",
                sum
            )));
        }

        if self.max_recommendations == 0 {
            return Err(Error::Config(
                "recommendations.max must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("vitals").join("config").join("scoring.toml"))
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    weights: Option<RawWeights>,
    recommendations: Option<RawRecommendations>,
}

#[derive(Debug, Deserialize)]
struct RawWeights {
    emergency_fund: Option<f64>,
    savings_rate: Option<f64>,
    debt_to_income: Option<f64>,
    spending_ratio: Option<f64>,
    goal_progress: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendations {
    min: Option<usize>,
    max: Option<usize>,
}
