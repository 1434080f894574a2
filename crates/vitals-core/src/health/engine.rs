//! Health Engine - runs the metric analyzers and aggregates the report

use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::models::{FinancialSnapshot, Goal};
use crate::provider::SnapshotProvider;

use super::analyzers::{builtin_analyzers, MetricAnalyzer, ScoringInput};
use super::recommendations::build_recommendations;
use super::types::{HealthCategory, HealthReport, Metric, MetricKind};

/// Stateless scoring engine; safe to share across threads and requests
pub struct HealthEngine {
    analyzers: Vec<Box<dyn MetricAnalyzer>>,
    config: ScoringConfig,
}

impl Default for HealthEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthEngine {
    /// Engine with the built-in analyzers and default weights
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    /// Engine with a custom (already validated) configuration
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            analyzers: builtin_analyzers(),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a snapshot and goal list. Never fails; degenerate inputs
    /// produce zero ratios rather than errors.
    pub fn compute(&self, snapshot: &FinancialSnapshot, goals: &[Goal]) -> HealthReport {
        let input = ScoringInput::new(snapshot, goals);

        let metrics: BTreeMap<MetricKind, Metric> = self
            .analyzers
            .iter()
            .map(|analyzer| (analyzer.kind(), analyzer.evaluate(&input)))
            .collect();

        let weighted: f64 = metrics
            .values()
            .map(|m| m.score * self.config.weights.get(m.kind))
            .sum();
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;
        let category = HealthCategory::from_score(overall_score);

        let recommendations = build_recommendations(
            metrics.values(),
            self.config.min_recommendations,
            self.config.max_recommendations,
        );

        tracing::debug!(
            emergency_fund = metrics[&MetricKind::EmergencyFund].score,
            savings_rate = metrics[&MetricKind::SavingsRate].score,
            debt_to_income = metrics[&MetricKind::DebtToIncome].score,
            spending_ratio = metrics[&MetricKind::SpendingRatio].score,
            goal_progress = metrics[&MetricKind::GoalProgress].score,
            weighted,
            overall_score,
            goals = goals.len(),
            "Health score computed"
        );

        HealthReport {
            overall_score,
            category,
            metrics,
            recommendations,
        }
    }
}

/// Score with the default configuration
pub fn compute_health(snapshot: &FinancialSnapshot, goals: &[Goal]) -> HealthReport {
    HealthEngine::new().compute(snapshot, goals)
}

/// Fetch a user's snapshot and goals, then score them.
///
/// Fetch failures are returned unchanged; the engine only runs once both
/// fetches succeed.
pub async fn assess_user<P>(
    provider: &P,
    engine: &HealthEngine,
    user_id: &str,
) -> Result<HealthReport>
where
    P: SnapshotProvider + ?Sized,
{
    let snapshot = provider.get_financial_snapshot(user_id).await?;
    let goals = provider.get_goals(user_id).await?;

    Ok(engine.compute(&snapshot, &goals))
}
