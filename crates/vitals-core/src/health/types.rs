//! Core types for the health scoring engine

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five sub-metrics feeding the overall score
///
/// Declaration order is the fixed metric order used for map iteration and
/// recommendation collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    /// Months of expenses covered by savings
    EmergencyFund,
    /// Savings as a share of income
    SavingsRate,
    /// Estimated debt payments as a share of income
    DebtToIncome,
    /// Expenses as a share of income
    SpendingRatio,
    /// Mean progress across savings goals
    GoalProgress,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::EmergencyFund => "emergencyFund",
            MetricKind::SavingsRate => "savingsRate",
            MetricKind::DebtToIncome => "debtToIncome",
            MetricKind::SpendingRatio => "spendingRatio",
            MetricKind::GoalProgress => "goalProgress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::EmergencyFund => "Emergency Fund",
            MetricKind::SavingsRate => "Savings Rate",
            MetricKind::DebtToIncome => "Debt-to-Income Ratio",
            MetricKind::SpendingRatio => "Spending Ratio",
            MetricKind::GoalProgress => "Goal Progress",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricKind::EmergencyFund => "Months of expenses covered by savings",
            MetricKind::SavingsRate => "Percentage of income saved",
            MetricKind::DebtToIncome => "Percentage of income going to debt payments",
            MetricKind::SpendingRatio => "Percentage of income spent",
            MetricKind::GoalProgress => "Average progress towards financial goals",
        }
    }

    /// All metric kinds in fixed order
    pub fn all() -> &'static [MetricKind] {
        &[
            MetricKind::EmergencyFund,
            MetricKind::SavingsRate,
            MetricKind::DebtToIncome,
            MetricKind::SpendingRatio,
            MetricKind::GoalProgress,
        ]
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emergencyFund" | "emergency_fund" => Ok(MetricKind::EmergencyFund),
            "savingsRate" | "savings_rate" => Ok(MetricKind::SavingsRate),
            "debtToIncome" | "debt_to_income" => Ok(MetricKind::DebtToIncome),
            "spendingRatio" | "spending_ratio" => Ok(MetricKind::SpendingRatio),
            "goalProgress" | "goal_progress" => Ok(MetricKind::GoalProgress),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

/// Three-tier classification of a metric, driven by its raw ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Poor,
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Good => "good",
            MetricStatus::Warning => "warning",
            MetricStatus::Poor => "poor",
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, MetricStatus::Good)
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall health bucket derived from the rounded score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthCategory {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    Poor,
}

impl HealthCategory {
    /// Lower bounds are inclusive: 80, 70, 60, 40
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => HealthCategory::Excellent,
            70..=79 => HealthCategory::Good,
            60..=69 => HealthCategory::Fair,
            40..=59 => HealthCategory::NeedsImprovement,
            _ => HealthCategory::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthCategory::Excellent => "Excellent",
            HealthCategory::Good => "Good",
            HealthCategory::Fair => "Fair",
            HealthCategory::NeedsImprovement => "Needs Improvement",
            HealthCategory::Poor => "Poor",
        }
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One normalized sub-score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub kind: MetricKind,
    /// Normalized sub-score in [0, 100]
    pub score: f64,
    /// Raw ratio the status thresholds apply to (months or percent)
    pub ratio: f64,
    /// Human-readable raw value, e.g. "3.2" or "18.5%"
    pub value: String,
    pub label: String,
    pub description: String,
    pub recommendation: String,
    pub status: MetricStatus,
}

impl Metric {
    pub fn new(
        kind: MetricKind,
        ratio: f64,
        score: f64,
        value: String,
        status: MetricStatus,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            score,
            ratio,
            value,
            label: kind.label().to_string(),
            description: kind.description().to_string(),
            recommendation: recommendation.into(),
            status,
        }
    }
}

/// Result of one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Rounded weighted sum of the metric scores
    pub overall_score: u8,
    pub category: HealthCategory,
    pub metrics: BTreeMap<MetricKind, Metric>,
    /// At most `max_recommendations` entries, in metric order then fillers
    pub recommendations: Vec<String>,
}

impl HealthReport {
    pub fn metric(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(HealthCategory::from_score(100), HealthCategory::Excellent);
        assert_eq!(HealthCategory::from_score(80), HealthCategory::Excellent);
        assert_eq!(HealthCategory::from_score(79), HealthCategory::Good);
        assert_eq!(HealthCategory::from_score(70), HealthCategory::Good);
        assert_eq!(HealthCategory::from_score(69), HealthCategory::Fair);
        assert_eq!(HealthCategory::from_score(60), HealthCategory::Fair);
        assert_eq!(HealthCategory::from_score(59), HealthCategory::NeedsImprovement);
        assert_eq!(HealthCategory::from_score(40), HealthCategory::NeedsImprovement);
        assert_eq!(HealthCategory::from_score(39), HealthCategory::Poor);
        assert_eq!(HealthCategory::from_score(0), HealthCategory::Poor);
    }

    #[test]
    fn test_metric_kind_order_and_keys() {
        let mut kinds = MetricKind::all().to_vec();
        kinds.sort();
        assert_eq!(kinds, MetricKind::all());
        assert_eq!(MetricKind::DebtToIncome.as_str(), "debtToIncome");
        assert_eq!(
            "goal_progress".parse::<MetricKind>().unwrap(),
            MetricKind::GoalProgress
        );
        assert!("netWorth".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_value(MetricStatus::Warning).unwrap(),
            "warning"
        );
        assert_eq!(
            serde_json::to_value(HealthCategory::NeedsImprovement).unwrap(),
            "NeedsImprovement"
        );
        assert_eq!(HealthCategory::NeedsImprovement.to_string(), "Needs Improvement");
    }
}
