//! Health Engine - Financial Health Scoring
//!
//! Turns a user's financial snapshot and savings goals into a 0-100 score.
//! The engine is a pure function of its inputs: no I/O, no clock, no
//! randomness, so identical input always produces an identical report.
//!
//! ## Metrics
//!
//! - **Emergency Fund** - months of expenses covered by savings
//! - **Savings Rate** - savings as a percentage of income
//! - **Debt-to-Income** - estimated debt payments as a percentage of income
//! - **Spending Ratio** - expenses as a percentage of income
//! - **Goal Progress** - mean progress across savings goals
//!
//! The overall score is the weighted sum of the five metric scores, rounded,
//! then bucketed into a [`HealthCategory`]. Metrics that are not in good
//! standing contribute their recommendation to the report.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitals_core::health::{HealthEngine, compute_health};
//!
//! let report = compute_health(&snapshot, &goals);
//! println!("{} ({})", report.overall_score, report.category);
//! ```

pub mod analyzers;
pub mod engine;
pub mod recommendations;
pub mod types;

pub use analyzers::{
    DebtToIncomeAnalyzer, EmergencyFundAnalyzer, GoalProgressAnalyzer, MetricAnalyzer,
    SavingsRateAnalyzer, ScoringInput, SpendingRatioAnalyzer, DEBT_PAYMENT_SHARE,
};
pub use engine::{assess_user, compute_health, HealthEngine};
pub use recommendations::{build_recommendations, FILLER_RECOMMENDATIONS};
pub use types::{HealthCategory, HealthReport, Metric, MetricKind, MetricStatus};
