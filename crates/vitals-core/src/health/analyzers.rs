//! Metric analyzers
//!
//! Each analyzer derives a raw ratio from the snapshot, scales it into
//! [0, 100], and classifies it with thresholds on the ratio (not the score).
//! Any division by a zero, negative, or non-finite quantity yields a ratio of 0.

use crate::models::{FinancialSnapshot, Goal};

use super::types::{Metric, MetricKind, MetricStatus};

/// Share of monthly expenses assumed to be debt payments.
///
/// There is no debt data model; this is a placeholder approximation, not a
/// measured value.
pub const DEBT_PAYMENT_SHARE: f64 = 0.30;

/// Months of expenses for a full emergency-fund score
const EMERGENCY_FUND_TARGET_MONTHS: f64 = 6.0;
/// Savings rate (%) for a full score
const SAVINGS_RATE_TARGET: f64 = 20.0;
/// Debt-to-income (%) at which the score reaches zero
const DEBT_TO_INCOME_CEILING: f64 = 36.0;
/// Spending ratio (%) at which the score reaches zero
const SPENDING_RATIO_CEILING: f64 = 80.0;

/// Sanitized inputs for one scoring run
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub snapshot: FinancialSnapshot,
    pub goals: &'a [Goal],
}

impl<'a> ScoringInput<'a> {
    /// Non-finite snapshot values are replaced with 0
    pub fn new(snapshot: &FinancialSnapshot, goals: &'a [Goal]) -> Self {
        Self {
            snapshot: FinancialSnapshot {
                income: finite_or_zero(snapshot.income),
                expenses: finite_or_zero(snapshot.expenses),
                balance: finite_or_zero(snapshot.balance),
                savings: finite_or_zero(snapshot.savings),
            },
            goals,
        }
    }
}

/// Trait for the per-metric scoring rules
pub trait MetricAnalyzer: Send + Sync {
    fn kind(&self) -> MetricKind;

    fn evaluate(&self, input: &ScoringInput<'_>) -> Metric;
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// `numerator / divisor`, or 0 when the divisor is not a positive number
fn guarded_ratio(numerator: f64, divisor: f64) -> f64 {
    if divisor.is_finite() && divisor > 0.0 {
        finite_or_zero(numerator / divisor)
    } else {
        0.0
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub struct EmergencyFundAnalyzer;

impl MetricAnalyzer for EmergencyFundAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::EmergencyFund
    }

    fn evaluate(&self, input: &ScoringInput<'_>) -> Metric {
        let months = guarded_ratio(input.snapshot.savings, input.snapshot.expenses);
        let score = clamp_score(months / EMERGENCY_FUND_TARGET_MONTHS * 100.0);

        let status = if months >= 3.0 {
            MetricStatus::Good
        } else if months >= 1.0 {
            MetricStatus::Warning
        } else {
            MetricStatus::Poor
        };

        let recommendation = if status.is_good() {
            "Your emergency fund is in good shape"
        } else {
            "Aim to save at least 3-6 months of expenses for emergencies"
        };

        Metric::new(
            self.kind(),
            months,
            score,
            format!("{:.1}", months),
            status,
            recommendation,
        )
    }
}

pub struct SavingsRateAnalyzer;

impl MetricAnalyzer for SavingsRateAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::SavingsRate
    }

    fn evaluate(&self, input: &ScoringInput<'_>) -> Metric {
        let rate = guarded_ratio(input.snapshot.savings * 100.0, input.snapshot.income);
        let score = clamp_score(rate / SAVINGS_RATE_TARGET * 100.0);

        let status = if rate >= 20.0 {
            MetricStatus::Good
        } else if rate >= 10.0 {
            MetricStatus::Warning
        } else {
            MetricStatus::Poor
        };

        let recommendation = if status.is_good() {
            "Your savings rate is excellent"
        } else {
            "Try to save at least 20% of your income"
        };

        Metric::new(self.kind(), rate, score, percent(rate), status, recommendation)
    }
}

pub struct DebtToIncomeAnalyzer;

impl MetricAnalyzer for DebtToIncomeAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::DebtToIncome
    }

    fn evaluate(&self, input: &ScoringInput<'_>) -> Metric {
        let debt_payments = input.snapshot.expenses * DEBT_PAYMENT_SHARE;
        let dti = guarded_ratio(debt_payments * 100.0, input.snapshot.income);
        let score = clamp_score((1.0 - dti / DEBT_TO_INCOME_CEILING) * 100.0);

        let status = if dti <= 36.0 {
            MetricStatus::Good
        } else if dti <= 43.0 {
            MetricStatus::Warning
        } else {
            MetricStatus::Poor
        };

        let recommendation = if status.is_good() {
            "Your debt-to-income ratio is healthy"
        } else {
            "Work on reducing your debt to below 36% of your income"
        };

        Metric::new(self.kind(), dti, score, percent(dti), status, recommendation)
    }
}

pub struct SpendingRatioAnalyzer;

impl MetricAnalyzer for SpendingRatioAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::SpendingRatio
    }

    fn evaluate(&self, input: &ScoringInput<'_>) -> Metric {
        let spending = guarded_ratio(input.snapshot.expenses * 100.0, input.snapshot.income);
        let score = clamp_score((1.0 - spending / SPENDING_RATIO_CEILING) * 100.0);

        let status = if spending <= 80.0 {
            MetricStatus::Good
        } else if spending <= 90.0 {
            MetricStatus::Warning
        } else {
            MetricStatus::Poor
        };

        let recommendation = if status.is_good() {
            "Your spending is well-controlled"
        } else {
            "Try to reduce your spending to below 80% of your income"
        };

        Metric::new(
            self.kind(),
            spending,
            score,
            percent(spending),
            status,
            recommendation,
        )
    }
}

pub struct GoalProgressAnalyzer;

impl MetricAnalyzer for GoalProgressAnalyzer {
    fn kind(&self) -> MetricKind {
        MetricKind::GoalProgress
    }

    fn evaluate(&self, input: &ScoringInput<'_>) -> Metric {
        let mean = if input.goals.is_empty() {
            0.0
        } else {
            let total: f64 = input.goals.iter().map(Goal::progress).sum();
            finite_or_zero(total / input.goals.len() as f64)
        };
        let progress = mean * 100.0;
        // Over-funded goals can push the mean past 1
        let score = clamp_score(progress);

        let status = if progress >= 50.0 {
            MetricStatus::Good
        } else if progress >= 25.0 {
            MetricStatus::Warning
        } else {
            MetricStatus::Poor
        };

        let recommendation = if status.is_good() {
            "You're making good progress on your goals"
        } else {
            "Consider allocating more resources to your financial goals"
        };

        Metric::new(
            self.kind(),
            progress,
            score,
            percent(progress),
            status,
            recommendation,
        )
    }
}

/// Built-in analyzers in fixed metric order
pub fn builtin_analyzers() -> Vec<Box<dyn MetricAnalyzer>> {
    vec![
        Box::new(EmergencyFundAnalyzer),
        Box::new(SavingsRateAnalyzer),
        Box::new(DebtToIncomeAnalyzer),
        Box::new(SpendingRatioAnalyzer),
        Box::new(GoalProgressAnalyzer),
    ]
}
