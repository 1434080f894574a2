//! Integration tests for vitals-core
//!
//! These tests exercise the full record → snapshot → score workflow and the
//! engine's guarantees over arbitrary inputs.

use chrono::NaiveDate;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use vitals_core::{
    assess_user, compute_health, FinancialSnapshot, Goal, HealthCategory, HealthEngine,
    MemoryStore, MetricKind, MetricStatus, NewGoal, NewTransaction, ProfileUpdate,
    ScoringConfig, TransactionType,
};

fn record(store: &MemoryStore, user: &str, kind: TransactionType, amount: f64, category: &str) {
    store
        .add_transaction(
            user,
            NewTransaction {
                amount,
                category: category.to_string(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 5, 1),
                kind,
            },
        )
        .expect("Failed to record transaction");
}

// =============================================================================
// Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_recorded_activity_drives_score() {
    let store = MemoryStore::new();
    store
        .initialize_profile("alice", "Alice", "alice@example.com")
        .expect("Failed to create profile");

    record(&store, "alice", TransactionType::Income, 5000.0, "Salary");
    record(&store, "alice", TransactionType::Expense, 2500.0, "Rent");
    record(&store, "alice", TransactionType::Expense, 1500.0, "Groceries");
    store
        .update_profile(
            "alice",
            ProfileUpdate {
                savings: Some(2000.0),
                ..Default::default()
            },
        )
        .expect("Failed to set savings");
    store
        .add_goal(
            "alice",
            NewGoal {
                name: "New car".to_string(),
                target_amount: 10000.0,
                current_amount: 2500.0,
                ..Default::default()
            },
        )
        .expect("Failed to add goal");

    let report = assess_user(&store, &HealthEngine::new(), "alice")
        .await
        .expect("Failed to assess user");

    // Summary is 5000 income / 4000 expenses / 2000 savings
    assert_eq!(report.overall_score, 33);
    assert_eq!(report.category, HealthCategory::Poor);
    assert_eq!(report.recommendations.len(), 5);
}

#[tokio::test]
async fn test_completed_goals_still_count() {
    let store = MemoryStore::new();
    store.initialize_profile("bob", "", "").unwrap();
    let goal = store
        .add_goal(
            "bob",
            NewGoal {
                name: "Laptop".to_string(),
                target_amount: 1000.0,
                ..Default::default()
            },
        )
        .unwrap();
    store.update_goal_progress(goal.id, 1000.0).unwrap();

    let report = assess_user(&store, &HealthEngine::new(), "bob").await.unwrap();
    let gp = report.metric(MetricKind::GoalProgress).unwrap();
    assert_eq!(gp.score, 100.0);
    assert_eq!(gp.status, MetricStatus::Good);
}

#[test]
fn test_deficit_spending_is_flagged() {
    let snapshot = FinancialSnapshot::new(3000.0, 3600.0, -600.0, 0.0);
    let report = compute_health(&snapshot, &[]);

    let spending = report.metric(MetricKind::SpendingRatio).unwrap();
    assert_eq!(spending.score, 0.0);
    assert_eq!(spending.status, MetricStatus::Poor);
    assert_eq!(spending.value, "120.0%");

    let savings = report.metric(MetricKind::SavingsRate).unwrap();
    assert_eq!(savings.status, MetricStatus::Poor);
    assert!(report.recommendations.len() <= 5);
}

#[test]
fn test_over_target_goal_capped_at_hundred() {
    let goals = vec![Goal::with_amounts(3000.0, 1000.0)];
    let report = compute_health(&FinancialSnapshot::default(), &goals);
    let gp = report.metric(MetricKind::GoalProgress).unwrap();

    assert_eq!(gp.score, 100.0);
    assert_eq!(gp.value, "300.0%");
}

#[test]
fn test_embedded_config_matches_defaults() {
    let config = ScoringConfig::parse(include_str!("../../../config/scoring.toml"))
        .expect("Embedded config must parse");
    assert!((config.weights.sum() - 1.0).abs() < 1e-9);
    assert_eq!(config.min_recommendations, 3);
    assert_eq!(config.max_recommendations, 5);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_scores_stay_in_range(
        income in -10_000.0f64..50_000.0,
        expenses in -10_000.0f64..50_000.0,
        balance in -50_000.0f64..50_000.0,
        savings in -10_000.0f64..200_000.0,
        current in 0.0f64..20_000.0,
        target in -100.0f64..20_000.0,
    ) {
        let snapshot = FinancialSnapshot::new(income, expenses, balance, savings);
        let report = compute_health(&snapshot, &[Goal::with_amounts(current, target)]);

        prop_assert!(report.overall_score <= 100);
        prop_assert_eq!(report.category, HealthCategory::from_score(report.overall_score));
        prop_assert_eq!(report.metrics.len(), 5);
        for metric in report.metrics.values() {
            prop_assert!(metric.score.is_finite());
            prop_assert!((0.0..=100.0).contains(&metric.score));
            prop_assert!(metric.ratio.is_finite());
        }
    }

    #[test]
    fn prop_more_savings_never_lowers_score(
        income in 0.0f64..20_000.0,
        expenses in 0.0f64..20_000.0,
        savings in 0.0f64..100_000.0,
        extra in 0.0f64..50_000.0,
    ) {
        let base = compute_health(&FinancialSnapshot::new(income, expenses, 0.0, savings), &[]);
        let more = compute_health(
            &FinancialSnapshot::new(income, expenses, 0.0, savings + extra),
            &[],
        );
        prop_assert!(more.overall_score >= base.overall_score);

        for kind in [MetricKind::EmergencyFund, MetricKind::SavingsRate] {
            let before = base.metric(kind).map(|m| m.score);
            let after = more.metric(kind).map(|m| m.score);
            prop_assert!(before.is_some() && after.is_some());
            prop_assert!(
                after >= before,
                "{} dropped from {:?} to {:?}",
                kind,
                before,
                after
            );
        }
    }

    #[test]
    fn prop_scoring_is_deterministic(
        income in 0.0f64..20_000.0,
        expenses in 0.0f64..20_000.0,
        savings in 0.0f64..100_000.0,
        current in 0.0f64..5_000.0,
        target in 0.0f64..5_000.0,
    ) {
        let snapshot = FinancialSnapshot::new(income, expenses, 0.0, savings);
        let goals = vec![Goal::with_amounts(current, target)];

        let first = serde_json::to_string(&compute_health(&snapshot, &goals)).unwrap();
        let second = serde_json::to_string(&compute_health(&snapshot, &goals)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_recommendations_bounded(
        income in 0.0f64..20_000.0,
        expenses in 0.0f64..40_000.0,
        savings in 0.0f64..100_000.0,
    ) {
        let report = compute_health(&FinancialSnapshot::new(income, expenses, 0.0, savings), &[]);
        prop_assert!(report.recommendations.len() <= 5);
        prop_assert!(report.recommendations.len() >= 3);
    }

    #[test]
    fn prop_zero_income_is_safe(
        expenses in 0.0f64..40_000.0,
        savings in 0.0f64..100_000.0,
    ) {
        let report = compute_health(&FinancialSnapshot::new(0.0, expenses, 0.0, savings), &[]);

        for kind in [MetricKind::SavingsRate, MetricKind::DebtToIncome, MetricKind::SpendingRatio] {
            prop_assert_eq!(report.metric(kind).unwrap().ratio, 0.0);
        }
    }
}
