//! Vitals Core Library
//!
//! Shared functionality for the Vitals personal finance tool:
//! - Financial health scoring (five weighted metrics, category, recommendations)
//! - Scoring configuration with embedded defaults and file overrides
//! - Domain models for profiles, transactions, savings goals, budgets,
//!   subscriptions, and recurring transactions
//! - Snapshot provider interface with an in-memory store

pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod provider;

pub use config::{default_config_path, ScoringConfig, Weights};
pub use error::{Error, Result};
pub use health::{
    assess_user, build_recommendations, compute_health, HealthCategory, HealthEngine,
    HealthReport, Metric, MetricAnalyzer, MetricKind, MetricStatus, ScoringInput,
};
pub use models::{
    Budget, BudgetOverview, BudgetStatus, BudgetUpdate, FinancialSnapshot, Frequency, Goal,
    NewBudget, NewGoal, NewRecurringTransaction, NewSubscription, NewTransaction,
    ProfileSettings, ProfileUpdate, RecurringTotals, RecurringTransaction, Subscription,
    SubscriptionTotals, Transaction, TransactionFilter, TransactionType, UserProfile,
};
pub use provider::{MemoryStore, SnapshotProvider, StoreSeed};
