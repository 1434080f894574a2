//! Snapshot providers
//!
//! The health engine never fetches data itself. Hosts supply snapshots and
//! goals through [`SnapshotProvider`]; hosted databases or identity-scoped
//! backends plug in behind the same trait. [`MemoryStore`] is the in-process
//! implementation used by the CLI, the server, and tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{
    Budget, BudgetOverview, BudgetStatus, BudgetUpdate, FinancialSnapshot, Frequency, Goal,
    NewBudget, NewGoal, NewRecurringTransaction, NewSubscription, NewTransaction, ProfileUpdate,
    RecurringTotals, RecurringTransaction, Subscription, SubscriptionTotals, Transaction,
    TransactionFilter, TransactionType, UserProfile,
};

/// Source of per-user scoring inputs
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Current financial summary for a user
    async fn get_financial_snapshot(&self, user_id: &str) -> Result<FinancialSnapshot>;

    /// All goals for a user, completed ones included
    async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
}

/// Serialized contents of a [`MemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSeed {
    pub profiles: Vec<UserProfile>,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    pub budgets: Vec<Budget>,
    pub subscriptions: Vec<Subscription>,
    pub recurring: Vec<RecurringTransaction>,
}

#[derive(Default)]
struct Inner {
    profiles: HashMap<String, UserProfile>,
    transactions: Vec<Transaction>,
    goals: Vec<Goal>,
    budgets: Vec<Budget>,
    subscriptions: Vec<Subscription>,
    recurring: Vec<RecurringTransaction>,
    next_transaction_id: i64,
    next_goal_id: i64,
    next_budget_id: i64,
    next_subscription_id: i64,
    next_recurring_id: i64,
}

impl Inner {
    fn require_user(&self, user_id: &str) -> Result<()> {
        if self.profiles.contains_key(user_id) {
            Ok(())
        } else {
            Err(Error::NotFound(format!("user {}", user_id)))
        }
    }

    /// Fold a transaction into the owner's summary and append it
    fn record_transaction(&mut self, user_id: &str, tx: NewTransaction) -> Result<Transaction> {
        let now = Utc::now();

        let profile = self
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))?;
        profile.financial_summary.apply_transaction(tx.kind, tx.amount);
        profile.updated_at = now;

        let id = next_id(&mut self.next_transaction_id);
        let transaction = Transaction {
            id,
            user_id: user_id.to_string(),
            amount: tx.amount,
            category: tx.category,
            description: tx.description,
            date: tx.date.unwrap_or_else(|| now.date_naive()),
            kind: tx.kind,
            created_at: now,
        };
        self.transactions.push(transaction.clone());

        tracing::debug!(
            user = user_id,
            id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "Recorded transaction"
        );
        Ok(transaction)
    }
}

/// Hand out the next id from a counter (ids start at 1)
fn next_id(counter: &mut i64) -> i64 {
    let id = (*counter).max(1);
    *counter = id + 1;
    id
}

fn max_id<T>(items: &[T], id: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

fn require_positive(amount: f64, field: &str) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "{} must be a positive number",
            field
        )))
    }
}

fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::InvalidData(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// Thread-safe in-memory store; clones share the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        let next_transaction_id = max_id(&seed.transactions, |t| t.id);
        let next_goal_id = max_id(&seed.goals, |g| g.id);
        let next_budget_id = max_id(&seed.budgets, |b| b.id);
        let next_subscription_id = max_id(&seed.subscriptions, |s| s.id);
        let next_recurring_id = max_id(&seed.recurring, |r| r.id);

        let inner = Inner {
            profiles: seed
                .profiles
                .into_iter()
                .map(|p| (p.user_id.clone(), p))
                .collect(),
            transactions: seed.transactions,
            goals: seed.goals,
            budgets: seed.budgets,
            subscriptions: seed.subscriptions,
            recurring: seed.recurring,
            next_transaction_id,
            next_goal_id,
            next_budget_id,
            next_subscription_id,
            next_recurring_id,
        };

        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Load a store from a JSON seed document
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let seed: StoreSeed = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            profiles = seed.profiles.len(),
            transactions = seed.transactions.len(),
            goals = seed.goals.len(),
            budgets = seed.budgets.len(),
            subscriptions = seed.subscriptions.len(),
            recurring = seed.recurring.len(),
            "Loaded store seed"
        );
        Ok(Self::from_seed(seed))
    }

    /// Snapshot the store contents (profiles sorted by user id)
    pub fn to_seed(&self) -> Result<StoreSeed> {
        let inner = self.read()?;
        let mut profiles: Vec<UserProfile> = inner.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(StoreSeed {
            profiles,
            transactions: inner.transactions.clone(),
            goals: inner.goals.clone(),
            budgets: inner.budgets.clone(),
            subscriptions: inner.subscriptions.clone(),
            recurring: inner.recurring.clone(),
        })
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let seed = self.to_seed()?;
        fs::write(path, serde_json::to_string_pretty(&seed)?)?;
        tracing::info!(path = %path.display(), profiles = seed.profiles.len(), "Saved store");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| Error::Fetch("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| Error::Fetch("store lock poisoned".to_string()))
    }

    // ========== Profiles ==========

    /// Create a profile with a zeroed summary, or return the existing one.
    ///
    /// Ids are stored exactly as given, so blank ids and ids with leading or
    /// trailing whitespace are rejected rather than silently trimmed.
    pub fn initialize_profile(
        &self,
        user_id: &str,
        display_name: &str,
        email: &str,
    ) -> Result<UserProfile> {
        if user_id.trim().is_empty() {
            return Err(Error::InvalidData("user id must not be empty".to_string()));
        }
        if user_id.trim() != user_id {
            return Err(Error::InvalidData(
                "user id must not start or end with whitespace".to_string(),
            ));
        }

        let mut inner = self.write()?;
        if let Some(existing) = inner.profiles.get(user_id) {
            return Ok(existing.clone());
        }

        let profile = UserProfile::new(user_id, display_name, email);
        inner.profiles.insert(user_id.to_string(), profile.clone());
        tracing::info!(user = user_id, "Initialized user profile");
        Ok(profile)
    }

    pub fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.read()?.profiles.get(user_id).cloned())
    }

    pub fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile> {
        if let Some(savings) = update.savings {
            if !savings.is_finite() || savings < 0.0 {
                return Err(Error::InvalidData(
                    "savings must be a non-negative number".to_string(),
                ));
            }
        }

        let mut inner = self.write()?;
        let profile = inner
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))?;

        if let Some(display_name) = update.display_name {
            profile.display_name = display_name;
        }
        if let Some(email) = update.email {
            profile.email = email;
        }
        if let Some(settings) = update.settings {
            profile.settings = settings;
        }
        if let Some(savings) = update.savings {
            profile.financial_summary.savings = savings;
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    // ========== Transactions ==========

    /// Record a transaction and fold it into the user's financial summary
    pub fn add_transaction(&self, user_id: &str, tx: NewTransaction) -> Result<Transaction> {
        require_positive(tx.amount, "amount")?;
        self.write()?.record_transaction(user_id, tx)
    }

    /// Transactions for a user, newest first
    pub fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let inner = self.read()?;
        let mut transactions: Vec<Transaction> = inner
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id && filter.matches(t))
            .cloned()
            .collect();

        transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Remove a transaction. The financial summary is left as-is.
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        remove_by_id(&mut self.write()?.transactions, id, |t| t.id, "transaction")
    }

    // ========== Goals ==========

    pub fn add_goal(&self, user_id: &str, goal: NewGoal) -> Result<Goal> {
        if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
            return Err(Error::InvalidData(
                "targetAmount must be greater than zero".to_string(),
            ));
        }
        if !goal.current_amount.is_finite() || goal.current_amount < 0.0 {
            return Err(Error::InvalidData(
                "currentAmount must be a non-negative number".to_string(),
            ));
        }

        let mut inner = self.write()?;
        inner.require_user(user_id)?;

        let id = next_id(&mut inner.next_goal_id);

        let goal = Goal {
            id,
            user_id: user_id.to_string(),
            name: goal.name,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            category: goal.category,
            deadline: goal.deadline,
            description: goal.description,
            is_completed: false,
        };
        inner.goals.push(goal.clone());
        Ok(goal)
    }

    pub fn get_goal(&self, goal_id: i64) -> Result<Option<Goal>> {
        Ok(self.read()?.goals.iter().find(|g| g.id == goal_id).cloned())
    }

    /// Goals for a user, earliest deadline first (undated goals last)
    pub fn list_goals(&self, user_id: &str, include_completed: bool) -> Result<Vec<Goal>> {
        let inner = self.read()?;
        let mut goals: Vec<Goal> = inner
            .goals
            .iter()
            .filter(|g| g.user_id == user_id && (include_completed || !g.is_completed))
            .cloned()
            .collect();

        goals.sort_by(|a, b| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(goals)
    }

    /// Add `amount` to a goal; completion is re-evaluated against the target
    pub fn update_goal_progress(&self, goal_id: i64, amount: f64) -> Result<Goal> {
        if !amount.is_finite() {
            return Err(Error::InvalidData("amount must be a number".to_string()));
        }

        let mut inner = self.write()?;
        let goal = inner
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| Error::NotFound(format!("goal {}", goal_id)))?;

        goal.contribute(amount);
        tracing::debug!(
            goal = goal_id,
            current = goal.current_amount,
            completed = goal.is_completed,
            "Updated goal progress"
        );
        Ok(goal.clone())
    }

    pub fn delete_goal(&self, goal_id: i64) -> Result<()> {
        remove_by_id(&mut self.write()?.goals, goal_id, |g| g.id, "goal")
    }

    // ========== Budgets ==========

    pub fn add_budget(&self, user_id: &str, budget: NewBudget) -> Result<Budget> {
        require_text(&budget.category, "category")?;
        require_positive(budget.amount, "amount")?;

        let mut inner = self.write()?;
        inner.require_user(user_id)?;

        let budget = Budget {
            id: next_id(&mut inner.next_budget_id),
            user_id: user_id.to_string(),
            category: budget.category.trim().to_string(),
            amount: budget.amount,
            period: budget.period,
        };
        inner.budgets.push(budget.clone());
        Ok(budget)
    }

    pub fn update_budget(&self, budget_id: i64, update: BudgetUpdate) -> Result<Budget> {
        if let Some(ref category) = update.category {
            require_text(category, "category")?;
        }
        if let Some(amount) = update.amount {
            require_positive(amount, "amount")?;
        }

        let mut inner = self.write()?;
        let budget = inner
            .budgets
            .iter_mut()
            .find(|b| b.id == budget_id)
            .ok_or_else(|| Error::NotFound(format!("budget {}", budget_id)))?;

        if let Some(category) = update.category {
            budget.category = category.trim().to_string();
        }
        if let Some(amount) = update.amount {
            budget.amount = amount;
        }
        if let Some(period) = update.period {
            budget.period = period;
        }
        Ok(budget.clone())
    }

    pub fn delete_budget(&self, budget_id: i64) -> Result<()> {
        remove_by_id(&mut self.write()?.budgets, budget_id, |b| b.id, "budget")
    }

    /// A user's budgets in creation order, each with the recorded expenses
    /// whose category matches
    pub fn budget_overview(&self, user_id: &str) -> Result<BudgetOverview> {
        let inner = self.read()?;

        let budgets: Vec<BudgetStatus> = inner
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| {
                let spent: f64 = inner
                    .transactions
                    .iter()
                    .filter(|t| {
                        t.user_id == user_id
                            && t.kind == TransactionType::Expense
                            && t.category == b.category
                    })
                    .map(|t| t.amount)
                    .sum();
                BudgetStatus {
                    budget: b.clone(),
                    spent,
                    remaining: b.amount - spent,
                }
            })
            .collect();

        let total_budgeted: f64 = budgets.iter().map(|s| s.budget.amount).sum();
        let total_spent: f64 = budgets.iter().map(|s| s.spent).sum();

        Ok(BudgetOverview {
            budgets,
            total_budgeted,
            total_spent,
            remaining: total_budgeted - total_spent,
        })
    }

    // ========== Subscriptions ==========

    pub fn add_subscription(&self, user_id: &str, sub: NewSubscription) -> Result<Subscription> {
        require_text(&sub.name, "name")?;
        require_positive(sub.amount, "amount")?;

        let mut inner = self.write()?;
        inner.require_user(user_id)?;

        let subscription = Subscription {
            id: next_id(&mut inner.next_subscription_id),
            user_id: user_id.to_string(),
            name: sub.name,
            amount: sub.amount,
            billing_cycle: sub.billing_cycle,
            category: sub.category,
            next_billing_date: sub.next_billing_date,
            description: sub.description,
        };
        inner.subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    /// Subscriptions for a user, soonest billing date first
    pub fn list_subscriptions(
        &self,
        user_id: &str,
        cycle: Option<Frequency>,
    ) -> Result<Vec<Subscription>> {
        let inner = self.read()?;
        let mut subscriptions: Vec<Subscription> = inner
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id && cycle.map_or(true, |c| s.billing_cycle == c))
            .cloned()
            .collect();

        subscriptions.sort_by(|a, b| {
            a.next_billing_date
                .cmp(&b.next_billing_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(subscriptions)
    }

    /// Monthly and yearly cost of every subscription a user holds
    pub fn subscription_totals(&self, user_id: &str) -> Result<SubscriptionTotals> {
        let inner = self.read()?;
        Ok(SubscriptionTotals::from_subscriptions(
            inner.subscriptions.iter().filter(|s| s.user_id == user_id),
        ))
    }

    pub fn delete_subscription(&self, id: i64) -> Result<()> {
        remove_by_id(&mut self.write()?.subscriptions, id, |s| s.id, "subscription")
    }

    // ========== Recurring Transactions ==========

    pub fn add_recurring(
        &self,
        user_id: &str,
        item: NewRecurringTransaction,
    ) -> Result<RecurringTransaction> {
        require_text(&item.name, "name")?;
        require_positive(item.amount, "amount")?;

        let mut inner = self.write()?;
        inner.require_user(user_id)?;

        let recurring = RecurringTransaction {
            id: next_id(&mut inner.next_recurring_id),
            user_id: user_id.to_string(),
            name: item.name,
            amount: item.amount,
            kind: item.kind,
            category: item.category,
            frequency: item.frequency,
            next_date: item.next_date,
            description: item.description,
            created_at: Utc::now(),
        };
        inner.recurring.push(recurring.clone());
        Ok(recurring)
    }

    /// Recurring transactions for a user, next due first
    pub fn list_recurring(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
    ) -> Result<Vec<RecurringTransaction>> {
        let inner = self.read()?;
        let mut items: Vec<RecurringTransaction> = inner
            .recurring
            .iter()
            .filter(|r| r.user_id == user_id && kind.map_or(true, |k| r.kind == k))
            .cloned()
            .collect();

        items.sort_by(|a, b| a.next_date.cmp(&b.next_date).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    /// Monthly income, expenses, and net implied by a user's schedule
    pub fn recurring_totals(&self, user_id: &str) -> Result<RecurringTotals> {
        let inner = self.read()?;
        Ok(RecurringTotals::from_items(
            inner.recurring.iter().filter(|r| r.user_id == user_id),
        ))
    }

    /// Record the due occurrence as a transaction dated on its `next_date`,
    /// then move the schedule forward by one period
    pub fn post_recurring(&self, id: i64) -> Result<(Transaction, RecurringTransaction)> {
        let mut inner = self.write()?;
        let index = inner
            .recurring
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("recurring transaction {}", id)))?;

        let item = inner.recurring[index].clone();
        let following = item
            .frequency
            .next_occurrence(item.next_date)
            .ok_or_else(|| Error::InvalidData("next date is out of range".to_string()))?;

        let description = if item.description.is_empty() {
            item.name.clone()
        } else {
            item.description.clone()
        };
        let transaction = inner.record_transaction(
            &item.user_id,
            NewTransaction {
                amount: item.amount,
                category: item.category.clone(),
                description,
                date: Some(item.next_date),
                kind: item.kind,
            },
        )?;

        let recurring = &mut inner.recurring[index];
        recurring.next_date = following;
        tracing::debug!(id, next = %following, "Posted recurring transaction");
        Ok((transaction, recurring.clone()))
    }

    pub fn delete_recurring(&self, id: i64) -> Result<()> {
        remove_by_id(&mut self.write()?.recurring, id, |r| r.id, "recurring transaction")
    }
}

fn remove_by_id<T>(
    items: &mut Vec<T>,
    id: i64,
    item_id: impl Fn(&T) -> i64,
    what: &str,
) -> Result<()> {
    let before = items.len();
    items.retain(|item| item_id(item) != id);
    if items.len() == before {
        return Err(Error::NotFound(format!("{} {}", what, id)));
    }
    Ok(())
}

#[async_trait]
impl SnapshotProvider for MemoryStore {
    async fn get_financial_snapshot(&self, user_id: &str) -> Result<FinancialSnapshot> {
        self.get_profile(user_id)?
            .map(|p| p.financial_summary)
            .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))
    }

    async fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        if self.get_profile(user_id)?.is_none() {
            return Err(Error::NotFound(format!("user {}", user_id)));
        }
        self.list_goals(user_id, true)
    }
}
