//! Domain models for Vitals

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time aggregate totals for a user
///
/// Every field defaults to zero when absent from the input document, so a
/// partially loaded profile still scores instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSnapshot {
    /// Monthly income
    pub income: f64,
    /// Monthly expenses
    pub expenses: f64,
    /// Current account balance (may be negative)
    pub balance: f64,
    /// Accumulated savings
    pub savings: f64,
}

impl FinancialSnapshot {
    pub fn new(income: f64, expenses: f64, balance: f64, savings: f64) -> Self {
        Self {
            income,
            expenses,
            balance,
            savings,
        }
    }

    /// Fold a transaction into the running totals.
    ///
    /// Income raises both `income` and `balance`; an expense raises `expenses`
    /// and lowers `balance`. Savings are only ever set explicitly.
    pub fn apply_transaction(&mut self, kind: TransactionType, amount: f64) {
        match kind {
            TransactionType::Income => {
                self.income += amount;
                self.balance += amount;
            }
            TransactionType::Expense => {
                self.expenses += amount;
                self.balance -= amount;
            }
        }
    }
}

/// A user-defined savings target
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub category: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub description: String,
    pub is_completed: bool,
}

impl Goal {
    /// Goal used purely as scoring input
    pub fn with_amounts(current_amount: f64, target_amount: f64) -> Self {
        Self {
            current_amount,
            target_amount,
            ..Default::default()
        }
    }

    /// Fraction of the target reached; 0 when the target is zero or invalid
    pub fn progress(&self) -> f64 {
        if self.target_amount.is_finite()
            && self.target_amount > 0.0
            && self.current_amount.is_finite()
        {
            self.current_amount / self.target_amount
        } else {
            0.0
        }
    }

    /// Add a contribution and re-evaluate completion
    pub fn contribute(&mut self, amount: f64) {
        self.current_amount += amount;
        self.is_completed = self.current_amount >= self.target_amount;
    }
}

/// Payload for creating a goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to today when omitted
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// Filters for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &tx.category != category {
                return false;
            }
        }
        if let Some(from) = self.from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.date > to {
                return false;
            }
        }
        true
    }
}

/// Per-user display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub currency: String,
    pub theme: String,
    pub notifications: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            theme: "light".to_string(),
            notifications: true,
        }
    }
}

/// A user's profile, including the running financial summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub settings: ProfileSettings,
    #[serde(default)]
    pub financial_summary: FinancialSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile with default settings and a zeroed summary
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: email.into(),
            settings: ProfileSettings::default(),
            financial_summary: FinancialSnapshot::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub settings: Option<ProfileSettings>,
    pub savings: Option<f64>,
}

/// How often a budget, subscription, or recurring item repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Multiplier that turns one occurrence into a monthly amount
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::Weekly => 4.33,
            Self::BiWeekly => 2.17,
            Self::Monthly => 1.0,
            Self::Quarterly => 1.0 / 3.0,
            Self::Yearly => 1.0 / 12.0,
        }
    }

    /// Multiplier that turns one occurrence into a yearly amount
    pub fn yearly_factor(&self) -> f64 {
        match self {
            Self::Weekly => 52.0,
            Self::BiWeekly => 26.0,
            Self::Monthly => 12.0,
            Self::Quarterly => 4.0,
            Self::Yearly => 1.0,
        }
    }

    /// Date of the occurrence after `date`.
    ///
    /// Month-based steps clamp to the last day of shorter months, so
    /// Jan 31 monthly becomes Feb 28 (or 29). `None` only on calendar overflow.
    pub fn next_occurrence(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Weekly => date.checked_add_days(Days::new(7)),
            Self::BiWeekly => date.checked_add_days(Days::new(14)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Quarterly => date.checked_add_months(Months::new(3)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "bi-weekly" | "biweekly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending limit for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub period: Frequency,
}

/// Payload for creating a budget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub period: Frequency,
}

/// Partial budget update; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<Frequency>,
}

/// A budget with the expenses recorded against its category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    #[serde(flatten)]
    pub budget: Budget,
    pub spent: f64,
    /// Budgeted minus spent; negative when overspent
    pub remaining: f64,
}

impl BudgetStatus {
    pub fn is_over(&self) -> bool {
        self.spent > self.budget.amount
    }
}

/// All of a user's budgets with their combined totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub budgets: Vec<BudgetStatus>,
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub remaining: f64,
}

/// A recurring paid service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub billing_cycle: Frequency,
    #[serde(default)]
    pub category: String,
    pub next_billing_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Payload for adding a subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub billing_cycle: Frequency,
    #[serde(default)]
    pub category: String,
    pub next_billing_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Normalized subscription cost across every billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTotals {
    pub monthly: f64,
    pub yearly: f64,
}

impl SubscriptionTotals {
    pub fn from_subscriptions<'a>(
        subscriptions: impl IntoIterator<Item = &'a Subscription>,
    ) -> Self {
        subscriptions
            .into_iter()
            .fold(Self::default(), |mut totals, sub| {
                totals.monthly += sub.amount * sub.billing_cycle.monthly_factor();
                totals.yearly += sub.amount * sub.billing_cycle.yearly_factor();
                totals
            })
    }
}

/// A scheduled income or expense that repeats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl RecurringTransaction {
    /// Whole days from `today` until the next occurrence; zero or less means due
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_date - today).num_days()
    }
}

/// Payload for scheduling a recurring transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringTransaction {
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Monthly cash flow implied by a set of recurring transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTotals {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_net: f64,
}

impl RecurringTotals {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a RecurringTransaction>) -> Self {
        let mut totals = Self::default();
        for item in items {
            let monthly = item.amount * item.frequency.monthly_factor();
            match item.kind {
                TransactionType::Income => totals.monthly_income += monthly,
                TransactionType::Expense => totals.monthly_expenses += monthly,
            }
        }
        totals.monthly_net = totals.monthly_income - totals.monthly_expenses;
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_missing_fields_default_to_zero() {
        let snapshot: FinancialSnapshot = serde_json::from_str(r#"{"income": 4200}"#).unwrap();
        assert_eq!(snapshot.income, 4200.0);
        assert_eq!(snapshot.expenses, 0.0);
        assert_eq!(snapshot.balance, 0.0);
        assert_eq!(snapshot.savings, 0.0);
    }

    #[test]
    fn test_apply_transaction() {
        let mut snapshot = FinancialSnapshot::new(1000.0, 200.0, 800.0, 50.0);

        snapshot.apply_transaction(TransactionType::Income, 500.0);
        assert_eq!(snapshot.income, 1500.0);
        assert_eq!(snapshot.balance, 1300.0);

        snapshot.apply_transaction(TransactionType::Expense, 300.0);
        assert_eq!(snapshot.expenses, 500.0);
        assert_eq!(snapshot.balance, 1000.0);
        assert_eq!(snapshot.savings, 50.0);
    }

    #[test]
    fn test_goal_progress_guards_zero_target() {
        assert_eq!(Goal::with_amounts(2500.0, 10000.0).progress(), 0.25);
        assert_eq!(Goal::with_amounts(100.0, 0.0).progress(), 0.0);
        assert_eq!(Goal::with_amounts(100.0, f64::NAN).progress(), 0.0);
    }

    #[test]
    fn test_goal_contribute_completes() {
        let mut goal = Goal::with_amounts(900.0, 1000.0);
        goal.contribute(50.0);
        assert!(!goal.is_completed);
        goal.contribute(50.0);
        assert!(goal.is_completed);
        assert_eq!(goal.current_amount, 1000.0);
    }

    #[test]
    fn test_goal_accepts_scoring_only_fields() {
        let goal: Goal = serde_json::from_str(
            r#"{"currentAmount": 2500, "targetAmount": 10000, "isCompleted": false}"#,
        )
        .unwrap();
        assert_eq!(goal.current_amount, 2500.0);
        assert_eq!(goal.target_amount, 10000.0);
        assert!(goal.name.is_empty());
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!(
            "Income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert!("transfer".parse::<TransactionType>().is_err());
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn test_new_transaction_uses_type_key() {
        let tx: NewTransaction =
            serde_json::from_str(r#"{"amount": 12.5, "type": "expense", "category": "Food"}"#)
                .unwrap();
        assert_eq!(tx.kind, TransactionType::Expense);
        assert!(tx.date.is_none());
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_parsing_and_wire_names() {
        assert_eq!("Bi-Weekly".parse::<Frequency>().unwrap(), Frequency::BiWeekly);
        assert!("daily".parse::<Frequency>().is_err());
        assert_eq!(
            serde_json::to_string(&Frequency::BiWeekly).unwrap(),
            "\"bi-weekly\""
        );
        assert_eq!(Frequency::default(), Frequency::Monthly);
    }

    #[test]
    fn test_next_occurrence() {
        let start = date(2024, 1, 31);
        assert_eq!(Frequency::Weekly.next_occurrence(start), Some(date(2024, 2, 7)));
        assert_eq!(Frequency::BiWeekly.next_occurrence(start), Some(date(2024, 2, 14)));
        assert_eq!(Frequency::Monthly.next_occurrence(start), Some(date(2024, 2, 29)));
        assert_eq!(Frequency::Quarterly.next_occurrence(start), Some(date(2024, 4, 30)));
        assert_eq!(Frequency::Yearly.next_occurrence(start), Some(date(2025, 1, 31)));
    }

    #[test]
    fn test_subscription_totals_normalize_cycles() {
        let sub = |amount: f64, cycle: Frequency| Subscription {
            id: 0,
            user_id: "u1".to_string(),
            name: "svc".to_string(),
            amount,
            billing_cycle: cycle,
            category: String::new(),
            next_billing_date: date(2024, 1, 1),
            description: String::new(),
        };
        let subs = vec![
            sub(10.0, Frequency::Monthly),
            sub(120.0, Frequency::Yearly),
            sub(30.0, Frequency::Quarterly),
        ];

        let totals = SubscriptionTotals::from_subscriptions(&subs);
        assert!((totals.monthly - 30.0).abs() < 1e-9);
        assert!((totals.yearly - 360.0).abs() < 1e-9);

        let weekly = SubscriptionTotals::from_subscriptions(&[sub(10.0, Frequency::Weekly)]);
        assert!((weekly.monthly - 43.3).abs() < 1e-9);
        assert!((weekly.yearly - 520.0).abs() < 1e-9);
    }

    #[test]
    fn test_recurring_totals_split_by_type() {
        let item = |amount: f64, kind: TransactionType, frequency: Frequency| RecurringTransaction {
            id: 0,
            user_id: "u1".to_string(),
            name: "item".to_string(),
            amount,
            kind,
            category: String::new(),
            frequency,
            next_date: date(2024, 1, 10),
            description: String::new(),
            created_at: Utc::now(),
        };
        let items = vec![
            item(1000.0, TransactionType::Income, Frequency::BiWeekly),
            item(1200.0, TransactionType::Expense, Frequency::Monthly),
            item(600.0, TransactionType::Expense, Frequency::Yearly),
        ];

        let totals = RecurringTotals::from_items(&items);
        assert!((totals.monthly_income - 2170.0).abs() < 1e-9);
        assert!((totals.monthly_expenses - 1250.0).abs() < 1e-9);
        assert!((totals.monthly_net - 920.0).abs() < 1e-9);

        assert_eq!(items[0].days_until(date(2024, 1, 7)), 3);
        assert!(items[0].days_until(date(2024, 1, 12)) < 0);
    }

    #[test]
    fn test_budget_status_serializes_flat() {
        let status = BudgetStatus {
            budget: Budget {
                id: 1,
                user_id: "u1".to_string(),
                category: "Food".to_string(),
                amount: 400.0,
                period: Frequency::Monthly,
            },
            spent: 450.0,
            remaining: -50.0,
        };
        assert!(status.is_over());

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["category"], "Food");
        assert_eq!(json["period"], "monthly");
        assert_eq!(json["remaining"], -50.0);
    }

    #[test]
    fn test_profile_defaults() {
        let profile = UserProfile::new("u1", "Ada", "ada@example.com");
        assert_eq!(profile.settings.currency, "USD");
        assert_eq!(profile.settings.theme, "light");
        assert!(profile.settings.notifications);
        assert_eq!(profile.financial_summary, FinancialSnapshot::default());
    }
}
