//! Budget goal and progress types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{BudgetGoalId, UserId};

/// A spending ceiling for one category in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGoal {
    /// Unique identifier.
    pub id: BudgetGoalId,
    /// Owning user.
    pub owner_id: UserId,
    /// Category the goal applies to, matched exactly.
    pub category: String,
    /// Target amount.
    #[serde(rename = "amount")]
    pub target_amount: Decimal,
    /// Zero-based month (0 = January).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Fields of a goal supplied on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BudgetGoalInput {
    /// Category label.
    pub category: String,
    /// Target amount, must not be negative.
    #[serde(rename = "amount")]
    pub target_amount: Decimal,
    /// Zero-based month.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Actual expense total of a category for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpend {
    /// Sum of expense amounts.
    pub spent: Decimal,
    /// Number of expense transactions.
    pub count: u64,
}

/// How much of a budget has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    /// At most 80% used.
    Good,
    /// Above 80%, at most 100%.
    Warning,
    /// Above 100%.
    Over,
    /// Spending without a goal.
    NoBudget,
}

/// Budget versus actual for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    /// Goal this entry comes from; absent for spending without a goal.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<BudgetGoalId>,
    /// Category label.
    pub category: String,
    /// Goal target, zero without a goal.
    pub budget_amount: Decimal,
    /// Actual expense total.
    pub actual_spent: Decimal,
    /// `budget_amount - actual_spent`.
    pub remaining: Decimal,
    /// Share of the budget used in percent, two decimals.
    pub percentage_used: Decimal,
    /// Number of expense transactions.
    pub transaction_count: u64,
    /// Status tier.
    pub status: ProgressStatus,
    /// Zero-based month.
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Whether a goal exists for the category.
    pub has_budget: bool,
}

/// Roll-up over all categories of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProgressSummary {
    /// Sum of goal targets.
    pub total_budget: Decimal,
    /// Sum of actual spending over every category.
    pub total_spent: Decimal,
    /// `total_budget - total_spent`.
    pub total_remaining: Decimal,
    /// Overall share used in percent, two decimals.
    pub overall_percentage_used: Decimal,
    /// Number of goals.
    pub categories_count: u64,
    /// Number of spending categories without a goal.
    pub categories_without_budget_count: u64,
}

/// Progress of every category for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProgressReport {
    /// Goal entries first, then categories without a goal.
    pub budget_progress: Vec<CategoryProgress>,
    /// Totals.
    pub summary: BudgetProgressSummary,
    /// Zero-based month.
    pub month: u32,
    /// Year.
    pub year: i32,
}

/// Short budget totals for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudgetSummary {
    /// Sum of goal targets.
    pub total_budget: Decimal,
    /// Sum of expenses in the month.
    pub total_spent: Decimal,
    /// Number of goals.
    pub goals_count: u64,
    /// Zero-based month.
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Display name, e.g. `"February 2024"`.
    pub month_name: String,
}

/// How often an expense category has been used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Category label.
    pub category: String,
    /// Number of expense transactions.
    pub transaction_count: u64,
}
