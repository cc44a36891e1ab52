//! Report data types.
//!
//! Everything here is plain serializable data so the same tree can be
//! rendered as JSON or laid out by an export renderer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expense: Decimal,
    /// `income - expense`.
    pub net_balance: Decimal,
    /// Number of transactions in the period.
    pub count: u64,
    /// Mean absolute amount per transaction, two decimals.
    pub avg_transaction: Decimal,
    /// Share of income not spent in percent, two decimals.
    pub savings_rate: Decimal,
}

/// The four standard reporting windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Periods {
    /// Every transaction.
    pub all_time: PeriodStats,
    /// From the first day of the current month.
    pub this_month: PeriodStats,
    /// The whole previous month.
    pub last_month: PeriodStats,
    /// From January 1st of the current year.
    pub this_year: PeriodStats,
}

/// Per-category totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Category label.
    pub category: String,
    /// Income recorded under the category.
    pub income: Decimal,
    /// Expense recorded under the category.
    pub expense: Decimal,
    /// Number of transactions, both kinds.
    pub count: u64,
}

/// One month of the trailing trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Short month name, e.g. `"Jan"`.
    pub month: String,
    /// Calendar year of the bucket.
    pub year: i32,
    /// Zero-based month of the bucket.
    pub month_index: u32,
    /// Totals for the bucket.
    #[serde(flatten)]
    pub stats: PeriodStats,
}

/// Entry of a top-category ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCategory {
    /// Category label.
    pub category: String,
    /// Income or expense total, depending on the ranking.
    pub amount: Decimal,
    /// Total transactions in the category.
    pub count: u64,
}

/// Name/value pair used by chart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    /// Category label.
    pub name: String,
    /// Aggregated amount.
    pub value: Decimal,
}

/// Income, expense and net for a month, as shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Sum of income.
    pub income: Decimal,
    /// Sum of expenses.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net_balance: Decimal,
}

/// Dashboard statistics: all-time totals plus current and previous month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStats {
    /// All-time income.
    pub total_income_all_time: Decimal,
    /// All-time expenses.
    pub total_expenses_all_time: Decimal,
    /// All-time net.
    pub net_balance_all_time: Decimal,
    /// Number of transactions.
    pub transaction_count: u64,
    /// Calendar month containing the reference date.
    pub current_month: MonthTotals,
    /// The month before.
    pub previous_month: MonthTotals,
}

/// Complete analytics report for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Standard windows.
    pub periods: Periods,
    /// Totals per category in first-seen order.
    pub category_breakdown: Vec<CategoryTotals>,
    /// Twelve months ending with the current one, oldest first.
    pub monthly_trends: Vec<TrendPoint>,
    /// Up to five categories with the highest expense.
    pub top_expense_categories: Vec<RankedCategory>,
    /// Up to five categories with the highest income.
    pub top_income_categories: Vec<RankedCategory>,
    /// Human-readable observations.
    pub insights: Vec<String>,
    /// Reference instant the report was computed for.
    pub report_date: DateTime<Utc>,
    /// Number of transactions in the input.
    pub total_transactions: u64,
}
