//! Financial summary computation.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::insights::generate_insights;
use super::period::Month;
use super::ratio::{percentage_of, safe_div};
use super::types::{
    CategoryTotals, FinancialSummary, MonthTotals, NamedValue, PeriodStats, Periods, QuickStats,
    RankedCategory, TrendPoint,
};
use crate::transaction::{Transaction, TransactionKind};

/// Number of monthly buckets in the trend.
pub const TREND_MONTHS: i32 = 12;

/// Length of each top-category ranking.
pub const TOP_CATEGORIES: usize = 5;

/// Service for aggregating a user's transactions into reports.
pub struct SummaryService;

impl SummaryService {
    /// Totals a set of transactions.
    ///
    /// Averages and savings rate are zero when their denominator is zero.
    /// Totals saturate at `Decimal::MAX`; ratios are not rounded.
    #[must_use]
    pub fn compute_period_stats<'a, I>(transactions: I) -> PeriodStats
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        let mut count: u64 = 0;

        for tx in transactions {
            match tx.kind {
                TransactionKind::Income => income = income.saturating_add(tx.amount),
                TransactionKind::Expense => expense = expense.saturating_add(tx.amount),
            }
            count += 1;
        }

        PeriodStats {
            income,
            expense,
            net_balance: income.saturating_sub(expense),
            count,
            avg_transaction: safe_div(income.saturating_add(expense), Decimal::from(count)),
            savings_rate: percentage_of(income.saturating_sub(expense), income),
        }
    }

    /// Builds the full analytics report relative to `now`.
    ///
    /// The result depends only on the input list and `now`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoTransactions` for an empty list.
    pub fn compute_financial_summary(
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<FinancialSummary, ReportError> {
        if transactions.is_empty() {
            return Err(ReportError::NoTransactions);
        }

        let today = now.date_naive();
        let current = Month::of(today);
        let previous = current.previous();

        let this_month = Self::compute_period_stats(
            transactions
                .iter()
                .filter(|t| current.starts_on_or_before(t.occurred_on)),
        );
        let last_month =
            Self::compute_period_stats(transactions.iter().filter(|t| previous.contains(t.occurred_on)));
        let this_year = Self::compute_period_stats(
            transactions
                .iter()
                .filter(|t| t.occurred_on.year() >= today.year()),
        );

        let category_breakdown = Self::category_breakdown(transactions);
        let top_expense_categories =
            Self::top_categories(&category_breakdown, |c| c.expense, TOP_CATEGORIES);
        let top_income_categories =
            Self::top_categories(&category_breakdown, |c| c.income, TOP_CATEGORIES);
        let insights = generate_insights(&this_month, &last_month);

        Ok(FinancialSummary {
            periods: Periods {
                all_time: Self::compute_period_stats(transactions),
                this_month,
                last_month,
                this_year,
            },
            category_breakdown,
            monthly_trends: Self::monthly_trend(transactions, today),
            top_expense_categories,
            top_income_categories,
            insights,
            report_date: now,
            total_transactions: transactions.len() as u64,
        })
    }

    /// Groups transactions by category in first-encountered order.
    #[must_use]
    pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryTotals>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotals> = Vec::new();

        for tx in transactions {
            let slot = *index.entry(tx.category.as_str()).or_insert_with(|| {
                totals.push(CategoryTotals {
                    category: tx.category.clone(),
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                    count: 0,
                });
                totals.len() - 1
            });

            let entry = &mut totals[slot];
            match tx.kind {
                TransactionKind::Income => entry.income = entry.income.saturating_add(tx.amount),
                TransactionKind::Expense => {
                    entry.expense = entry.expense.saturating_add(tx.amount);
                }
            }
            entry.count += 1;
        }

        totals
    }

    /// Twelve monthly buckets ending with the month of `today`, oldest first.
    ///
    /// Months without transactions still appear with zero totals.
    #[must_use]
    pub fn monthly_trend(transactions: &[Transaction], today: NaiveDate) -> Vec<TrendPoint> {
        let current = Month::of(today);

        (0..TREND_MONTHS)
            .rev()
            .map(|back| {
                let bucket = current.offset(-back);
                TrendPoint {
                    month: bucket.short_name().to_string(),
                    year: bucket.year,
                    month_index: bucket.month0,
                    stats: Self::compute_period_stats(
                        transactions.iter().filter(|t| bucket.contains(t.occurred_on)),
                    ),
                }
            })
            .collect()
    }

    /// Ranks categories by `amount_of`, descending, skipping zero amounts.
    ///
    /// Ties keep the order of `breakdown` (the sort is stable).
    #[must_use]
    pub fn top_categories<F>(
        breakdown: &[CategoryTotals],
        amount_of: F,
        limit: usize,
    ) -> Vec<RankedCategory>
    where
        F: Fn(&CategoryTotals) -> Decimal,
    {
        let mut ranked: Vec<RankedCategory> = breakdown
            .iter()
            .filter(|c| amount_of(c) > Decimal::ZERO)
            .map(|c| RankedCategory {
                category: c.category.clone(),
                amount: amount_of(c),
                count: c.count,
            })
            .collect();

        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked.truncate(limit);
        ranked
    }

    /// Expense totals per category for charts, in first-encountered order.
    #[must_use]
    pub fn expense_by_category(transactions: &[Transaction]) -> Vec<NamedValue> {
        Self::category_breakdown(
            transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense),
        )
        .into_iter()
        .map(|c| NamedValue {
            name: c.category,
            value: c.expense,
        })
        .collect()
    }

    /// All-time totals plus the whole current and previous calendar month.
    #[must_use]
    pub fn quick_stats(transactions: &[Transaction], today: NaiveDate) -> QuickStats {
        let current = Month::of(today);
        let previous = current.previous();

        let all_time = Self::compute_period_stats(transactions);
        let month_totals = |month: Month| {
            let stats = Self::compute_period_stats(
                transactions.iter().filter(|t| month.contains(t.occurred_on)),
            );
            MonthTotals {
                income: stats.income,
                expenses: stats.expense,
                net_balance: stats.net_balance,
            }
        };

        QuickStats {
            total_income_all_time: all_time.income,
            total_expenses_all_time: all_time.expense,
            net_balance_all_time: all_time.net_balance,
            transaction_count: all_time.count,
            current_month: month_totals(current),
            previous_month: month_totals(previous),
        }
    }
}
