//! Budget matching and goal validation.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use tally_shared::types::BudgetGoalId;

use super::error::BudgetError;
use super::types::{
    BudgetGoal, BudgetGoalInput, BudgetProgressReport, BudgetProgressSummary, CategoryProgress,
    CategorySpend, MonthlyBudgetSummary, ProgressStatus,
};
use crate::summary::Month;
use crate::summary::ratio::{percentage_of, saturating_sum};
use crate::transaction::{Transaction, TransactionError, TransactionKind, TransactionService};

/// Earliest year a goal can be set for.
pub const MIN_GOAL_YEAR: i32 = 2000;

const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Classifies a usage percentage.
    ///
    /// Both thresholds are exclusive: exactly 80% is good and exactly 100%
    /// is a warning.
    #[must_use]
    pub fn classify(percentage_used: Decimal) -> ProgressStatus {
        if percentage_used > Decimal::ONE_HUNDRED {
            ProgressStatus::Over
        } else if percentage_used > WARNING_THRESHOLD {
            ProgressStatus::Warning
        } else {
            ProgressStatus::Good
        }
    }

    /// Sums the expenses of `month`/`year` per category.
    #[must_use]
    pub fn actual_spending(
        transactions: &[Transaction],
        month: u32,
        year: i32,
    ) -> BTreeMap<String, CategorySpend> {
        let mut spending: BTreeMap<String, CategorySpend> = BTreeMap::new();
        let Some(period) = Month::new(year, month) else {
            return spending;
        };

        for tx in transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && period.contains(t.occurred_on))
        {
            let entry = spending.entry(tx.category.clone()).or_default();
            entry.spent = entry.spent.saturating_add(tx.amount);
            entry.count += 1;
        }

        spending
    }

    /// Joins goals with actual spending for one month.
    ///
    /// Goals for other months are ignored. Goal entries keep their input
    /// order; categories with spending but no goal follow in category
    /// order with a fixed 100% usage.
    #[must_use]
    pub fn match_progress(
        goals: &[BudgetGoal],
        actual_by_category: &BTreeMap<String, CategorySpend>,
        month: u32,
        year: i32,
    ) -> BudgetProgressReport {
        let month_goals: Vec<&BudgetGoal> = goals
            .iter()
            .filter(|g| g.month == month && g.year == year)
            .collect();
        let budgeted: HashSet<&str> = month_goals.iter().map(|g| g.category.as_str()).collect();

        let mut progress: Vec<CategoryProgress> = month_goals
            .iter()
            .map(|goal| {
                let actual = actual_by_category
                    .get(&goal.category)
                    .copied()
                    .unwrap_or_default();
                let percentage = percentage_of(actual.spent, goal.target_amount);

                CategoryProgress {
                    goal_id: Some(goal.id),
                    category: goal.category.clone(),
                    budget_amount: goal.target_amount,
                    actual_spent: actual.spent,
                    remaining: goal.target_amount.saturating_sub(actual.spent),
                    percentage_used: percentage,
                    transaction_count: actual.count,
                    status: Self::classify(percentage),
                    month: goal.month,
                    year: goal.year,
                    has_budget: true,
                }
            })
            .collect();

        let unbudgeted: Vec<CategoryProgress> = actual_by_category
            .iter()
            .filter(|(category, _)| !budgeted.contains(category.as_str()))
            .map(|(category, actual)| CategoryProgress {
                goal_id: None,
                category: category.clone(),
                budget_amount: Decimal::ZERO,
                actual_spent: actual.spent,
                remaining: -actual.spent,
                percentage_used: Decimal::ONE_HUNDRED,
                transaction_count: actual.count,
                status: ProgressStatus::NoBudget,
                month,
                year,
                has_budget: false,
            })
            .collect();

        let total_budget = saturating_sum(month_goals.iter().map(|g| g.target_amount));
        let total_spent = saturating_sum(actual_by_category.values().map(|a| a.spent));

        let summary = BudgetProgressSummary {
            total_budget,
            total_spent,
            total_remaining: total_budget.saturating_sub(total_spent),
            overall_percentage_used: percentage_of(total_spent, total_budget),
            categories_count: month_goals.len() as u64,
            categories_without_budget_count: unbudgeted.len() as u64,
        };

        progress.extend(unbudgeted);

        BudgetProgressReport {
            budget_progress: progress,
            summary,
            month,
            year,
        }
    }

    /// Short totals for a month with a display name.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidMonth` or `InvalidYear` for an
    /// unsupported period.
    pub fn monthly_summary(
        goals: &[BudgetGoal],
        actual_by_category: &BTreeMap<String, CategorySpend>,
        month: u32,
        year: i32,
    ) -> Result<MonthlyBudgetSummary, BudgetError> {
        let period = Self::validate_period(month, year)?;
        let month_goals: Vec<&BudgetGoal> = goals
            .iter()
            .filter(|g| g.month == month && g.year == year)
            .collect();

        Ok(MonthlyBudgetSummary {
            total_budget: saturating_sum(month_goals.iter().map(|g| g.target_amount)),
            total_spent: saturating_sum(actual_by_category.values().map(|a| a.spent)),
            goals_count: month_goals.len() as u64,
            month,
            year,
            month_name: period.long_label(),
        })
    }

    /// Checks that a month/year pair can carry goals.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidMonth` or `InvalidYear`.
    pub fn validate_period(month: u32, year: i32) -> Result<Month, BudgetError> {
        if year < MIN_GOAL_YEAR {
            return Err(BudgetError::InvalidYear {
                year,
                min: MIN_GOAL_YEAR,
            });
        }
        Month::new(year, month).ok_or(BudgetError::InvalidMonth(month))
    }

    /// Validates goal fields and returns them with a trimmed category.
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` describing the first broken rule.
    pub fn validate_input(input: BudgetGoalInput) -> Result<BudgetGoalInput, BudgetError> {
        let category =
            TransactionService::normalize_category(&input.category).map_err(|e| match e {
                TransactionError::CategoryTooLong { max } => BudgetError::CategoryTooLong { max },
                _ => BudgetError::EmptyCategory,
            })?;
        TransactionService::validate_amount(input.target_amount).map_err(|e| match e {
            TransactionError::AmountTooPrecise { max_scale } => {
                BudgetError::AmountTooPrecise { max_scale }
            }
            TransactionError::AmountTooLarge { limit } => BudgetError::AmountTooLarge { limit },
            _ => BudgetError::NegativeAmount(input.target_amount),
        })?;
        Self::validate_period(input.month, input.year)?;

        Ok(BudgetGoalInput { category, ..input })
    }

    /// Validates a new goal against the owner's existing goals.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::DuplicateGoal` when a goal for the same
    /// category, month and year already exists, or a field error.
    pub fn validate_new_goal(
        existing: &[BudgetGoal],
        input: BudgetGoalInput,
    ) -> Result<BudgetGoalInput, BudgetError> {
        let input = Self::validate_input(input)?;
        Self::ensure_unique(existing, &input, None)?;
        Ok(input)
    }

    /// Validates a replacement of goal `id`; the goal may keep its own slot.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if `id` is not among `existing`,
    /// `DuplicateGoal` if the new slot is taken by another goal, or a
    /// field error.
    pub fn validate_goal_update(
        existing: &[BudgetGoal],
        id: BudgetGoalId,
        input: BudgetGoalInput,
    ) -> Result<BudgetGoalInput, BudgetError> {
        if !existing.iter().any(|g| g.id == id) {
            return Err(BudgetError::NotFound(id));
        }
        let input = Self::validate_input(input)?;
        Self::ensure_unique(existing, &input, Some(id))?;
        Ok(input)
    }

    fn ensure_unique(
        existing: &[BudgetGoal],
        input: &BudgetGoalInput,
        skip: Option<BudgetGoalId>,
    ) -> Result<(), BudgetError> {
        let taken = existing.iter().any(|g| {
            Some(g.id) != skip
                && g.category == input.category
                && g.month == input.month
                && g.year == input.year
        });

        if taken {
            return Err(BudgetError::DuplicateGoal {
                category: input.category.clone(),
                month: input.month,
                year: input.year,
            });
        }
        Ok(())
    }
}
