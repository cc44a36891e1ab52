//! Budget error types.

use rust_decimal::Decimal;
use thiserror::Error;

use tally_shared::types::BudgetGoalId;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budget goal not found.
    #[error("Budget goal not found: {0}")]
    NotFound(BudgetGoalId),

    /// A goal already exists for this category and month.
    #[error("Budget goal for {category} in {month}/{year} already exists")]
    DuplicateGoal {
        /// Category of the existing goal.
        category: String,
        /// Zero-based month.
        month: u32,
        /// Year.
        year: i32,
    },

    /// Category is empty after trimming.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// Category exceeds the maximum length.
    #[error("Category cannot exceed {max} characters")]
    CategoryTooLong {
        /// Maximum allowed length.
        max: usize,
    },

    /// Target amount cannot be negative.
    #[error("Budget amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Target amount has more decimal places than can be stored.
    #[error("Budget amount cannot have more than {max_scale} decimal places")]
    AmountTooPrecise {
        /// Maximum number of decimal places.
        max_scale: u32,
    },

    /// Target amount is at or above the storable magnitude.
    #[error("Budget amount must be less than {limit}")]
    AmountTooLarge {
        /// Exclusive upper bound.
        limit: Decimal,
    },

    /// Month outside 0..=11.
    #[error("Month must be between 0 and 11, got {0}")]
    InvalidMonth(u32),

    /// Year before the supported range.
    #[error("Year must be {min} or later, got {year}")]
    InvalidYear {
        /// Requested year.
        year: i32,
        /// Earliest supported year.
        min: i32,
    },
}
