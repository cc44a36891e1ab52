//! Transaction error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating or exporting transactions.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Unknown transaction kind.
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),

    /// Category is empty after trimming.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// Category exceeds the maximum length.
    #[error("Category cannot exceed {max} characters")]
    CategoryTooLong {
        /// Maximum allowed length.
        max: usize,
    },

    /// Amount is negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Amount has more decimal places than can be stored.
    #[error("Amount cannot have more than {max_scale} decimal places")]
    AmountTooPrecise {
        /// Maximum number of decimal places.
        max_scale: u32,
    },

    /// Amount is at or above the storable magnitude.
    #[error("Amount must be less than {limit}")]
    AmountTooLarge {
        /// Exclusive upper bound.
        limit: Decimal,
    },

    /// Update request without any field.
    #[error("Update must change at least one field")]
    EmptyUpdate,

    /// Unknown sort field in a list query.
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// `date_from` is after `date_to`.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Start of the range.
        from: NaiveDate,
        /// End of the range.
        to: NaiveDate,
    },

    /// `min_amount` is greater than `max_amount`.
    #[error("Invalid amount range: {min} is greater than {max}")]
    InvalidAmountRange {
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// Writing the CSV export failed.
    #[error("Failed to write export: {0}")]
    Export(#[from] csv::Error),

    /// Flushing the CSV export failed.
    #[error("Failed to flush export: {0}")]
    Io(#[from] std::io::Error),
}
