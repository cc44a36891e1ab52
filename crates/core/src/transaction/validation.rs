//! Write-side validation for transactions.

use rust_decimal::Decimal;

use super::error::TransactionError;
use super::types::{CreateTransactionInput, UpdateTransactionInput};

/// Maximum category length in characters.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Maximum number of decimal places an amount may carry.
///
/// Amounts are stored as `NUMERIC(19,4)`.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Exclusive upper bound on an amount's magnitude (10^15).
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Transaction service for business rules.
pub struct TransactionService;

impl TransactionService {
    /// Validates a new transaction and returns it with a trimmed category
    /// and a blank description dropped.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::EmptyCategory`, `CategoryTooLong`,
    /// `NegativeAmount`, `AmountTooPrecise` or `AmountTooLarge` when the
    /// input breaks a rule.
    pub fn validate_create(
        input: CreateTransactionInput,
    ) -> Result<CreateTransactionInput, TransactionError> {
        let category = Self::normalize_category(&input.category)?;
        Self::validate_amount(input.amount)?;

        Ok(CreateTransactionInput {
            category,
            note: Self::normalize_note(input.note),
            ..input
        })
    }

    /// Validates a partial update, normalizing the fields it carries.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::EmptyUpdate` when nothing would change,
    /// or the same field errors as [`Self::validate_create`].
    pub fn validate_update(
        input: UpdateTransactionInput,
    ) -> Result<UpdateTransactionInput, TransactionError> {
        if input.is_empty() {
            return Err(TransactionError::EmptyUpdate);
        }

        let category = input
            .category
            .as_deref()
            .map(Self::normalize_category)
            .transpose()?;
        if let Some(amount) = input.amount {
            Self::validate_amount(amount)?;
        }

        Ok(UpdateTransactionInput {
            category,
            ..input
        })
    }

    /// Trims a category and checks it is non-empty and not too long.
    ///
    /// Categories are compared with exact string equality everywhere else,
    /// so surrounding whitespace is removed before anything is stored.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::EmptyCategory` or `CategoryTooLong`.
    pub fn normalize_category(category: &str) -> Result<String, TransactionError> {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            return Err(TransactionError::EmptyCategory);
        }
        if trimmed.chars().count() > MAX_CATEGORY_LEN {
            return Err(TransactionError::CategoryTooLong {
                max: MAX_CATEGORY_LEN,
            });
        }
        Ok(trimmed.to_string())
    }

    /// Checks that an amount is non-negative and fits the stored column.
    ///
    /// Trailing zeros do not count towards the scale, so `12.50000` passes.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NegativeAmount`, `AmountTooPrecise` or
    /// `AmountTooLarge`.
    pub fn validate_amount(amount: Decimal) -> Result<(), TransactionError> {
        if amount < Decimal::ZERO {
            return Err(TransactionError::NegativeAmount(amount));
        }
        if amount.normalize().scale() > MAX_AMOUNT_SCALE {
            return Err(TransactionError::AmountTooPrecise {
                max_scale: MAX_AMOUNT_SCALE,
            });
        }
        if amount >= AMOUNT_LIMIT {
            return Err(TransactionError::AmountTooLarge {
                limit: AMOUNT_LIMIT,
            });
        }
        Ok(())
    }

    fn normalize_note(note: Option<String>) -> Option<String> {
        note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
    }
}
