//! Transaction domain types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{TransactionId, UserId};

use super::error::TransactionError;

/// Direction of a transaction.
///
/// The amount of a transaction is never negative; its kind alone decides
/// whether it adds to income or to expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TransactionError::InvalidKind(other.to_string())),
        }
    }
}

/// A single income or expense record owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Owning user.
    pub owner_id: UserId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Free-form category label.
    pub category: String,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Calendar date the transaction happened on.
    #[serde(rename = "date")]
    pub occurred_on: NaiveDate,
    /// Optional description.
    #[serde(rename = "description")]
    pub note: Option<String>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionInput {
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category label.
    pub category: String,
    /// Amount, must not be negative.
    pub amount: Decimal,
    /// Date of the transaction.
    #[serde(rename = "date")]
    pub occurred_on: NaiveDate,
    /// Optional description.
    #[serde(default, rename = "description")]
    pub note: Option<String>,
}

/// Partial update of a transaction. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionInput {
    /// New kind.
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// New date.
    #[serde(default, rename = "date")]
    pub occurred_on: Option<NaiveDate>,
    /// New description.
    #[serde(default, rename = "description")]
    pub note: Option<String>,
}

impl UpdateTransactionInput {
    /// Returns true when the update carries no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.occurred_on.is_none()
            && self.note.is_none()
    }
}
