//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `transaction_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<tally_core::transaction::TransactionKind> for TransactionKind {
    fn from(kind: tally_core::transaction::TransactionKind) -> Self {
        match kind {
            tally_core::transaction::TransactionKind::Income => Self::Income,
            tally_core::transaction::TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionKind> for tally_core::transaction::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}
