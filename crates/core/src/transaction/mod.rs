//! Income and expense transactions.
//!
//! Transactions are the raw input of every report. This module holds the
//! domain types, write-side validation, list filters and CSV export.

pub mod error;
pub mod export;
pub mod filter;
pub mod types;
pub mod validation;

pub use error::TransactionError;
pub use export::{to_csv_bytes, write_csv};
pub use filter::{SortField, SortOrder, TransactionFilter};
pub use types::{
    CreateTransactionInput, Transaction, TransactionKind, UpdateTransactionInput,
};
pub use validation::{AMOUNT_LIMIT, MAX_AMOUNT_SCALE, TransactionService};
