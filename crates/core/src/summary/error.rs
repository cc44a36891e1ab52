//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Nothing to report on.
    #[error("No transactions found to generate analytics")]
    NoTransactions,
}
