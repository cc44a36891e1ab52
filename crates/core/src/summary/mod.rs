//! Financial summary and analytics.
//!
//! Pure aggregation over one user's transactions:
//! - Period totals (all time, this month, last month, this year)
//! - Category breakdown and top-category rankings
//! - Trailing twelve-month trend
//! - Month-over-month and savings insights
//!
//! The reference date is always passed in; nothing here reads the clock.

pub mod error;
pub mod insights;
pub mod period;
pub mod ratio;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use insights::{SavingsTier, generate_insights};
pub use period::Month;
pub use service::SummaryService;
pub use types::*;
