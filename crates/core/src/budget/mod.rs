//! Budget goals and budget-versus-actual progress.

pub mod error;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    BudgetGoal, BudgetGoalInput, BudgetProgressReport, BudgetProgressSummary, CategoryProgress,
    CategorySpend, CategoryUsage, MonthlyBudgetSummary, ProgressStatus,
};
