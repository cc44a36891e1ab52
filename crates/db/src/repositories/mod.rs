//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query on user data is scoped to the owning user.

pub mod budget_goal;
pub mod transaction;
pub mod user;

pub use budget_goal::{BudgetGoalRepoError, BudgetGoalRepository};
pub use transaction::TransactionRepository;
pub use user::{UserRepoError, UserRepository};
