//! Budget goal repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tally_core::budget::BudgetGoalInput;
use tally_shared::types::{BudgetGoalId, UserId};
use thiserror::Error;
use tracing::warn;

use crate::entities::budget_goals;

/// Errors from budget goal persistence.
#[derive(Debug, Error)]
pub enum BudgetGoalRepoError {
    /// Another goal already covers this (category, month, year).
    #[error("Budget goal already exists for {category} (month {month}, year {year})")]
    Duplicate {
        /// Category name.
        category: String,
        /// Zero-based month.
        month: u32,
        /// Year.
        year: i32,
    },

    /// The goal does not exist for this owner.
    #[error("Budget goal not found: {0}")]
    NotFound(BudgetGoalId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl BudgetGoalRepoError {
    fn from_write(err: DbErr, input: &BudgetGoalInput) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            Self::Duplicate {
                category: input.category.clone(),
                month: input.month,
                year: input.year,
            }
        } else {
            Self::Database(err)
        }
    }
}

/// Budget goal repository scoped by owner.
#[derive(Debug, Clone)]
pub struct BudgetGoalRepository {
    db: DatabaseConnection,
}

impl BudgetGoalRepository {
    /// Creates a new budget goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists goals of `owner`, optionally narrowed to a month and/or year.
    ///
    /// Ordered by year and month descending, then category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        owner: UserId,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<budget_goals::Model>, DbErr> {
        let mut query = budget_goals::Entity::find()
            .filter(budget_goals::Column::UserId.eq(owner.into_inner()));

        if let Some(month) = month.and_then(|m| i32::try_from(m).ok()) {
            query = query.filter(budget_goals::Column::Month.eq(month));
        }
        if let Some(year) = year {
            query = query.filter(budget_goals::Column::Year.eq(year));
        }

        query
            .order_by_desc(budget_goals::Column::Year)
            .order_by_desc(budget_goals::Column::Month)
            .order_by_asc(budget_goals::Column::Category)
            .all(&self.db)
            .await
    }

    /// Finds a goal owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        owner: UserId,
        id: BudgetGoalId,
    ) -> Result<Option<budget_goals::Model>, DbErr> {
        budget_goals::Entity::find_by_id(id.into_inner())
            .filter(budget_goals::Column::UserId.eq(owner.into_inner()))
            .one(&self.db)
            .await
    }

    /// Inserts a validated goal.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if the unique (owner, category, month, year) index
    /// rejects the row, or a database error.
    pub async fn create(
        &self,
        owner: UserId,
        input: &BudgetGoalInput,
    ) -> Result<budget_goals::Model, BudgetGoalRepoError> {
        let now = Utc::now().into();
        let model = budget_goals::ActiveModel {
            id: Set(BudgetGoalId::new().into_inner()),
            user_id: Set(owner.into_inner()),
            category: Set(input.category.clone()),
            amount: Set(input.target_amount),
            month: Set(month_column(input.month)),
            year: Set(input.year),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(|e| {
            warn!(error = %e, category = %input.category, "budget goal insert rejected");
            BudgetGoalRepoError::from_write(e, input)
        })
    }

    /// Replaces every field of an existing goal.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the goal does not belong to `owner`, `Duplicate`
    /// if the new key collides with another goal, or a database error.
    pub async fn update(
        &self,
        owner: UserId,
        id: BudgetGoalId,
        input: &BudgetGoalInput,
    ) -> Result<budget_goals::Model, BudgetGoalRepoError> {
        let existing = self
            .find(owner, id)
            .await?
            .ok_or(BudgetGoalRepoError::NotFound(id))?;

        let mut active: budget_goals::ActiveModel = existing.into();
        active.category = Set(input.category.clone());
        active.amount = Set(input.target_amount);
        active.month = Set(month_column(input.month));
        active.year = Set(input.year);
        active.updated_at = Set(Utc::now().into());

        active
            .update(&self.db)
            .await
            .map_err(|e| BudgetGoalRepoError::from_write(e, input))
    }

    /// Deletes a goal owned by `owner`. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, owner: UserId, id: BudgetGoalId) -> Result<bool, DbErr> {
        let result = budget_goals::Entity::delete_many()
            .filter(budget_goals::Column::Id.eq(id.into_inner()))
            .filter(budget_goals::Column::UserId.eq(owner.into_inner()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

// validated months are 0..=11
fn month_column(month: u32) -> i32 {
    i32::try_from(month).unwrap_or_default()
}
