//! User repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr,
};
use tally_shared::types::UserId;
use thiserror::Error;
use tracing::warn;

use crate::entities::users;

/// Errors from user persistence.
#[derive(Debug, Error)]
pub enum UserRepoError {
    /// The email or username is already registered.
    #[error("User already exists")]
    Duplicate,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl UserRepoError {
    fn from_write(err: DbErr) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            Self::Duplicate
        } else {
            Self::Database(err)
        }
    }
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Finds a user whose email or username equals `identifier`.
    ///
    /// Emails are stored lowercased, so the identifier is lowercased for the
    /// email comparison only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_login(&self, identifier: &str) -> Result<Option<users::Model>, DbErr> {
        let identifier = identifier.trim();
        users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(identifier.to_lowercase()))
                    .add(users::Column::Username.eq(identifier)),
            )
            .one(&self.db)
            .await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserRepoError::Duplicate` when the email or username is
    /// taken, which also covers a concurrent registration that passed
    /// [`Self::exists`] first.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model, UserRepoError> {
        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await.map_err(|err| {
            let err = UserRepoError::from_write(err);
            if matches!(err, UserRepoError::Duplicate) {
                warn!(username, "Rejected duplicate user on insert");
            }
            err
        })
    }

    /// Checks if an email or username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists(&self, email: &str, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(email))
                    .add(users::Column::Username.eq(username)),
            )
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        let err = UserRepoError::from_write(DbErr::Custom("connection reset".into()));
        assert!(matches!(err, UserRepoError::Database(_)));
    }
}
