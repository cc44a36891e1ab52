//! Conversion of domain errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tally_core::auth::{PasswordError, RegistrationError};
use tally_core::budget::BudgetError;
use tally_core::summary::ReportError;
use tally_core::transaction::TransactionError;
use tally_db::{BudgetGoalRepoError, UserRepoError};
use tally_shared::{AppError, JwtError};
use tracing::error;

/// Error returned by handlers, rendered as `{"error", "message"}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Export(_) | TransactionError::Io(_) => {
                Self(AppError::Internal(err.to_string()))
            }
            _ => Self(AppError::Validation(err.to_string())),
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) => Self(AppError::NotFound("Budget goal not found".into())),
            BudgetError::DuplicateGoal { .. } => Self(AppError::Conflict(
                "Budget goal already exists for this category and month".into(),
            )),
            _ => Self(AppError::Validation(err.to_string())),
        }
    }
}

impl From<BudgetGoalRepoError> for ApiError {
    fn from(err: BudgetGoalRepoError) -> Self {
        match err {
            BudgetGoalRepoError::Duplicate { .. } => Self(AppError::Conflict(
                "Budget goal already exists for this category and month".into(),
            )),
            BudgetGoalRepoError::NotFound(_) => {
                Self(AppError::NotFound("Budget goal not found".into()))
            }
            BudgetGoalRepoError::Database(e) => e.into(),
        }
    }
}

impl From<UserRepoError> for ApiError {
    fn from(err: UserRepoError) -> Self {
        match err {
            UserRepoError::Duplicate => Self(AppError::Conflict("User already exists".into())),
            UserRepoError::Database(e) => e.into(),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(AppError::NotFound(format!("{err}.")))
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

/// Shorthand for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tally_shared::types::BudgetGoalId;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(BudgetError::NotFound(BudgetGoalId::new()), StatusCode::NOT_FOUND)]
    #[case(
        BudgetError::DuplicateGoal { category: "Food".into(), month: 1, year: 2024 },
        StatusCode::CONFLICT
    )]
    #[case(BudgetError::InvalidMonth(12), StatusCode::BAD_REQUEST)]
    #[case(BudgetError::EmptyCategory, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn test_budget_error_status(#[case] err: BudgetError, #[case] status: StatusCode) {
        let (actual, _) = body_json(err.into()).await;
        assert_eq!(actual, status);
    }

    #[tokio::test]
    async fn test_duplicate_user_is_conflict() {
        let (status, body) = body_json(UserRepoError::Duplicate.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn test_report_error_is_not_found() {
        let (status, body) = body_json(ReportError::NoTransactions.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "No transactions found to generate analytics.");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let err: ApiError = DbErr::Custom("password=hunter2".into()).into();
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An error occurred");
    }
}
