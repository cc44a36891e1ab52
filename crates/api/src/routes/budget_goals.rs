//! Budget goal routes: CRUD, progress against actual spending, summaries.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::cached::cached_json;
use crate::error::{ApiError, ApiResult};
use crate::{AppState, middleware::AuthUser};
use tally_core::budget::{BudgetGoal, BudgetGoalInput, BudgetService, CategoryUsage};
use tally_core::summary::Month;
use tally_db::{BudgetGoalRepository, TransactionRepository};
use tally_shared::AppError;
use tally_shared::types::{BudgetGoalId, UserId};

/// Creates the budget goal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget-goals", get(list_goals).post(create_goal))
        .route("/budget-goals/progress", get(progress))
        .route("/budget-goals/summary/{year}/{month}", get(monthly_summary))
        .route("/budget-goals/categories", get(categories))
        .route("/budget-goals/{id}", put(update_goal).delete(delete_goal))
}

/// Optional month/year narrowing. Months are zero-based.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Zero-based month.
    pub month: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
}

fn goals_repo(state: &AppState) -> BudgetGoalRepository {
    BudgetGoalRepository::new((*state.db).clone())
}

async fn load_goals(
    state: &AppState,
    owner: UserId,
    month: Option<u32>,
    year: Option<i32>,
) -> ApiResult<Vec<BudgetGoal>> {
    let rows = goals_repo(state).list(owner, month, year).await?;
    Ok(rows.into_iter().map(BudgetGoal::from).collect())
}

/// GET /budget-goals - Goals of the user, optionally for one month/year.
async fn list_goals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<BudgetGoal>>> {
    let goals = load_goals(&state, auth.user_id(), query.month, query.year).await?;
    Ok(Json(goals))
}

/// POST /budget-goals - Create a goal; one per category and month.
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BudgetGoalInput>,
) -> ApiResult<(StatusCode, Json<BudgetGoal>)> {
    let owner = auth.user_id();
    let input = BudgetService::validate_input(payload)?;

    let existing = load_goals(&state, owner, Some(input.month), Some(input.year)).await?;
    let input = BudgetService::validate_new_goal(&existing, input)?;

    let created = goals_repo(&state).create(owner, &input).await?;
    state.cache.invalidate_owner(owner);

    info!(
        user_id = %owner,
        goal_id = %created.id,
        category = %input.category,
        "Budget goal created"
    );
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /budget-goals/{id} - Replace the fields of an owned goal.
async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BudgetGoalInput>,
) -> ApiResult<Json<BudgetGoal>> {
    let owner = auth.user_id();
    let id = BudgetGoalId::from_uuid(id);
    let input = BudgetService::validate_input(payload)?;

    let existing = load_goals(&state, owner, None, None).await?;
    let input = BudgetService::validate_goal_update(&existing, id, input)?;

    let updated = goals_repo(&state).update(owner, id, &input).await?;
    state.cache.invalidate_owner(owner);

    info!(user_id = %owner, goal_id = %id, "Budget goal updated");
    Ok(Json(updated.into()))
}

/// DELETE /budget-goals/{id} - Remove an owned goal.
async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();

    if !goals_repo(&state)
        .delete(owner, BudgetGoalId::from_uuid(id))
        .await?
    {
        return Err(AppError::NotFound("Budget goal not found".into()).into());
    }
    state.cache.invalidate_owner(owner);

    info!(user_id = %owner, goal_id = %id, "Budget goal deleted");
    Ok(Json(json!({ "message": "Budget goal deleted successfully" })))
}

/// GET /budget-goals/progress - Goals joined with actual spending.
///
/// Defaults to the current month when `month` or `year` is missing.
async fn progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();
    let current = Month::of(Utc::now().date_naive());
    let month = query.month.unwrap_or(current.month0);
    let year = query.year.unwrap_or(current.year);
    let period = BudgetService::validate_period(month, year)?;
    let key = state.cache.key(owner, "budget_goals.progress", &period);

    cached_json(&state.cache, key, || async {
        let goals = load_goals(&state, owner, Some(month), Some(year)).await?;
        let spending = TransactionRepository::new((*state.db).clone())
            .monthly_expenses_by_category(owner, period)
            .await?;
        Ok::<_, ApiError>(BudgetService::match_progress(&goals, &spending, month, year))
    })
    .await
}

/// GET /budget-goals/summary/{year}/{month} - Totals for one month.
async fn monthly_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();
    let period = BudgetService::validate_period(month, year)?;
    let key = state.cache.key(owner, "budget_goals.summary", &period);

    cached_json(&state.cache, key, || async {
        let goals = load_goals(&state, owner, Some(month), Some(year)).await?;
        let spending = TransactionRepository::new((*state.db).clone())
            .monthly_expenses_by_category(owner, period)
            .await?;
        Ok::<_, ApiError>(BudgetService::monthly_summary(&goals, &spending, month, year)?)
    })
    .await
}

/// GET /budget-goals/categories - Expense categories, most used first.
async fn categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CategoryUsage>>> {
    let usage = TransactionRepository::new((*state.db).clone())
        .expense_category_usage(auth.user_id())
        .await?;
    Ok(Json(usage))
}
