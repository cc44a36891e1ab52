//! Transaction routes: CRUD, listing, reports and CSV export.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::cached::cached_json;
use crate::error::{ApiError, ApiResult};
use crate::{AppState, middleware::AuthUser};
use tally_core::summary::SummaryService;
use tally_core::transaction::{
    CreateTransactionInput, SortField, SortOrder, Transaction, TransactionFilter,
    TransactionKind, TransactionService, UpdateTransactionInput, to_csv_bytes,
};
use tally_db::TransactionRepository;
use tally_shared::AppError;
use tally_shared::types::{PageRequest, PageResponse, TransactionId, UserId};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/summary", get(expense_summary))
        .route("/transactions/stats", get(quick_stats))
        .route("/transactions/analytics", get(analytics))
        .route("/transactions/export", get(export_csv))
        .route(
            "/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for listing and exporting transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Substring of description or category.
    pub search: Option<String>,
    /// Earliest date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Smallest amount.
    pub min_amount: Option<Decimal>,
    /// Largest amount.
    pub max_amount: Option<Decimal>,
    /// `date`, `amount`, `category` or `type`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Page number, 1-based. Pagination applies only with `page_size`.
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl ListQuery {
    fn filter(&self) -> ApiResult<TransactionFilter> {
        let kind = non_empty(self.kind.as_deref())
            .map(|k| k.parse::<TransactionKind>())
            .transpose()?;

        let filter = TransactionFilter {
            kind,
            category: non_empty(self.category.as_deref()),
            search: non_empty(self.search.as_deref()),
            date_from: self.date_from,
            date_to: self.date_to,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            sort_by: SortField::parse_or_default(self.sort_by.as_deref()),
            sort_order: SortOrder::parse_or_default(self.sort_order.as_deref()),
        };
        filter.validate()?;
        Ok(filter)
    }

    fn page(&self) -> Option<PageRequest> {
        match (self.page, self.page_size) {
            (Some(page), Some(size)) => Some(PageRequest::new(page, size)),
            _ => None,
        }
    }
}

// browsers send empty strings for unset form fields
fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

#[derive(Serialize)]
#[serde(untagged)]
enum ListResponse {
    All(Vec<Transaction>),
    Page(PageResponse<Transaction>),
}

fn repo(state: &AppState) -> TransactionRepository {
    TransactionRepository::new((*state.db).clone())
}

async fn load_all(state: &AppState, owner: UserId) -> ApiResult<Vec<Transaction>> {
    let rows = repo(state).find_all(owner).await?;
    Ok(rows.into_iter().map(Transaction::from).collect())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions - Filtered, sorted, optionally paginated list.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();
    let filter = query.filter()?;
    let page = query.page();
    let key = state.cache.key(owner, "transactions.list", &(&filter, page));

    cached_json(&state.cache, key, || async {
        let repo = repo(&state);
        let response = match page {
            Some(page) => {
                let (rows, total) = repo.list_page(owner, &filter, page).await?;
                let items = rows.into_iter().map(Transaction::from).collect();
                ListResponse::Page(PageResponse::new(items, page, total))
            }
            None => {
                let rows = repo.list(owner, &filter).await?;
                ListResponse::All(rows.into_iter().map(Transaction::from).collect())
            }
        };
        Ok::<_, ApiError>(response)
    })
    .await
}

/// POST /transactions - Record an income or expense.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionInput>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let owner = auth.user_id();
    let input = TransactionService::validate_create(payload)?;

    let created = repo(&state).create(owner, &input).await?;
    state.cache.invalidate_owner(owner);

    info!(
        user_id = %owner,
        transaction_id = %created.id,
        kind = %input.kind,
        "Transaction created"
    );
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /transactions/{id} - Change some fields of an owned transaction.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionInput>,
) -> ApiResult<Json<Transaction>> {
    let owner = auth.user_id();
    let input = TransactionService::validate_update(payload)?;

    let updated = repo(&state)
        .update(owner, TransactionId::from_uuid(id), &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".into()))?;
    state.cache.invalidate_owner(owner);

    info!(user_id = %owner, transaction_id = %id, "Transaction updated");
    Ok(Json(updated.into()))
}

/// DELETE /transactions/{id} - Remove an owned transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();

    if !repo(&state).delete(owner, TransactionId::from_uuid(id)).await? {
        return Err(AppError::NotFound("Transaction not found".into()).into());
    }
    state.cache.invalidate_owner(owner);

    info!(user_id = %owner, transaction_id = %id, "Transaction deleted");
    Ok(Json(serde_json::json!({ "message": "Transaction deleted successfully" })))
}

/// GET /transactions/summary - Expense totals per category for charts.
async fn expense_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();
    let key = state.cache.key(owner, "transactions.summary", &());

    cached_json(&state.cache, key, || async {
        let transactions = load_all(&state, owner).await?;
        Ok::<_, ApiError>(SummaryService::expense_by_category(&transactions))
    })
    .await
}

/// GET /transactions/stats - All-time totals and the last two months.
async fn quick_stats(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();
    let today = Utc::now().date_naive();
    let key = state.cache.key(owner, "transactions.stats", &today);

    cached_json(&state.cache, key, || async {
        let transactions = load_all(&state, owner).await?;
        Ok::<_, ApiError>(SummaryService::quick_stats(&transactions, today))
    })
    .await
}

/// GET /transactions/analytics - Full financial summary.
async fn analytics(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Value>> {
    let owner = auth.user_id();
    let now = Utc::now();
    let key = state.cache.key(owner, "transactions.analytics", &now.date_naive());

    cached_json(&state.cache, key, || async {
        let transactions = load_all(&state, owner).await?;
        Ok::<_, ApiError>(SummaryService::compute_financial_summary(&transactions, now)?)
    })
    .await
}

/// GET /transactions/export - CSV of the filtered list, never cached.
async fn export_csv(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let owner = auth.user_id();
    let filter = query.filter()?;

    let rows = repo(&state).list(owner, &filter).await?;
    let transactions: Vec<Transaction> = rows.into_iter().map(Transaction::from).collect();
    let body = to_csv_bytes(&transactions)?;

    info!(user_id = %owner, count = transactions.len(), "Transactions exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        body,
    ))
}
