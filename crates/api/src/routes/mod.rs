//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod budget_goals;
pub mod health;
pub mod transactions;
pub mod users;

/// Creates the `/api` router; everything but register and login requires a
/// bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(users::protected_routes())
        .merge(transactions::routes())
        .merge(budget_goals::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(users::public_routes())
        .merge(protected_routes)
}
