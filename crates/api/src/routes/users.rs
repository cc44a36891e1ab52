//! User registration, login and profile routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use tracing::info;

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};
use tally_core::auth::{hash_password, validate_registration, verify_password};
use tally_db::{UserRepository, entities::users};
use tally_shared::{AppError, LoginRequest, LoginResponse, RegisterRequest, UserInfo};

/// Routes reachable without a token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

/// Routes that need the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(me))
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at.with_timezone(&Utc),
    }
}

fn login_response(state: &AppState, user: users::Model) -> ApiResult<LoginResponse> {
    let token = state.jwt_service.generate_access_token(user.id)?;
    Ok(LoginResponse {
        token,
        expires_in: state.jwt_service.access_token_expires_in(),
        user: user_info(user),
    })
}

/// POST /users/register - Create an account and return a token.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let payload = validate_registration(payload)?;
    let user_repo = UserRepository::new((*state.db).clone());

    if user_repo.exists(&payload.email, &payload.username).await? {
        return Err(AppError::Conflict("User already exists".into()).into());
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create(&payload.username, &payload.email, &password_hash)
        .await?;

    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(login_response(&state, user)?)))
}

/// POST /users/login - Authenticate by email or username.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let invalid = || AppError::Unauthorized("Invalid credentials".into());
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_login(&payload.email).await? else {
        info!("Login attempt for unknown user");
        return Err(invalid().into());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid().into());
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(login_response(&state, user)?))
}

/// GET /users/me - Profile of the authenticated user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserInfo>> {
    let user = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(user_info(user)))
}
