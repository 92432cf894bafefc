//! Auth API routes
//!
//! - `POST /api/v1/auth/register` - Create an account and return a token
//! - `POST /api/v1/auth/login` - Exchange credentials for a token
//! - `POST /api/v1/auth/refresh` - Fresh token for the caller (auth)
//! - `GET /api/v1/auth/me` - Caller profile (auth)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{commands::RefreshCommand, queries::MeQuery, LoginCommand, RegisterCommand};
use crate::{
    api::{extract::ApiJson, response::ApiResponse, AppState},
    auth::{AuthUser, TokenService},
    error::ApiResult,
};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Register a student (default) or professor account
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "ana@smartforce.app", "name": "Ana Costa", "password": "hunter22", "role": "student" }
/// ```
///
/// # Response
///
/// - `200 OK` - Token response
/// - `400 Bad Request` - Validation error
/// - `409 Conflict` - Email already registered
#[tracing::instrument(skip(pool, tokens, command), fields(email = %command.email))]
async fn register(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    ApiJson(command): ApiJson<RegisterCommand>,
) -> ApiResult<Response> {
    let response = super::commands::register::handle(pool, &tokens, command).await?;

    tracing::info!(account_id = response.user.id, "Account registered via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Log in
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Response
///
/// - `200 OK` - Token response
/// - `401 Unauthorized` - Invalid credentials
#[tracing::instrument(skip(pool, tokens, command), fields(email = %command.email))]
async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    ApiJson(command): ApiJson<LoginCommand>,
) -> ApiResult<Response> {
    let response = super::commands::login::handle(pool, &tokens, command).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// `POST /api/v1/auth/refresh`
#[tracing::instrument(skip(pool, tokens, caller), fields(subject = caller.id))]
async fn refresh(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    caller: AuthUser,
) -> ApiResult<Response> {
    let response =
        super::commands::refresh::handle(pool, &tokens, RefreshCommand { caller }).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/auth/me`
#[tracing::instrument(skip(pool, caller), fields(subject = caller.id))]
async fn me(State(pool): State<SqlitePool>, caller: AuthUser) -> ApiResult<Response> {
    let profile = super::queries::me::handle(pool, MeQuery { caller }).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(profile))).into_response())
}
