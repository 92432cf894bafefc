//! User API routes
//!
//! - `GET /api/v1/users` - List students
//! - `POST /api/v1/users` - Create a student
//! - `GET /api/v1/users/:id` - Get a student
//! - `PUT /api/v1/users/:id` - Update own account
//! - `DELETE /api/v1/users/:id` - Delete own account
//! - `GET /api/v1/users/:id/trainings` - Trainings of a student

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use super::{
    commands::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand},
    queries::{GetUserQuery, ListUsersQuery},
    CACHE_PATTERN,
};
use crate::{
    api::{
        extract::{ApiJson, ApiPath, ApiQuery},
        response::ApiResponse,
        AppState,
    },
    auth::AuthUser,
    cache::SharedCache,
    error::ApiResult,
    features::trainings,
};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/trainings", get(trainings::routes::list_user_trainings))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a student
///
/// # Endpoint
///
/// `POST /api/v1/users`
///
/// # Response
///
/// - `200 OK` - User created
/// - `400 Bad Request` - Validation error
/// - `409 Conflict` - Email already registered
#[tracing::instrument(skip(pool, cache, _caller, command), fields(email = %command.email))]
async fn create_user(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiJson(command): ApiJson<CreateUserCommand>,
) -> ApiResult<Response> {
    let user = super::commands::create::handle(pool, command).await?;
    cache.invalidate(CACHE_PATTERN).await;

    tracing::info!(user_id = user.id, "User created via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(user))).into_response())
}

/// Update the caller's own account
///
/// # Endpoint
///
/// `PUT /api/v1/users/:id`
///
/// # Response
///
/// - `200 OK` - User updated
/// - `403 Forbidden` - Not the caller's account
/// - `409 Conflict` - Email already taken
#[tracing::instrument(skip(pool, cache, caller, command), fields(caller = caller.id))]
async fn update_user(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(mut command): ApiJson<UpdateUserCommand>,
) -> ApiResult<Response> {
    command.id = id;

    let user = super::commands::update::handle(pool, &caller, command).await?;
    cache.invalidate(CACHE_PATTERN).await;

    tracing::info!(user_id = user.id, "User updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(user))).into_response())
}

/// Delete the caller's own account along with their trainings
///
/// # Endpoint
///
/// `DELETE /api/v1/users/:id`
#[tracing::instrument(skip(pool, cache, caller), fields(caller = caller.id))]
async fn delete_user(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let deleted = super::commands::delete::handle(pool, &caller, DeleteUserCommand { id }).await?;
    cache.invalidate(CACHE_PATTERN).await;
    cache.invalidate(trainings::CACHE_PATTERN).await;

    tracing::info!(user_id = id, "User deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(deleted))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/users/:id`
#[tracing::instrument(skip(pool, cache, _caller))]
async fn get_user(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let user = super::queries::get::handle(pool, &cache, GetUserQuery { id }).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(user))).into_response())
}

/// List students
///
/// # Endpoint
///
/// `GET /api/v1/users?skip=0&limit=100`
#[tracing::instrument(skip(pool, _caller))]
async fn list_users(
    State(pool): State<SqlitePool>,
    _caller: AuthUser,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> ApiResult<Response> {
    let page = super::queries::list::handle(pool, query).await?;
    let meta = page.meta();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(page.items, meta)),
    )
        .into_response())
}
