//! Exercise API routes
//!
//! - `GET /api/v1/exercises?skip&limit&name` - List or search exercises
//! - `POST /api/v1/exercises` - Create an exercise
//! - `GET /api/v1/exercises/muscle-groups` - Distinct muscle groups
//! - `GET /api/v1/exercises/:id` - Get an exercise
//! - `PUT /api/v1/exercises/:id` - Overwrite an exercise
//! - `DELETE /api/v1/exercises/:id` - Delete an unused exercise

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use super::{
    commands::{CreateExerciseCommand, DeleteExerciseCommand, UpdateExerciseCommand},
    queries::{GetExerciseQuery, ListExercisesQuery},
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

pub fn exercises_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/muscle-groups", get(list_muscle_groups))
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a new exercise
///
/// # Endpoint
///
/// `POST /api/v1/exercises`
///
/// # Request Body
///
/// ```json
/// { "name": "Bench Press", "description": "Flat barbell press", "muscle_group": "Chest" }
/// ```
///
/// # Response
///
/// - `200 OK` - Exercise created
/// - `400 Bad Request` - Validation error
#[tracing::instrument(skip(pool, cache, _caller, command), fields(name = %command.name))]
async fn create_exercise(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiJson(command): ApiJson<CreateExerciseCommand>,
) -> ApiResult<Response> {
    let exercise = super::commands::create::handle(pool, command).await?;
    cache.invalidate(CACHE_PATTERN).await;

    tracing::info!(exercise_id = exercise.id, "Exercise created via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(exercise))).into_response())
}

/// Overwrite an exercise
///
/// # Endpoint
///
/// `PUT /api/v1/exercises/:id`
///
/// # Response
///
/// - `200 OK` - Exercise updated
/// - `400 Bad Request` - Validation error
/// - `404 Not Found` - Exercise not found
#[tracing::instrument(skip(pool, cache, _caller, command))]
async fn update_exercise(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(mut command): ApiJson<UpdateExerciseCommand>,
) -> ApiResult<Response> {
    command.id = id;

    let exercise = super::commands::update::handle(pool, command).await?;
    cache.invalidate(CACHE_PATTERN).await;
    // Trainings embed exercise names.
    cache.invalidate(trainings::CACHE_PATTERN).await;

    tracing::info!(exercise_id = exercise.id, "Exercise updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(exercise))).into_response())
}

/// Delete an exercise
///
/// # Endpoint
///
/// `DELETE /api/v1/exercises/:id`
///
/// # Response
///
/// - `200 OK` - Exercise deleted
/// - `404 Not Found` - Exercise not found
/// - `409 Conflict` - Exercise is part of a training
#[tracing::instrument(skip(pool, cache, _caller))]
async fn delete_exercise(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let deleted = super::commands::delete::handle(pool, DeleteExerciseCommand { id }).await?;
    cache.invalidate(CACHE_PATTERN).await;

    tracing::info!(exercise_id = id, "Exercise deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(deleted))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/exercises/:id`
#[tracing::instrument(skip(pool, cache, _caller))]
async fn get_exercise(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let exercise = super::queries::get::handle(pool, &cache, GetExerciseQuery { id }).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(exercise))).into_response())
}

/// List exercises
///
/// # Endpoint
///
/// `GET /api/v1/exercises?skip=0&limit=100&name=press`
///
/// # Response
///
/// - `200 OK` - Page of exercises with pagination metadata
/// - `400 Bad Request` - Pagination out of range
#[tracing::instrument(skip(pool, cache, _caller))]
async fn list_exercises(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    _caller: AuthUser,
    ApiQuery(query): ApiQuery<ListExercisesQuery>,
) -> ApiResult<Response> {
    let page = super::queries::list::handle(pool, &cache, query).await?;
    let meta = page.meta();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(page.items, meta)),
    )
        .into_response())
}

/// `GET /api/v1/exercises/muscle-groups`
#[tracing::instrument(skip(pool, _caller))]
async fn list_muscle_groups(
    State(pool): State<SqlitePool>,
    _caller: AuthUser,
) -> ApiResult<Response> {
    let groups = super::queries::muscle_groups::handle(pool).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(groups))).into_response())
}
