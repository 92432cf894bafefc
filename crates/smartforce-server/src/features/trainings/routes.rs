//! Training API routes
//!
//! - `POST /api/v1/trainings` - Create a training with its exercises
//! - `GET /api/v1/trainings/:id` - Get a training
//! - `PUT /api/v1/trainings/:id` - Update a training
//! - `DELETE /api/v1/trainings/:id` - Delete a training
//! - `POST /api/v1/trainings/:id/exercises` - Append an exercise
//!
//! Listing by owner lives under the owner's resource
//! (`/users/:id/trainings`, `/professors/:id/trainings`) and is served by
//! [`list_user_trainings`] and [`list_professor_trainings`].

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;

use super::{
    cache_key,
    commands::{
        AddExerciseCommand, CreateTrainingCommand, DeleteTrainingCommand, UpdateTrainingCommand,
    },
    queries::{GetTrainingQuery, ListTrainingsQuery, TrainingOwner},
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
};

// ============================================================================
// Router Configuration
// ============================================================================

pub fn trainings_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_training))
        .route(
            "/:id",
            get(get_training).put(update_training).delete(delete_training),
        )
        .route("/:id/exercises", post(add_exercise))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a training
///
/// # Endpoint
///
/// `POST /api/v1/trainings`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Leg day",
///   "description": "Heavy lower body",
///   "user_id": 1,
///   "professor_id": 2,
///   "exercises": [{ "exercise_id": 5, "sets": 4, "repetitions": 12 }]
/// }
/// ```
///
/// # Response
///
/// - `200 OK` - Training with its materialized exercise list
/// - `400 Bad Request` - Validation error
/// - `403 Forbidden` - Caller is neither the student nor the professor
/// - `404 Not Found` - Referenced user, professor or exercise missing
#[tracing::instrument(skip(pool, caller, command), fields(caller = caller.id))]
async fn create_training(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    ApiJson(command): ApiJson<CreateTrainingCommand>,
) -> ApiResult<Response> {
    let training = super::commands::create::handle(pool, &caller, command).await?;

    tracing::info!(training_id = training.id, "Training created via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(training))).into_response())
}

/// Update a training
///
/// # Endpoint
///
/// `PUT /api/v1/trainings/:id`
///
/// Omitted fields keep their value. A present `exercises` list replaces the
/// current one.
///
/// # Response
///
/// - `200 OK` - Updated training
/// - `400 Bad Request` - Validation error
/// - `403 Forbidden` - Not the caller's training
/// - `404 Not Found` - Training or a referenced entity missing
#[tracing::instrument(skip(pool, cache, caller, command), fields(caller = caller.id))]
async fn update_training(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(mut command): ApiJson<UpdateTrainingCommand>,
) -> ApiResult<Response> {
    command.id = id;

    let training = super::commands::update::handle(pool, &caller, command).await?;
    cache.invalidate(&cache_key(id)).await;

    tracing::info!(training_id = id, "Training updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(training))).into_response())
}

/// Delete a training and its exercise list
///
/// # Endpoint
///
/// `DELETE /api/v1/trainings/:id`
///
/// # Response
///
/// - `200 OK` - Training deleted
/// - `403 Forbidden` - Not the caller's training
/// - `404 Not Found` - Training not found
#[tracing::instrument(skip(pool, cache, caller), fields(caller = caller.id))]
async fn delete_training(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let deleted =
        super::commands::delete::handle(pool, &caller, DeleteTrainingCommand { id }).await?;
    cache.invalidate(&cache_key(id)).await;

    tracing::info!(training_id = id, "Training deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(deleted))).into_response())
}

/// Append one exercise at the end of a training
///
/// # Endpoint
///
/// `POST /api/v1/trainings/:id/exercises`
///
/// # Request Body
///
/// ```json
/// { "exercise_id": 7, "sets": 3, "repetitions": 15 }
/// ```
#[tracing::instrument(skip(pool, cache, caller, command), fields(caller = caller.id))]
async fn add_exercise(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(mut command): ApiJson<AddExerciseCommand>,
) -> ApiResult<Response> {
    command.training_id = id;

    let training = super::commands::add_exercise::handle(pool, &caller, command).await?;
    cache.invalidate(&cache_key(id)).await;

    tracing::info!(training_id = id, "Exercise added to training via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(training))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/trainings/:id`
#[tracing::instrument(skip(pool, cache, caller), fields(caller = caller.id))]
async fn get_training(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let training =
        super::queries::get::handle(pool, &cache, &caller, GetTrainingQuery { id }).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(training))).into_response())
}

/// List the trainings of one student
///
/// # Endpoint
///
/// `GET /api/v1/users/:id/trainings?skip=0&limit=100`
///
/// # Response
///
/// - `200 OK` - Page of trainings, newest first
/// - `403 Forbidden` - Caller is not that student
#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
pub async fn list_user_trainings(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    ApiPath(user_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<ListTrainingsQuery>,
) -> ApiResult<Response> {
    list_for(pool, &caller, TrainingOwner::User(user_id), query).await
}

/// List the trainings a professor prescribed
///
/// # Endpoint
///
/// `GET /api/v1/professors/:id/trainings?skip=0&limit=100`
///
/// # Response
///
/// - `200 OK` - Page of trainings, newest first
/// - `403 Forbidden` - Caller is not that professor
#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
pub async fn list_professor_trainings(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    ApiPath(professor_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<ListTrainingsQuery>,
) -> ApiResult<Response> {
    list_for(pool, &caller, TrainingOwner::Professor(professor_id), query).await
}

async fn list_for(
    pool: SqlitePool,
    caller: &AuthUser,
    owner: TrainingOwner,
    query: ListTrainingsQuery,
) -> ApiResult<Response> {
    let page = super::queries::list::handle(pool, caller, owner, query).await?;
    let meta = page.meta();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(page.items, meta)),
    )
        .into_response())
}
