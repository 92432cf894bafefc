//! Professor API routes
//!
//! - `GET /api/v1/professors` - List professors
//! - `POST /api/v1/professors` - Add a professor
//! - `GET /api/v1/professors/:id` - Get a professor
//! - `PUT /api/v1/professors/:id` - Update a professor
//! - `DELETE /api/v1/professors/:id` - Delete a professor and their trainings
//! - `GET /api/v1/professors/:id/trainings` - Trainings authored by a professor

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use super::{
    commands::{CreateProfessorCommand, DeleteProfessorCommand, UpdateProfessorCommand},
    queries::{GetProfessorQuery, ListProfessorsQuery},
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

pub fn professors_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_professors).post(create_professor))
        .route(
            "/:id",
            get(get_professor)
                .put(update_professor)
                .delete(delete_professor),
        )
        .route(
            "/:id/trainings",
            get(trainings::routes::list_professor_trainings),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Add a professor to the catalog
///
/// # Endpoint
///
/// `POST /api/v1/professors`
///
/// # Request Body
///
/// ```json
/// { "name": "Maria Santos", "email": "maria@smartforce.app" }
/// ```
///
/// # Response
///
/// - `200 OK` - Professor created
/// - `400 Bad Request` - Validation error
/// - `409 Conflict` - Email already in use
#[tracing::instrument(skip(pool, _caller, command), fields(name = %command.name))]
async fn create_professor(
    State(pool): State<SqlitePool>,
    _caller: AuthUser,
    ApiJson(command): ApiJson<CreateProfessorCommand>,
) -> ApiResult<Response> {
    let professor = super::commands::create::handle(pool, command).await?;

    tracing::info!(professor_id = professor.id, "Professor created via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(professor))).into_response())
}

/// `PUT /api/v1/professors/:id`
#[tracing::instrument(skip(pool, caller, command), fields(caller = caller.id))]
async fn update_professor(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(mut command): ApiJson<UpdateProfessorCommand>,
) -> ApiResult<Response> {
    command.id = id;
    let professor = super::commands::update::handle(pool, &caller, command).await?;

    tracing::info!(professor_id = professor.id, "Professor updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(professor))).into_response())
}

/// Delete a professor
///
/// # Endpoint
///
/// `DELETE /api/v1/professors/:id`
///
/// # Response
///
/// - `200 OK` - Professor and their trainings deleted
/// - `403 Forbidden` - Professor account owned by someone else
/// - `404 Not Found` - Professor not found
/// - `409 Conflict` - Trainings still refer to the professor
#[tracing::instrument(skip(pool, cache, caller), fields(caller = caller.id))]
async fn delete_professor(
    State(pool): State<SqlitePool>,
    State(cache): State<SharedCache>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let deleted =
        super::commands::delete::handle(pool, &caller, DeleteProfessorCommand { id }).await?;
    cache.invalidate(trainings::CACHE_PATTERN).await;

    tracing::info!(professor_id = id, "Professor deleted via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(deleted))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/professors/:id`
#[tracing::instrument(skip(pool, _caller))]
async fn get_professor(
    State(pool): State<SqlitePool>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    let professor = super::queries::get::handle(pool, GetProfessorQuery { id }).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(professor))).into_response())
}

/// `GET /api/v1/professors?skip=0&limit=100`
#[tracing::instrument(skip(pool, _caller))]
async fn list_professors(
    State(pool): State<SqlitePool>,
    _caller: AuthUser,
    ApiQuery(query): ApiQuery<ListProfessorsQuery>,
) -> ApiResult<Response> {
    let page = super::queries::list::handle(pool, query).await?;
    let meta = page.meta();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(page.items, meta)),
    )
        .into_response())
}
