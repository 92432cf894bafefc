//! Registration API routes, nested under trainings
//!
//! - `GET /api/v1/trainings/:id/registrations` - Sessions logged for a training
//! - `POST /api/v1/trainings/:id/registrations` - Log a performed session

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use super::{commands::CreateRegistrationCommand, queries::ListRegistrationsQuery};
use crate::{
    api::{
        extract::{ApiJson, ApiPath, ApiQuery},
        response::ApiResponse,
        AppState,
    },
    auth::AuthUser,
    error::ApiResult,
};

pub fn registrations_routes() -> Router<AppState> {
    Router::new().route(
        "/:id/registrations",
        get(list_registrations).post(create_registration),
    )
}

/// Log a performed session of one exercise
///
/// # Endpoint
///
/// `POST /api/v1/trainings/:id/registrations`
///
/// # Request Body
///
/// ```json
/// { "exercise_id": 5, "repetitions": 12, "sets": 4, "load": 20.0, "intensity": 0.75 }
/// ```
///
/// # Response
///
/// - `200 OK` - Registration with computed `volume`
/// - `400 Bad Request` - Invalid numbers or exercise not in the training
/// - `403 Forbidden` - Not the caller's training
/// - `404 Not Found` - Training not found
#[tracing::instrument(skip(pool, caller, command), fields(caller = caller.id))]
async fn create_registration(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    ApiPath(training_id): ApiPath<i64>,
    ApiJson(mut command): ApiJson<CreateRegistrationCommand>,
) -> ApiResult<Response> {
    command.training_id = training_id;

    let registration = super::commands::create::handle(pool, &caller, command).await?;

    tracing::info!(
        registration_id = registration.id,
        training_id,
        "Registration created via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(registration))).into_response())
}

/// `GET /api/v1/trainings/:id/registrations?skip=0&limit=100`
#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
async fn list_registrations(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    ApiPath(training_id): ApiPath<i64>,
    ApiQuery(mut query): ApiQuery<ListRegistrationsQuery>,
) -> ApiResult<Response> {
    query.training_id = training_id;

    let page = super::queries::list::handle(pool, &caller, query).await?;
    let meta = page.meta();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(page.items, meta)),
    )
        .into_response())
}
