//! Feature modules implementing the SmartForce API
//!
//! Each feature is a vertical slice following a command/query split:
//!
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//! - `model.rs` - Row types shared by the slice
//!
//! # Features
//!
//! - **auth**: Registration, login, token refresh and the caller's profile
//! - **users**: Student accounts
//! - **professors**: Professor catalog and accounts
//! - **exercises**: Exercise catalog with search and muscle groups
//! - **trainings**: Training plans with ordered exercise lists
//! - **registrations**: Log of performed training sessions

pub mod auth;
pub mod exercises;
pub mod professors;
pub mod registrations;
pub mod shared;
pub mod trainings;
pub mod users;

use axum::Router;

use crate::api::AppState;

/// Creates the API router with all feature routes mounted
///
/// - `/auth` - Authentication
/// - `/users` - Students
/// - `/professors` - Professors
/// - `/exercises` - Exercise catalog
/// - `/trainings` - Trainings and their registrations
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_routes())
        .nest("/users", users::users_routes())
        .nest("/professors", professors::professors_routes())
        .nest("/exercises", exercises::exercises_routes())
        .nest(
            "/trainings",
            trainings::trainings_routes().merge(registrations::registrations_routes()),
        )
}
