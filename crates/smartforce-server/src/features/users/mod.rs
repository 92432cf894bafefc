//! Student accounts
//!
//! Any authenticated caller may list, read and create students; only the
//! student themself may update or delete their account.

pub mod commands;
pub mod model;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateUserCommand, CreateUserError, DeleteUserCommand, DeleteUserError, UpdateUserCommand,
    UpdateUserError,
};
pub use model::User;
pub use queries::{GetUserError, GetUserQuery, ListUsersError, ListUsersQuery};
pub use routes::users_routes;

/// Cache key for one user
pub fn cache_key(id: i64) -> String {
    format!("user:{}", id)
}

pub const CACHE_PATTERN: &str = "user:*";
