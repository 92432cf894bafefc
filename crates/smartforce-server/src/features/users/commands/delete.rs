//! Delete the caller's own student account
//!
//! Trainings owned by the student go with it (`ON DELETE CASCADE`).

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    api::response::Deleted,
    auth::{can_manage_user, AuthUser},
    error::AppError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("You can only delete your own profile")]
    Forbidden,

    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DeleteUserError> for AppError {
    fn from(err: DeleteUserError) -> Self {
        match err {
            DeleteUserError::Forbidden => AppError::Forbidden(err.to_string()),
            DeleteUserError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteUserError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: DeleteUserCommand,
) -> Result<Deleted, DeleteUserError> {
    if !can_manage_user(caller, command.id).is_allowed() {
        return Err(DeleteUserError::Forbidden);
    }

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteUserError::NotFound(command.id));
    }

    tracing::info!(user_id = command.id, "User deleted");
    Ok(Deleted::new(command.id))
}
