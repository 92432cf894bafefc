use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use crate::auth::AuthUser;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Professor {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub(crate) const PROFESSOR_COLUMNS: &str = "id, name, email, created_at";

/// Outcome of checking whether a caller may modify a professor record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordAccess {
    Missing,
    Allowed,
    Denied,
}

/// Records with credentials belong to the professor who owns them
pub(crate) async fn check_record_access(
    conn: &mut SqliteConnection,
    caller: &AuthUser,
    id: i64,
) -> Result<RecordAccess, sqlx::Error> {
    let has_credentials: Option<bool> =
        sqlx::query_scalar("SELECT password_hash IS NOT NULL FROM professors WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

    Ok(match has_credentials {
        None => RecordAccess::Missing,
        Some(true) if !caller.is_professor(id) => RecordAccess::Denied,
        Some(_) => RecordAccess::Allowed,
    })
}

/// Trainings cascade with their professor, so only the professor may take them along
pub(crate) async fn has_trainings(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM trainings WHERE professor_id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await
}
