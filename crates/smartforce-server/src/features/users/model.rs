use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student as returned by the API; the password hash never leaves the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub(crate) const USER_COLUMNS: &str = "id, email, name, created_at";
