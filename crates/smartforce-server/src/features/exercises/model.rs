use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub muscle_group: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) const EXERCISE_COLUMNS: &str =
    "id, name, description, muscle_group, created_at, updated_at";

/// Maximum exercise name length
pub const MAX_NAME_LENGTH: usize = 100;
