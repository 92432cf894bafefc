//! Add an exercise to the catalog

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    features::{
        exercises::model::{Exercise, EXERCISE_COLUMNS, MAX_NAME_LENGTH},
        shared::validation::{validate_name, NameValidationError},
    },
};

/// # Examples
///
/// ```rust,ignore
/// let command = CreateExerciseCommand {
///     name: "Bench Press".to_string(),
///     description: "Flat barbell press".to_string(),
///     muscle_group: Some("Chest".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateExerciseError {
    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateExerciseError> for AppError {
    fn from(err: CreateExerciseError) -> Self {
        match err {
            CreateExerciseError::Name(_) => AppError::Validation(err.to_string()),
            CreateExerciseError::Database(e) => AppError::Database(e),
        }
    }
}

impl CreateExerciseCommand {
    pub fn validate(&self) -> Result<(), CreateExerciseError> {
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

/// Blank muscle groups are stored as NULL
pub(crate) fn muscle_group_value(group: Option<&str>) -> Option<&str> {
    group.map(str::trim).filter(|g| !g.is_empty())
}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(
    pool: SqlitePool,
    command: CreateExerciseCommand,
) -> Result<Exercise, CreateExerciseError> {
    command.validate()?;

    let now = Utc::now();
    let sql = format!(
        "INSERT INTO exercises (name, description, muscle_group, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?) RETURNING {}",
        EXERCISE_COLUMNS
    );

    let exercise = sqlx::query_as::<_, Exercise>(&sql)
        .bind(command.name.trim())
        .bind(&command.description)
        .bind(muscle_group_value(command.muscle_group.as_deref()))
        .bind(now)
        .bind(now)
        .fetch_one(&pool)
        .await?;

    tracing::info!(exercise_id = exercise.id, "Exercise created");
    Ok(exercise)
}
