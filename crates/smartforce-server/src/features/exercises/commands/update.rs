//! Overwrite an exercise
//!
//! Every field is replaced; omitted `description` becomes empty and omitted
//! `muscle_group` becomes NULL.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::create::muscle_group_value;
use crate::{
    error::AppError,
    features::{
        exercises::model::{Exercise, EXERCISE_COLUMNS, MAX_NAME_LENGTH},
        shared::validation::{validate_name, NameValidationError},
    },
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExerciseCommand {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateExerciseError {
    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("Exercise {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UpdateExerciseError> for AppError {
    fn from(err: UpdateExerciseError) -> Self {
        match err {
            UpdateExerciseError::Name(_) => AppError::Validation(err.to_string()),
            UpdateExerciseError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateExerciseError::Database(e) => AppError::Database(e),
        }
    }
}

impl UpdateExerciseCommand {
    pub fn validate(&self) -> Result<(), UpdateExerciseError> {
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(exercise_id = command.id))]
pub async fn handle(
    pool: SqlitePool,
    command: UpdateExerciseCommand,
) -> Result<Exercise, UpdateExerciseError> {
    command.validate()?;

    let sql = format!(
        "UPDATE exercises SET name = ?, description = ?, muscle_group = ?, updated_at = ?
         WHERE id = ? RETURNING {}",
        EXERCISE_COLUMNS
    );

    let exercise = sqlx::query_as::<_, Exercise>(&sql)
        .bind(command.name.trim())
        .bind(&command.description)
        .bind(muscle_group_value(command.muscle_group.as_deref()))
        .bind(Utc::now())
        .bind(command.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(UpdateExerciseError::NotFound(command.id))?;

    tracing::info!(exercise_id = exercise.id, "Exercise updated");
    Ok(exercise)
}
