//! Add a professor to the catalog

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    features::{
        professors::model::{Professor, PROFESSOR_COLUMNS},
        shared::{
            error_helpers::is_unique_violation,
            validation::{
                normalize_email, validate_email, validate_name, EmailValidationError,
                NameValidationError,
            },
        },
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfessorCommand {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateProfessorError {
    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Email(#[from] EmailValidationError),

    #[error("Professor with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateProfessorError> for AppError {
    fn from(err: CreateProfessorError) -> Self {
        match err {
            CreateProfessorError::Name(_) | CreateProfessorError::Email(_) => {
                AppError::Validation(err.to_string())
            },
            CreateProfessorError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            CreateProfessorError::Database(e) => AppError::Database(e),
        }
    }
}

impl CreateProfessorCommand {
    pub fn validate(&self) -> Result<(), CreateProfessorError> {
        validate_name(&self.name, 100)?;
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(
    pool: SqlitePool,
    command: CreateProfessorCommand,
) -> Result<Professor, CreateProfessorError> {
    command.validate()?;

    let email = command.email.as_deref().map(normalize_email);
    let sql = format!(
        "INSERT INTO professors (name, email, created_at) VALUES (?, ?, ?) RETURNING {}",
        PROFESSOR_COLUMNS
    );

    let professor = sqlx::query_as::<_, Professor>(&sql)
        .bind(command.name.trim())
        .bind(&email)
        .bind(Utc::now())
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CreateProfessorError::DuplicateEmail(email.clone().unwrap_or_default())
            } else {
                CreateProfessorError::Database(e)
            }
        })?;

    tracing::info!(professor_id = professor.id, "Professor created");
    Ok(professor)
}
