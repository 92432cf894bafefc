//! Rename a professor or change their email

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::AuthUser,
    error::AppError,
    features::{
        professors::model::{check_record_access, Professor, RecordAccess, PROFESSOR_COLUMNS},
        shared::{
            error_helpers::is_unique_violation,
            validation::{
                normalize_email, validate_email, validate_name, EmailValidationError,
                NameValidationError,
            },
        },
    },
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfessorCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateProfessorError {
    #[error("At least one of name or email is required")]
    Empty,

    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Email(#[from] EmailValidationError),

    #[error("Professor {0} not found")]
    NotFound(i64),

    #[error("You can only update your own professor profile")]
    Forbidden,

    #[error("Email '{0}' is already taken")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UpdateProfessorError> for AppError {
    fn from(err: UpdateProfessorError) -> Self {
        match err {
            UpdateProfessorError::Empty
            | UpdateProfessorError::Name(_)
            | UpdateProfessorError::Email(_) => AppError::Validation(err.to_string()),
            UpdateProfessorError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateProfessorError::Forbidden => AppError::Forbidden(err.to_string()),
            UpdateProfessorError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            UpdateProfessorError::Database(e) => AppError::Database(e),
        }
    }
}

impl UpdateProfessorCommand {
    pub fn validate(&self) -> Result<(), UpdateProfessorError> {
        if self.name.is_none() && self.email.is_none() {
            return Err(UpdateProfessorError::Empty);
        }
        if let Some(ref name) = self.name {
            validate_name(name, 100)?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, caller, command), fields(professor_id = command.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: UpdateProfessorCommand,
) -> Result<Professor, UpdateProfessorError> {
    command.validate()?;

    let mut conn = pool.acquire().await?;
    match check_record_access(&mut conn, caller, command.id).await? {
        RecordAccess::Missing => return Err(UpdateProfessorError::NotFound(command.id)),
        RecordAccess::Denied => return Err(UpdateProfessorError::Forbidden),
        RecordAccess::Allowed => {},
    }

    let email = command.email.as_deref().map(normalize_email);
    let sql = format!(
        "UPDATE professors SET name = COALESCE(?, name), email = COALESCE(?, email)
         WHERE id = ? RETURNING {}",
        PROFESSOR_COLUMNS
    );

    let professor = sqlx::query_as::<_, Professor>(&sql)
        .bind(command.name.as_deref().map(str::trim))
        .bind(&email)
        .bind(command.id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                UpdateProfessorError::DuplicateEmail(email.clone().unwrap_or_default())
            } else {
                UpdateProfessorError::Database(e)
            }
        })?
        .ok_or(UpdateProfessorError::NotFound(command.id))?;

    tracing::info!(professor_id = professor.id, "Professor updated");
    Ok(professor)
}
