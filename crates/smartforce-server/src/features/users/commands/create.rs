//! Create a student account

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{hash_off_thread, AuthError},
    error::AppError,
    features::{
        shared::{
            error_helpers::is_unique_violation,
            validation::{
                normalize_email, validate_email, validate_name, validate_password,
                EmailValidationError, NameValidationError, PasswordValidationError,
            },
        },
        users::model::{User, USER_COLUMNS},
    },
};

#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for CreateUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserCommand")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("{0}")]
    Email(#[from] EmailValidationError),

    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Password(#[from] PasswordValidationError),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateUserError> for AppError {
    fn from(err: CreateUserError) -> Self {
        match err {
            CreateUserError::Email(_) | CreateUserError::Name(_) | CreateUserError::Password(_) => {
                AppError::Validation(err.to_string())
            },
            CreateUserError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            CreateUserError::Auth(e) => e.into(),
            CreateUserError::Database(e) => AppError::Database(e),
        }
    }
}

impl CreateUserCommand {
    pub fn validate(&self) -> Result<(), CreateUserError> {
        validate_email(&self.email)?;
        validate_name(&self.name, 100)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(email = %command.email))]
pub async fn handle(pool: SqlitePool, command: CreateUserCommand) -> Result<User, CreateUserError> {
    command.validate()?;

    let email = normalize_email(&command.email);
    let password_hash = hash_off_thread(command.password).await?;

    let sql = format!(
        "INSERT INTO users (email, name, password_hash, created_at)
         VALUES (?, ?, ?, ?) RETURNING {}",
        USER_COLUMNS
    );

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(&email)
        .bind(command.name.trim())
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CreateUserError::DuplicateEmail(email.clone())
            } else {
                CreateUserError::Database(e)
            }
        })?;

    tracing::info!(user_id = user.id, "User created");
    Ok(user)
}
