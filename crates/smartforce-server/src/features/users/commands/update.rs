//! Update the caller's own student account

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{can_manage_user, hash_off_thread, AuthError, AuthUser},
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

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserCommand")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateUserError {
    #[error("At least one of email, name or password is required")]
    Empty,

    #[error("{0}")]
    Email(#[from] EmailValidationError),

    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Password(#[from] PasswordValidationError),

    #[error("You can only update your own profile")]
    Forbidden,

    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Email '{0}' is already taken")]
    DuplicateEmail(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UpdateUserError> for AppError {
    fn from(err: UpdateUserError) -> Self {
        match err {
            UpdateUserError::Empty
            | UpdateUserError::Email(_)
            | UpdateUserError::Name(_)
            | UpdateUserError::Password(_) => AppError::Validation(err.to_string()),
            UpdateUserError::Forbidden => AppError::Forbidden(err.to_string()),
            UpdateUserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateUserError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            UpdateUserError::Auth(e) => e.into(),
            UpdateUserError::Database(e) => AppError::Database(e),
        }
    }
}

impl UpdateUserCommand {
    pub fn validate(&self) -> Result<(), UpdateUserError> {
        if self.email.is_none() && self.name.is_none() && self.password.is_none() {
            return Err(UpdateUserError::Empty);
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref name) = self.name {
            validate_name(name, 100)?;
        }
        if let Some(ref password) = self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, caller, command), fields(user_id = command.id, caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: UpdateUserCommand,
) -> Result<User, UpdateUserError> {
    if !can_manage_user(caller, command.id).is_allowed() {
        return Err(UpdateUserError::Forbidden);
    }
    command.validate()?;

    let email = command.email.as_deref().map(normalize_email);
    let password_hash = match command.password {
        Some(password) => Some(hash_off_thread(password).await?),
        None => None,
    };

    let sql = format!(
        "UPDATE users SET
             email = COALESCE(?, email),
             name = COALESCE(?, name),
             password_hash = COALESCE(?, password_hash)
         WHERE id = ?
         RETURNING {}",
        USER_COLUMNS
    );

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(&email)
        .bind(command.name.as_deref().map(str::trim))
        .bind(password_hash)
        .bind(command.id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                UpdateUserError::DuplicateEmail(email.clone().unwrap_or_default())
            } else {
                UpdateUserError::Database(e)
            }
        })?
        .ok_or(UpdateUserError::NotFound(command.id))?;

    tracing::info!(user_id = user.id, "User updated");
    Ok(user)
}
