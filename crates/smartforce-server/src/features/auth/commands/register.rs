//! Register a student or professor account

use chrono::Utc;
use serde::{Deserialize, Serialize};
use smartforce_common::Role;
use sqlx::SqlitePool;

use crate::{
    auth::{hash_off_thread, AuthError, TokenService},
    error::AppError,
    features::{
        auth::session::{AccountProfile, TokenResponse},
        shared::{
            error_helpers::is_unique_violation,
            validation::{
                normalize_email, validate_email, validate_name, validate_password,
                EmailValidationError, NameValidationError, PasswordValidationError,
            },
        },
    },
};

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterCommand {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl std::fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Email(#[from] EmailValidationError),

    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Password(#[from] PasswordValidationError),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RegisterError> for AppError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Email(_) | RegisterError::Name(_) | RegisterError::Password(_) => {
                AppError::Validation(err.to_string())
            },
            RegisterError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            RegisterError::Auth(e) => e.into(),
            RegisterError::Database(e) => AppError::Database(e),
        }
    }
}

impl RegisterCommand {
    pub fn validate(&self) -> Result<(), RegisterError> {
        validate_email(&self.email)?;
        validate_name(&self.name, 100)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, tokens, command), fields(email = %command.email, role = %command.role))]
pub async fn handle(
    pool: SqlitePool,
    tokens: &TokenService,
    command: RegisterCommand,
) -> Result<TokenResponse, RegisterError> {
    command.validate()?;

    let email = normalize_email(&command.email);
    let name = command.name.trim().to_string();
    let password_hash = hash_off_thread(command.password).await?;

    let sql = match command.role {
        Role::Student => {
            "INSERT INTO users (email, name, password_hash, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, email, name, created_at"
        },
        Role::Professor => {
            "INSERT INTO professors (email, name, password_hash, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, email, name, created_at"
        },
    };

    let profile = sqlx::query_as::<_, AccountProfile>(sql)
        .bind(&email)
        .bind(&name)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RegisterError::DuplicateEmail(email.clone())
            } else {
                RegisterError::Database(e)
            }
        })?;
    let profile = AccountProfile {
        role: command.role,
        ..profile
    };

    tracing::info!(account_id = profile.id, "Account registered");

    Ok(TokenResponse::issue(tokens, profile)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tokens() -> TokenService {
        TokenService::new("test-secret", Duration::minutes(30))
    }

    fn command(email: &str) -> RegisterCommand {
        RegisterCommand {
            email: email.to_string(),
            name: "Ana Costa".to_string(),
            password: "hunter22".to_string(),
            role: Role::Student,
        }
    }

    #[test]
    fn test_validation() {
        assert!(command("ana@smartforce.app").validate().is_ok());
        assert!(matches!(
            command("not-an-email").validate(),
            Err(RegisterError::Email(_))
        ));

        let mut short = command("ana@smartforce.app");
        short.password = "abc".to_string();
        assert!(matches!(short.validate(), Err(RegisterError::Password(_))));
    }

    #[test]
    fn test_debug_hides_password() {
        let printed = format!("{:?}", command("ana@smartforce.app"));
        assert!(!printed.contains("hunter22"));
    }

    #[sqlx::test]
    async fn test_register_student(pool: SqlitePool) -> sqlx::Result<()> {
        let response = handle(pool.clone(), &tokens(), command("Ana@SmartForce.app"))
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 1800);
        assert_eq!(response.user.email, "ana@smartforce.app");
        assert_eq!(response.user.role, Role::Student);

        let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
            .bind(response.user.id)
            .fetch_one(&pool)
            .await?;
        assert_ne!(stored, "hunter22");
        assert!(stored.starts_with("$argon2"));
        Ok(())
    }

    #[sqlx::test]
    async fn test_duplicate_email_conflicts(pool: SqlitePool) -> sqlx::Result<()> {
        handle(pool.clone(), &tokens(), command("ana@smartforce.app"))
            .await
            .unwrap();

        let second = handle(pool.clone(), &tokens(), command("ANA@smartforce.app")).await;
        assert!(matches!(second, Err(RegisterError::DuplicateEmail(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind("ana@smartforce.app")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_register_professor(pool: SqlitePool) -> sqlx::Result<()> {
        let mut cmd = command("maria@smartforce.app");
        cmd.role = Role::Professor;

        let response = handle(pool.clone(), &tokens(), cmd).await.unwrap();
        assert_eq!(response.user.role, Role::Professor);

        let claims = tokens().verify_token(&response.access_token).unwrap();
        assert_eq!(claims.role, Role::Professor);
        assert_eq!(claims.subject_id().unwrap(), response.user.id);
        Ok(())
    }
}
