//! Issue a fresh token for an authenticated caller

use sqlx::SqlitePool;

use crate::{
    auth::{AuthError, AuthUser, TokenService},
    error::AppError,
    features::auth::session::{find_profile, TokenResponse},
};

#[derive(Debug, Clone)]
pub struct RefreshCommand {
    pub caller: AuthUser,
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RefreshError> for AppError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Auth(e) => e.into(),
            RefreshError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, tokens, command), fields(subject = command.caller.id, role = %command.caller.role))]
pub async fn handle(
    pool: SqlitePool,
    tokens: &TokenService,
    command: RefreshCommand,
) -> Result<TokenResponse, RefreshError> {
    let caller = command.caller;
    let profile = find_profile(&pool, caller.role, caller.id)
        .await?
        .ok_or(AuthError::UnknownSubject)?;

    Ok(TokenResponse::issue(tokens, profile)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{student, TestUser};
    use chrono::Duration;

    #[sqlx::test]
    async fn test_refresh_issues_token_for_same_subject(pool: SqlitePool) -> sqlx::Result<()> {
        let tokens = TokenService::new("test-secret", Duration::minutes(30));
        let id = TestUser::new("ana@smartforce.app").insert(&pool).await?;

        let response = handle(pool, &tokens, RefreshCommand { caller: student(id) })
            .await
            .unwrap();
        let claims = tokens.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), id);
        assert_eq!(claims.email, "ana@smartforce.app");
        Ok(())
    }

    #[sqlx::test]
    async fn test_refresh_for_deleted_account_fails(pool: SqlitePool) -> sqlx::Result<()> {
        let tokens = TokenService::new("test-secret", Duration::minutes(30));
        let result = handle(pool, &tokens, RefreshCommand { caller: student(99) }).await;
        assert!(matches!(
            result,
            Err(RefreshError::Auth(AuthError::UnknownSubject))
        ));
        Ok(())
    }
}
