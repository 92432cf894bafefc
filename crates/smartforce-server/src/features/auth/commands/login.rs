//! Exchange credentials for an access token

use serde::{Deserialize, Serialize};
use smartforce_common::Role;
use sqlx::SqlitePool;

use crate::{
    auth::{verify_dummy_off_thread, verify_off_thread, AuthError, TokenService},
    error::AppError,
    features::{
        auth::session::{find_credentials, TokenResponse},
        shared::validation::normalize_email,
    },
};

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Auth(e) => e.into(),
            LoginError::Database(e) => AppError::Database(e),
        }
    }
}

/// Unknown accounts and wrong passwords fail identically, and both pay for one verification
#[tracing::instrument(skip(pool, tokens, command), fields(email = %command.email, role = %command.role))]
pub async fn handle(
    pool: SqlitePool,
    tokens: &TokenService,
    command: LoginCommand,
) -> Result<TokenResponse, LoginError> {
    let email = normalize_email(&command.email);

    let credentials = find_credentials(&pool, command.role, &email)
        .await?
        .and_then(|mut r| r.password_hash.take().map(|hash| (r, hash)));
    let Some((record, hash)) = credentials else {
        tracing::info!("Login for unknown account");
        verify_dummy_off_thread(command.password).await?;
        return Err(AuthError::InvalidCredentials.into());
    };

    if !verify_off_thread(command.password, hash).await? {
        tracing::info!(account_id = record.id, "Login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let profile = record.into_profile(command.role);
    tracing::info!(account_id = profile.id, "Login succeeded");

    Ok(TokenResponse::issue(tokens, profile)?)
}
