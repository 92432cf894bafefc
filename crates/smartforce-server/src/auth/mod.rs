//! Authentication and authorization
//!
//! - [`password`]: Argon2id hashing and verification
//! - [`token`]: HS256 access tokens carrying subject id, email and role
//! - [`extractor`]: the [`AuthUser`] extractor guarding every protected route
//! - [`policy`]: the training ownership predicate

pub mod extractor;
pub mod password;
pub mod policy;
pub mod token;

pub use extractor::AuthUser;
pub use password::{
    hash_off_thread, hash_password, verify_dummy_off_thread, verify_off_thread, verify_password,
};
pub use policy::{can_access_training, can_manage_user, Access, TrainingOwners};
pub use token::{Claims, TokenService, TokenSubject};

use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Account no longer exists")]
    UnknownSubject,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(_) | AuthError::Signing(_) => AppError::Internal(err.to_string()),
            AuthError::Database(e) => AppError::Database(e),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}
