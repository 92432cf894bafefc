//! Bearer-token extractor for protected handlers

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};
use smartforce_common::Role;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{AuthError, TokenService};
use crate::error::AppError;

/// The authenticated caller.
///
/// Taking `AuthUser` as a handler argument makes the route require a valid
/// `Authorization: Bearer <token>` header whose subject still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_student(&self, user_id: i64) -> bool {
        self.role == Role::Student && self.id == user_id
    }

    pub fn is_professor(&self, professor_id: i64) -> bool {
        self.role == Role::Professor && self.id == professor_id
    }
}

fn bearer_token(value: &HeaderValue) -> Result<&str, AuthError> {
    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token.trim())
}

async fn subject_exists(pool: &SqlitePool, role: Role, id: i64) -> Result<bool, sqlx::Error> {
    let sql = match role {
        Role::Student => "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
        Role::Professor => "SELECT EXISTS(SELECT 1 FROM professors WHERE id = ?)",
    };

    sqlx::query_scalar::<_, bool>(sql)
        .bind(id)
        .fetch_one(pool)
        .await
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<TokenService>: FromRef<S>,
    SqlitePool: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?;
        let token = bearer_token(header)?;

        let tokens = Arc::<TokenService>::from_ref(state);
        let claims = tokens.verify_token(token)?;
        let id = claims.subject_id()?;

        let pool = SqlitePool::from_ref(state);
        if !subject_exists(&pool, claims.role, id).await? {
            tracing::debug!(subject = id, role = %claims.role, "Token subject no longer exists");
            return Err(AuthError::UnknownSubject.into());
        }

        Ok(AuthUser {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}
