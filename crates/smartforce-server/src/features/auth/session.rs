//! Token responses and account lookups shared by the auth commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartforce_common::Role;
use sqlx::SqlitePool;

use crate::auth::{AuthError, TokenService, TokenSubject};

/// Public view of an account, whichever table it lives in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccountProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[sqlx(skip)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl AccountProfile {
    fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until `access_token` expires
    pub expires_in: i64,
    pub user: AccountProfile,
}

impl TokenResponse {
    pub fn issue(tokens: &TokenService, user: AccountProfile) -> Result<Self, AuthError> {
        let access_token = tokens.issue_access_token(&user.subject())?;
        Ok(Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: tokens.ttl().num_seconds(),
            user,
        })
    }
}

/// Account row including its password hash, for credential checks
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CredentialRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn into_profile(self, role: Role) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email,
            name: self.name,
            role,
            created_at: self.created_at,
        }
    }
}

pub(crate) async fn find_credentials(
    pool: &SqlitePool,
    role: Role,
    email: &str,
) -> Result<Option<CredentialRecord>, sqlx::Error> {
    let sql = match role {
        Role::Student => {
            "SELECT id, email, name, password_hash, created_at FROM users WHERE email = ?"
        },
        Role::Professor => {
            "SELECT id, email, name, password_hash, created_at
             FROM professors WHERE email = ? AND password_hash IS NOT NULL"
        },
    };

    sqlx::query_as::<_, CredentialRecord>(sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_profile(
    pool: &SqlitePool,
    role: Role,
    id: i64,
) -> Result<Option<AccountProfile>, sqlx::Error> {
    let sql = match role {
        Role::Student => "SELECT id, email, name, created_at FROM users WHERE id = ?",
        Role::Professor => {
            "SELECT id, email, name, created_at FROM professors
             WHERE id = ? AND email IS NOT NULL"
        },
    };

    let profile = sqlx::query_as::<_, AccountProfile>(sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(profile.map(|p| p.with_role(role)))
}
