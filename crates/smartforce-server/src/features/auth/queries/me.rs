//! Profile of the authenticated caller

use sqlx::SqlitePool;

use crate::{
    auth::{AuthError, AuthUser},
    error::AppError,
    features::auth::session::{find_profile, AccountProfile},
};

#[derive(Debug, Clone)]
pub struct MeQuery {
    pub caller: AuthUser,
}

#[derive(Debug, thiserror::Error)]
pub enum MeError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MeError> for AppError {
    fn from(err: MeError) -> Self {
        match err {
            MeError::Auth(e) => e.into(),
            MeError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, query), fields(subject = query.caller.id))]
pub async fn handle(pool: SqlitePool, query: MeQuery) -> Result<AccountProfile, MeError> {
    let caller = query.caller;
    find_profile(&pool, caller.role, caller.id)
        .await?
        .ok_or_else(|| AuthError::UnknownSubject.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{professor, TestProfessor};
    use smartforce_common::Role;

    #[sqlx::test]
    async fn test_me_for_professor(pool: SqlitePool) -> sqlx::Result<()> {
        let id = TestProfessor::new("Maria Santos")
            .with_email("maria@smartforce.app")
            .insert(&pool)
            .await?;

        let profile = handle(pool, MeQuery { caller: professor(id) }).await.unwrap();
        assert_eq!(profile.name, "Maria Santos");
        assert_eq!(profile.role, Role::Professor);
        Ok(())
    }
}
