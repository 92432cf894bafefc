//! Fetch one student, read through the cache

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    cache::SharedCache,
    error::AppError,
    features::users::{
        cache_key,
        model::{User, USER_COLUMNS},
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct GetUserQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetUserError {
    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GetUserError> for AppError {
    fn from(err: GetUserError) -> Self {
        match err {
            GetUserError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetUserError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, cache))]
pub async fn handle(
    pool: SqlitePool,
    cache: &SharedCache,
    query: GetUserQuery,
) -> Result<User, GetUserError> {
    let key = cache_key(query.id);
    if let Some(user) = cache.get_json::<User>(&key).await {
        return Ok(user);
    }

    let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetUserError::NotFound(query.id))?;

    cache.put_json(&key, &user).await;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestUser;
    use std::time::Duration;

    #[sqlx::test]
    async fn test_get_user_populates_cache(pool: SqlitePool) -> sqlx::Result<()> {
        let cache = SharedCache::memory(Duration::from_secs(60));
        let id = TestUser::new("ana@smartforce.app").insert(&pool).await?;

        let user = handle(pool.clone(), &cache, GetUserQuery { id }).await.unwrap();
        assert_eq!(user.email, "ana@smartforce.app");

        // Served from the cache even after the row is gone.
        sqlx::query("DELETE FROM users").execute(&pool).await?;
        let cached = handle(pool.clone(), &cache, GetUserQuery { id }).await.unwrap();
        assert_eq!(cached, user);

        cache.invalidate("user:*").await;
        let missing = handle(pool, &cache, GetUserQuery { id }).await;
        assert!(matches!(missing, Err(GetUserError::NotFound(_))));
        Ok(())
    }
}
