//! Fetch one training, read through the cache
//!
//! The ownership check runs on every read, cached or not.

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    auth::{can_access_training, AuthUser},
    cache::SharedCache,
    error::AppError,
    features::trainings::{
        cache_key,
        model::{load_training, Training},
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct GetTrainingQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetTrainingError {
    #[error("Training {0} not found")]
    NotFound(i64),

    #[error("You can only view your own trainings")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GetTrainingError> for AppError {
    fn from(err: GetTrainingError) -> Self {
        match err {
            GetTrainingError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetTrainingError::Forbidden => AppError::Forbidden(err.to_string()),
            GetTrainingError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, cache, caller), fields(caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    cache: &SharedCache,
    caller: &AuthUser,
    query: GetTrainingQuery,
) -> Result<Training, GetTrainingError> {
    let key = cache_key(query.id);

    let training = match cache.get_json::<Training>(&key).await {
        Some(training) => training,
        None => {
            let mut conn = pool.acquire().await?;
            let training = load_training(&mut conn, query.id)
                .await?
                .ok_or(GetTrainingError::NotFound(query.id))?;
            cache.put_json(&key, &training).await;
            training
        },
    };

    if !can_access_training(caller, training.owners()).is_allowed() {
        return Err(GetTrainingError::Forbidden);
    }

    Ok(training)
}
