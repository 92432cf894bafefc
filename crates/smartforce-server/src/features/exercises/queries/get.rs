use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    cache::SharedCache,
    error::AppError,
    features::exercises::{
        cache_key,
        model::{Exercise, EXERCISE_COLUMNS},
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct GetExerciseQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetExerciseError {
    #[error("Exercise {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GetExerciseError> for AppError {
    fn from(err: GetExerciseError) -> Self {
        match err {
            GetExerciseError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetExerciseError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, cache))]
pub async fn handle(
    pool: SqlitePool,
    cache: &SharedCache,
    query: GetExerciseQuery,
) -> Result<Exercise, GetExerciseError> {
    let key = cache_key(query.id);
    if let Some(exercise) = cache.get_json::<Exercise>(&key).await {
        return Ok(exercise);
    }

    let sql = format!("SELECT {} FROM exercises WHERE id = ?", EXERCISE_COLUMNS);
    let exercise = sqlx::query_as::<_, Exercise>(&sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetExerciseError::NotFound(query.id))?;

    cache.put_json(&key, &exercise).await;
    Ok(exercise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestExercise;

    #[sqlx::test]
    async fn test_get_and_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        let cache = SharedCache::disabled();
        let id = TestExercise::new("Pull-ups").insert(&pool).await?;

        let exercise = handle(pool.clone(), &cache, GetExerciseQuery { id }).await.unwrap();
        assert_eq!(exercise.name, "Pull-ups");
        assert_eq!(exercise.description, "Pull-ups description");

        assert!(matches!(
            handle(pool, &cache, GetExerciseQuery { id: id + 100 }).await,
            Err(GetExerciseError::NotFound(_))
        ));
        Ok(())
    }
}
