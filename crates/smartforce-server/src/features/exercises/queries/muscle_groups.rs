//! Distinct muscle groups present in the catalog

use sqlx::SqlitePool;

use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum MuscleGroupsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MuscleGroupsError> for AppError {
    fn from(err: MuscleGroupsError) -> Self {
        match err {
            MuscleGroupsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool) -> Result<Vec<String>, MuscleGroupsError> {
    let groups = sqlx::query_scalar(
        "SELECT DISTINCT muscle_group FROM exercises
         WHERE muscle_group IS NOT NULL AND muscle_group != ''
         ORDER BY muscle_group",
    )
    .fetch_all(&pool)
    .await?;
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestExercise;

    #[sqlx::test]
    async fn test_distinct_sorted_groups(pool: SqlitePool) -> sqlx::Result<()> {
        TestExercise::new("Squats").with_muscle_group("Legs").insert(&pool).await?;
        TestExercise::new("Lunges").with_muscle_group("Legs").insert(&pool).await?;
        TestExercise::new("Bench Press").with_muscle_group("Chest").insert(&pool).await?;
        TestExercise::new("Plank").insert(&pool).await?;

        assert_eq!(handle(pool).await.unwrap(), ["Chest", "Legs"]);
        Ok(())
    }
}
