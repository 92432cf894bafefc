//! Remove an exercise that no training uses

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    api::response::Deleted,
    error::AppError,
    features::shared::error_helpers::is_foreign_key_violation,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExerciseCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteExerciseError {
    #[error("Exercise {0} not found")]
    NotFound(i64),

    #[error("Exercise {0} is used by at least one training")]
    InUse(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DeleteExerciseError> for AppError {
    fn from(err: DeleteExerciseError) -> Self {
        match err {
            DeleteExerciseError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteExerciseError::InUse(_) => AppError::Conflict(err.to_string()),
            DeleteExerciseError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: DeleteExerciseCommand,
) -> Result<Deleted, DeleteExerciseError> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
        .bind(command.id)
        .execute(&pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DeleteExerciseError::InUse(command.id)
            } else {
                DeleteExerciseError::Database(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(DeleteExerciseError::NotFound(command.id));
    }

    tracing::info!(exercise_id = command.id, "Exercise deleted");
    Ok(Deleted::new(command.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        count_rows, TestExercise, TestProfessor, TestUser,
    };

    #[sqlx::test]
    async fn test_delete_unused_exercise(pool: SqlitePool) -> sqlx::Result<()> {
        let id = TestExercise::new("Plank").insert(&pool).await?;
        let deleted = handle(pool.clone(), DeleteExerciseCommand { id }).await.unwrap();
        assert_eq!(deleted.id, id);
        assert_eq!(count_rows(&pool, "exercises").await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_referenced_exercise_conflicts(pool: SqlitePool) -> sqlx::Result<()> {
        let exercise_id = TestExercise::new("Lunges").insert(&pool).await?;
        let user_id = TestUser::new("ana@smartforce.app").insert(&pool).await?;
        let professor_id = TestProfessor::new("Maria").insert(&pool).await?;
        let training_id: i64 = sqlx::query_scalar(
            "INSERT INTO trainings (name, user_id, professor_id, created_at, updated_at)
             VALUES ('Legs', ?, ?, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')
             RETURNING id",
        )
        .bind(user_id)
        .bind(professor_id)
        .fetch_one(&pool)
        .await?;
        sqlx::query(
            "INSERT INTO training_exercises (training_id, exercise_id, position, sets, repetitions)
             VALUES (?, ?, 0, 3, 10)",
        )
        .bind(training_id)
        .bind(exercise_id)
        .execute(&pool)
        .await?;

        let result = handle(pool.clone(), DeleteExerciseCommand { id: exercise_id }).await;
        assert!(matches!(result, Err(DeleteExerciseError::InUse(_))));
        assert_eq!(count_rows(&pool, "exercises").await?, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_missing(pool: SqlitePool) -> sqlx::Result<()> {
        assert!(matches!(
            handle(pool, DeleteExerciseCommand { id: 1 }).await,
            Err(DeleteExerciseError::NotFound(1))
        ));
        Ok(())
    }
}
