//! Delete a training and its exercise list
//!
//! Registrations recorded against the training are kept as history.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    api::response::Deleted,
    auth::{can_access_training, AuthUser},
    error::AppError,
    features::trainings::model::load_owners,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTrainingCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteTrainingError {
    #[error("Training {0} not found")]
    NotFound(i64),

    #[error("You can only delete your own trainings")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DeleteTrainingError> for AppError {
    fn from(err: DeleteTrainingError) -> Self {
        match err {
            DeleteTrainingError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteTrainingError::Forbidden => AppError::Forbidden(err.to_string()),
            DeleteTrainingError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: DeleteTrainingCommand,
) -> Result<Deleted, DeleteTrainingError> {
    let mut tx = pool.begin().await?;

    let owners = load_owners(&mut tx, command.id)
        .await?
        .ok_or(DeleteTrainingError::NotFound(command.id))?;
    if !can_access_training(caller, owners).is_allowed() {
        return Err(DeleteTrainingError::Forbidden);
    }

    // training_exercises rows go with it (ON DELETE CASCADE).
    sqlx::query("DELETE FROM trainings WHERE id = ?")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(training_id = command.id, "Training deleted");
    Ok(Deleted::new(command.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{
        shared::test_helpers::{count_rows, professor, student, TestExercise, TestProfessor, TestUser},
        trainings::{
            commands::create::{self, CreateTrainingCommand},
            model::ExerciseEntry,
        },
    };

    async fn training(pool: &SqlitePool) -> sqlx::Result<(i64, i64, i64)> {
        let user_id = TestUser::new("ana@smartforce.app").insert(pool).await?;
        let professor_id = TestProfessor::new("Maria").insert(pool).await?;
        let exercise_id = TestExercise::new("Squats").insert(pool).await?;

        let training = create::handle(
            pool.clone(),
            &professor(professor_id),
            CreateTrainingCommand {
                name: "Legs".to_string(),
                description: None,
                user_id,
                professor_id,
                exercises: vec![ExerciseEntry {
                    exercise_id,
                    sets: 4,
                    repetitions: 8,
                }],
            },
        )
        .await
        .unwrap();
        Ok((training.id, user_id, professor_id))
    }

    #[sqlx::test]
    async fn test_delete_removes_exercise_rows(pool: SqlitePool) -> sqlx::Result<()> {
        let (id, user_id, _) = training(&pool).await?;

        handle(pool.clone(), &student(user_id), DeleteTrainingCommand { id })
            .await
            .unwrap();
        assert_eq!(count_rows(&pool, "trainings").await?, 0);
        assert_eq!(count_rows(&pool, "training_exercises").await?, 0);
        assert_eq!(count_rows(&pool, "exercises").await?, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_other_professor_is_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let (id, _, professor_id) = training(&pool).await?;

        let result = handle(
            pool.clone(),
            &professor(professor_id + 1),
            DeleteTrainingCommand { id },
        )
        .await;
        assert!(matches!(result, Err(DeleteTrainingError::Forbidden)));
        assert_eq!(count_rows(&pool, "trainings").await?, 1);
        Ok(())
    }
}
