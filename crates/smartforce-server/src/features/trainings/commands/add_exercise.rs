//! Append one exercise to an existing training

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{can_access_training, AuthUser},
    error::AppError,
    features::{
        shared::validation::NumberValidationError,
        trainings::model::{
            find_missing_exercise, insert_entries, load_owners, load_training, ExerciseEntry,
            Training,
        },
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddExerciseCommand {
    #[serde(skip)]
    pub training_id: i64,
    #[serde(flatten)]
    pub entry: ExerciseEntry,
}

#[derive(Debug, thiserror::Error)]
pub enum AddExerciseError {
    #[error("{0}")]
    Entry(#[from] NumberValidationError),

    #[error("Training {0} not found")]
    TrainingNotFound(i64),

    #[error("You can only modify your own trainings")]
    Forbidden,

    #[error("Exercise {0} not found")]
    ExerciseNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AddExerciseError> for AppError {
    fn from(err: AddExerciseError) -> Self {
        match err {
            AddExerciseError::Entry(_) => AppError::Validation(err.to_string()),
            AddExerciseError::Forbidden => AppError::Forbidden(err.to_string()),
            AddExerciseError::TrainingNotFound(_) | AddExerciseError::ExerciseNotFound(_) => {
                AppError::NotFound(err.to_string())
            },
            AddExerciseError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(
    skip(pool, caller, command),
    fields(training_id = command.training_id, exercise_id = command.entry.exercise_id)
)]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: AddExerciseCommand,
) -> Result<Training, AddExerciseError> {
    command.entry.validate()?;

    let mut tx = pool.begin().await?;

    let owners = load_owners(&mut tx, command.training_id)
        .await?
        .ok_or(AddExerciseError::TrainingNotFound(command.training_id))?;
    if !can_access_training(caller, owners).is_allowed() {
        return Err(AddExerciseError::Forbidden);
    }

    let entries = [command.entry];
    if let Some(missing) = find_missing_exercise(&mut tx, &entries).await? {
        return Err(AddExerciseError::ExerciseNotFound(missing));
    }

    let next_position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM training_exercises WHERE training_id = ?",
    )
    .bind(command.training_id)
    .fetch_one(&mut *tx)
    .await?;

    insert_entries(&mut tx, command.training_id, next_position, &entries).await?;

    sqlx::query("UPDATE trainings SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(command.training_id)
        .execute(&mut *tx)
        .await?;

    let training = load_training(&mut tx, command.training_id)
        .await?
        .ok_or(AddExerciseError::TrainingNotFound(command.training_id))?;

    tx.commit().await?;

    tracing::info!(training_id = training.id, "Exercise added to training");
    Ok(training)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{
        shared::test_helpers::{student, TestExercise, TestProfessor, TestUser},
        trainings::commands::create::{self, CreateTrainingCommand},
    };

    #[sqlx::test]
    async fn test_appends_at_next_position(pool: SqlitePool) -> sqlx::Result<()> {
        let user_id = TestUser::new("ana@smartforce.app").insert(&pool).await?;
        let professor_id = TestProfessor::new("Maria").insert(&pool).await?;
        let squats = TestExercise::new("Squats").insert(&pool).await?;
        let lunges = TestExercise::new("Lunges").insert(&pool).await?;

        let training = create::handle(
            pool.clone(),
            &student(user_id),
            CreateTrainingCommand {
                name: "Legs".to_string(),
                description: None,
                user_id,
                professor_id,
                exercises: vec![ExerciseEntry {
                    exercise_id: squats,
                    sets: 4,
                    repetitions: 8,
                }],
            },
        )
        .await
        .unwrap();

        let command = AddExerciseCommand {
            training_id: training.id,
            entry: ExerciseEntry {
                exercise_id: lunges,
                sets: 3,
                repetitions: 12,
            },
        };
        let updated = handle(pool.clone(), &student(user_id), command).await.unwrap();
        assert_eq!(updated.exercises.len(), 2);
        assert_eq!(updated.exercises[1].name, "Lunges");
        assert_eq!(updated.exercises[1].position, 1);

        let missing = AddExerciseCommand {
            training_id: training.id,
            entry: ExerciseEntry {
                exercise_id: 555,
                sets: 1,
                repetitions: 1,
            },
        };
        assert!(matches!(
            handle(pool, &student(user_id), missing).await,
            Err(AddExerciseError::ExerciseNotFound(555))
        ));
        Ok(())
    }

    #[sqlx::test]
    async fn test_missing_training(pool: SqlitePool) -> sqlx::Result<()> {
        let command = AddExerciseCommand {
            training_id: 3,
            entry: ExerciseEntry {
                exercise_id: 1,
                sets: 1,
                repetitions: 1,
            },
        };
        assert!(matches!(
            handle(pool, &student(1), command).await,
            Err(AddExerciseError::TrainingNotFound(3))
        ));
        Ok(())
    }
}
