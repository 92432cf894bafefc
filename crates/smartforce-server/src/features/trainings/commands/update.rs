//! Partial update of a training
//!
//! `name`, `description` and `professor_id` replace the stored values when
//! present. `exercises`, when present, replaces the whole exercise list.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{can_access_training, AuthUser},
    error::AppError,
    features::{
        shared::validation::{validate_name, NameValidationError, NumberValidationError},
        trainings::model::{
            find_missing_exercise, insert_entries, load_owners, load_training, professor_exists,
            ExerciseEntry, Training, MAX_NAME_LENGTH,
        },
    },
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrainingCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub professor_id: Option<i64>,
    #[serde(default)]
    pub exercises: Option<Vec<ExerciseEntry>>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateTrainingError {
    #[error("At least one of name, description, professor_id or exercises is required")]
    Empty,

    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Entry(#[from] NumberValidationError),

    #[error("Training {0} not found")]
    NotFound(i64),

    #[error("You can only update your own trainings")]
    Forbidden,

    #[error("Professor {0} not found")]
    ProfessorNotFound(i64),

    #[error("Exercise {0} not found")]
    ExerciseNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UpdateTrainingError> for AppError {
    fn from(err: UpdateTrainingError) -> Self {
        match err {
            UpdateTrainingError::Empty
            | UpdateTrainingError::Name(_)
            | UpdateTrainingError::Entry(_) => AppError::Validation(err.to_string()),
            UpdateTrainingError::Forbidden => AppError::Forbidden(err.to_string()),
            UpdateTrainingError::NotFound(_)
            | UpdateTrainingError::ProfessorNotFound(_)
            | UpdateTrainingError::ExerciseNotFound(_) => AppError::NotFound(err.to_string()),
            UpdateTrainingError::Database(e) => AppError::Database(e),
        }
    }
}

impl UpdateTrainingCommand {
    pub fn validate(&self) -> Result<(), UpdateTrainingError> {
        if self.name.is_none()
            && self.description.is_none()
            && self.professor_id.is_none()
            && self.exercises.is_none()
        {
            return Err(UpdateTrainingError::Empty);
        }
        if let Some(ref name) = self.name {
            validate_name(name, MAX_NAME_LENGTH)?;
        }
        for entry in self.exercises.iter().flatten() {
            entry.validate()?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, caller, command), fields(training_id = command.id, caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: UpdateTrainingCommand,
) -> Result<Training, UpdateTrainingError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    let owners = load_owners(&mut tx, command.id)
        .await?
        .ok_or(UpdateTrainingError::NotFound(command.id))?;
    if !can_access_training(caller, owners).is_allowed() {
        return Err(UpdateTrainingError::Forbidden);
    }

    if let Some(professor_id) = command.professor_id {
        if !professor_exists(&mut tx, professor_id).await? {
            return Err(UpdateTrainingError::ProfessorNotFound(professor_id));
        }
    }
    if let Some(ref exercises) = command.exercises {
        if let Some(missing) = find_missing_exercise(&mut tx, exercises).await? {
            return Err(UpdateTrainingError::ExerciseNotFound(missing));
        }
    }

    sqlx::query(
        "UPDATE trainings SET
             name = COALESCE(?, name),
             description = COALESCE(?, description),
             professor_id = COALESCE(?, professor_id),
             updated_at = ?
         WHERE id = ?",
    )
    .bind(command.name.as_deref().map(str::trim))
    .bind(&command.description)
    .bind(command.professor_id)
    .bind(Utc::now())
    .bind(command.id)
    .execute(&mut *tx)
    .await?;

    if let Some(ref exercises) = command.exercises {
        sqlx::query("DELETE FROM training_exercises WHERE training_id = ?")
            .bind(command.id)
            .execute(&mut *tx)
            .await?;
        insert_entries(&mut tx, command.id, 0, exercises).await?;
    }

    let training = load_training(&mut tx, command.id)
        .await?
        .ok_or(UpdateTrainingError::NotFound(command.id))?;

    tx.commit().await?;

    tracing::info!(training_id = training.id, "Training updated");
    Ok(training)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{
        shared::test_helpers::{professor, student, TestExercise, TestProfessor, TestUser},
        trainings::commands::create::{self, CreateTrainingCommand},
    };

    struct Setup {
        training: Training,
        user_id: i64,
        professor_id: i64,
        squats: i64,
    }

    async fn setup(pool: &SqlitePool) -> sqlx::Result<Setup> {
        let user_id = TestUser::new("ana@smartforce.app").insert(pool).await?;
        let professor_id = TestProfessor::new("Maria").insert(pool).await?;
        let plank = TestExercise::new("Plank").insert(pool).await?;
        let squats = TestExercise::new("Squats").insert(pool).await?;

        let training = create::handle(
            pool.clone(),
            &student(user_id),
            CreateTrainingCommand {
                name: "Core".to_string(),
                description: None,
                user_id,
                professor_id,
                exercises: vec![ExerciseEntry {
                    exercise_id: plank,
                    sets: 3,
                    repetitions: 1,
                }],
            },
        )
        .await
        .unwrap();

        Ok(Setup {
            training,
            user_id,
            professor_id,
            squats,
        })
    }

    #[sqlx::test]
    async fn test_rename_keeps_exercises(pool: SqlitePool) -> sqlx::Result<()> {
        let s = setup(&pool).await?;
        let command = UpdateTrainingCommand {
            id: s.training.id,
            name: Some("Core and balance".to_string()),
            ..Default::default()
        };

        let updated = handle(pool, &professor(s.professor_id), command).await.unwrap();
        assert_eq!(updated.name, "Core and balance");
        assert_eq!(updated.exercises, s.training.exercises);
        assert!(updated.updated_at >= s.training.updated_at);
        Ok(())
    }

    #[sqlx::test]
    async fn test_exercise_list_is_replaced(pool: SqlitePool) -> sqlx::Result<()> {
        let s = setup(&pool).await?;
        let command = UpdateTrainingCommand {
            id: s.training.id,
            exercises: Some(vec![ExerciseEntry {
                exercise_id: s.squats,
                sets: 5,
                repetitions: 5,
            }]),
            ..Default::default()
        };

        let updated = handle(pool, &student(s.user_id), command).await.unwrap();
        assert_eq!(updated.exercises.len(), 1);
        assert_eq!(updated.exercises[0].name, "Squats");
        assert_eq!(updated.exercises[0].position, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_failed_replacement_keeps_old_list(pool: SqlitePool) -> sqlx::Result<()> {
        let s = setup(&pool).await?;
        let command = UpdateTrainingCommand {
            id: s.training.id,
            name: Some("Renamed".to_string()),
            exercises: Some(vec![ExerciseEntry {
                exercise_id: 31_337,
                sets: 1,
                repetitions: 1,
            }]),
            ..Default::default()
        };

        let result = handle(pool.clone(), &student(s.user_id), command).await;
        assert!(matches!(result, Err(UpdateTrainingError::ExerciseNotFound(31_337))));

        let mut conn = pool.acquire().await?;
        let stored = load_training(&mut conn, s.training.id).await?.unwrap();
        assert_eq!(stored.name, "Core");
        assert_eq!(stored.exercises.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_stranger_is_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let s = setup(&pool).await?;
        let command = UpdateTrainingCommand {
            id: s.training.id,
            name: Some("Hijacked".to_string()),
            ..Default::default()
        };

        let result = handle(pool, &student(s.user_id + 50), command).await;
        assert!(matches!(result, Err(UpdateTrainingError::Forbidden)));
        Ok(())
    }

    #[sqlx::test]
    async fn test_missing_training(pool: SqlitePool) -> sqlx::Result<()> {
        let command = UpdateTrainingCommand {
            id: 8,
            name: Some("Nothing".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            handle(pool, &student(1), command).await,
            Err(UpdateTrainingError::NotFound(8))
        ));
        Ok(())
    }

    #[test]
    fn test_empty_update() {
        let command = UpdateTrainingCommand {
            id: 1,
            ..Default::default()
        };
        assert!(matches!(command.validate(), Err(UpdateTrainingError::Empty)));
    }
}
