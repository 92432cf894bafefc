//! Create a training with its exercise list
//!
//! The training row and all of its `training_exercises` rows are written in
//! one transaction. A missing user, professor or exercise aborts before
//! anything is inserted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{can_access_training, AuthUser, TrainingOwners},
    error::AppError,
    features::{
        shared::validation::{validate_name, NameValidationError, NumberValidationError},
        trainings::model::{
            find_missing_exercise, insert_entries, materialize, professor_exists, user_exists,
            ExerciseEntry, Training, TrainingRecord, MAX_NAME_LENGTH, TRAINING_COLUMNS,
        },
    },
};

/// # Examples
///
/// ```rust,ignore
/// let command = CreateTrainingCommand {
///     name: "Upper body".to_string(),
///     description: None,
///     user_id: 1,
///     professor_id: 2,
///     exercises: vec![
///         ExerciseEntry { exercise_id: 1, sets: 4, repetitions: 12 },
///         ExerciseEntry { exercise_id: 5, sets: 3, repetitions: 10 },
///     ],
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainingCommand {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: i64,
    pub professor_id: i64,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateTrainingError {
    #[error("{0}")]
    Name(#[from] NameValidationError),

    #[error("{0}")]
    Entry(#[from] NumberValidationError),

    #[error("You can only create trainings you take part in")]
    Forbidden,

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Professor {0} not found")]
    ProfessorNotFound(i64),

    #[error("Exercise {0} not found")]
    ExerciseNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateTrainingError> for AppError {
    fn from(err: CreateTrainingError) -> Self {
        match err {
            CreateTrainingError::Name(_) | CreateTrainingError::Entry(_) => {
                AppError::Validation(err.to_string())
            },
            CreateTrainingError::Forbidden => AppError::Forbidden(err.to_string()),
            CreateTrainingError::UserNotFound(_)
            | CreateTrainingError::ProfessorNotFound(_)
            | CreateTrainingError::ExerciseNotFound(_) => AppError::NotFound(err.to_string()),
            CreateTrainingError::Database(e) => AppError::Database(e),
        }
    }
}

impl CreateTrainingCommand {
    pub fn validate(&self) -> Result<(), CreateTrainingError> {
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        for entry in &self.exercises {
            entry.validate()?;
        }
        Ok(())
    }

    fn owners(&self) -> TrainingOwners {
        TrainingOwners {
            user_id: self.user_id,
            professor_id: self.professor_id,
        }
    }
}

#[tracing::instrument(
    skip(pool, caller, command),
    fields(
        user_id = command.user_id,
        professor_id = command.professor_id,
        exercises = command.exercises.len()
    )
)]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: CreateTrainingCommand,
) -> Result<Training, CreateTrainingError> {
    command.validate()?;

    if !can_access_training(caller, command.owners()).is_allowed() {
        return Err(CreateTrainingError::Forbidden);
    }

    let mut tx = pool.begin().await?;

    if !user_exists(&mut tx, command.user_id).await? {
        return Err(CreateTrainingError::UserNotFound(command.user_id));
    }
    if !professor_exists(&mut tx, command.professor_id).await? {
        return Err(CreateTrainingError::ProfessorNotFound(command.professor_id));
    }
    if let Some(missing) = find_missing_exercise(&mut tx, &command.exercises).await? {
        return Err(CreateTrainingError::ExerciseNotFound(missing));
    }

    let now = Utc::now();
    let sql = format!(
        "INSERT INTO trainings (name, description, user_id, professor_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
        TRAINING_COLUMNS
    );
    let record = sqlx::query_as::<_, TrainingRecord>(&sql)
        .bind(command.name.trim())
        .bind(&command.description)
        .bind(command.user_id)
        .bind(command.professor_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

    insert_entries(&mut tx, record.id, 0, &command.exercises).await?;
    let training = materialize(&mut tx, record).await?;

    tx.commit().await?;

    tracing::info!(training_id = training.id, "Training created");
    Ok(training)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        count_rows, professor, student, TestExercise, TestProfessor, TestUser,
    };

    struct Fixture {
        user_id: i64,
        professor_id: i64,
        exercise_ids: Vec<i64>,
    }

    async fn fixture(pool: &SqlitePool) -> sqlx::Result<Fixture> {
        let user_id = TestUser::new("ana@smartforce.app").insert(pool).await?;
        let professor_id = TestProfessor::new("Maria Santos").insert(pool).await?;
        let mut exercise_ids = Vec::new();
        for name in ["Dumbbell Press", "Squats", "Deadlift", "Bench Press", "Pull-ups"] {
            exercise_ids.push(TestExercise::new(name).insert(pool).await?);
        }
        Ok(Fixture {
            user_id,
            professor_id,
            exercise_ids,
        })
    }

    fn command(f: &Fixture, exercises: Vec<ExerciseEntry>) -> CreateTrainingCommand {
        CreateTrainingCommand {
            name: "Upper body".to_string(),
            description: Some("Week 1".to_string()),
            user_id: f.user_id,
            professor_id: f.professor_id,
            exercises,
        }
    }

    fn entry(exercise_id: i64, sets: i64, repetitions: i64) -> ExerciseEntry {
        ExerciseEntry {
            exercise_id,
            sets,
            repetitions,
        }
    }

    #[sqlx::test]
    async fn test_create_materializes_exercises(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let exercises = vec![entry(f.exercise_ids[0], 4, 12), entry(f.exercise_ids[4], 3, 10)];

        let training = handle(pool.clone(), &professor(f.professor_id), command(&f, exercises))
            .await
            .unwrap();

        assert_eq!(training.user_id, f.user_id);
        assert_eq!(training.exercises.len(), 2);
        assert_eq!(training.exercises[0].name, "Dumbbell Press");
        assert_eq!(training.exercises[0].description, "Dumbbell Press description");
        assert_eq!(training.exercises[0].sets, 4);
        assert_eq!(training.exercises[0].repetitions, 12);
        assert_eq!(training.exercises[1].name, "Pull-ups");
        assert_eq!(training.exercises[1].position, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_order_is_preserved(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let exercises = vec![
            entry(f.exercise_ids[3], 3, 8),
            entry(f.exercise_ids[1], 5, 5),
            entry(f.exercise_ids[3], 2, 15),
        ];

        let training = handle(pool, &student(f.user_id), command(&f, exercises))
            .await
            .unwrap();
        let names: Vec<_> = training.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bench Press", "Squats", "Bench Press"]);
        Ok(())
    }

    #[sqlx::test]
    async fn test_missing_exercise_leaves_no_rows(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let exercises = vec![entry(f.exercise_ids[0], 4, 12), entry(9_999, 3, 10)];

        let result = handle(pool.clone(), &student(f.user_id), command(&f, exercises)).await;
        assert!(matches!(result, Err(CreateTrainingError::ExerciseNotFound(9_999))));

        assert_eq!(count_rows(&pool, "trainings").await?, 0);
        assert_eq!(count_rows(&pool, "training_exercises").await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_missing_professor(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let mut cmd = command(&f, vec![]);
        cmd.professor_id = 4_242;

        let result = handle(pool, &student(f.user_id), cmd).await;
        assert!(matches!(result, Err(CreateTrainingError::ProfessorNotFound(4_242))));
        Ok(())
    }

    #[sqlx::test]
    async fn test_empty_exercise_list_is_allowed(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let training = handle(pool, &student(f.user_id), command(&f, vec![]))
            .await
            .unwrap();
        assert!(training.exercises.is_empty());
        Ok(())
    }

    #[sqlx::test]
    async fn test_not_idempotent(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let first = handle(pool.clone(), &student(f.user_id), command(&f, vec![]))
            .await
            .unwrap();
        let second = handle(pool.clone(), &student(f.user_id), command(&f, vec![]))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(count_rows(&pool, "trainings").await?, 2);
        Ok(())
    }

    #[sqlx::test]
    async fn test_stranger_cannot_create(pool: SqlitePool) -> sqlx::Result<()> {
        let f = fixture(&pool).await?;
        let result = handle(pool.clone(), &student(f.user_id + 1), command(&f, vec![])).await;
        assert!(matches!(result, Err(CreateTrainingError::Forbidden)));
        assert_eq!(count_rows(&pool, "trainings").await?, 0);
        Ok(())
    }

    #[test]
    fn test_validation() {
        let f = Fixture {
            user_id: 1,
            professor_id: 2,
            exercise_ids: vec![],
        };
        let mut cmd = command(&f, vec![entry(1, 0, 10)]);
        assert!(matches!(cmd.validate(), Err(CreateTrainingError::Entry(_))));

        cmd.exercises.clear();
        cmd.name = "x".repeat(101);
        assert!(matches!(cmd.validate(), Err(CreateTrainingError::Name(_))));
    }
}
