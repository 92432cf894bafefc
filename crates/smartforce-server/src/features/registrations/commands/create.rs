//! Record a performed exercise of a training

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    auth::{can_access_training, AuthUser},
    error::AppError,
    features::{
        registrations::model::{volume, TrainingRegistration, REGISTRATION_COLUMNS},
        shared::validation::{validate_non_negative, validate_positive, NumberValidationError},
        trainings::model::load_owners,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationCommand {
    #[serde(skip)]
    pub training_id: i64,
    pub exercise_id: i64,
    pub repetitions: i64,
    pub sets: i64,
    pub load: f64,
    pub intensity: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateRegistrationError {
    #[error("{0}")]
    Number(#[from] NumberValidationError),

    #[error("Training {0} not found")]
    TrainingNotFound(i64),

    #[error("You can only register sessions of your own trainings")]
    Forbidden,

    #[error("Exercise {exercise_id} is not part of training {training_id}")]
    ExerciseNotInTraining { training_id: i64, exercise_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateRegistrationError> for AppError {
    fn from(err: CreateRegistrationError) -> Self {
        match err {
            CreateRegistrationError::Number(_)
            | CreateRegistrationError::ExerciseNotInTraining { .. } => {
                AppError::Validation(err.to_string())
            },
            CreateRegistrationError::TrainingNotFound(_) => AppError::NotFound(err.to_string()),
            CreateRegistrationError::Forbidden => AppError::Forbidden(err.to_string()),
            CreateRegistrationError::Database(e) => AppError::Database(e),
        }
    }
}

impl CreateRegistrationCommand {
    pub fn validate(&self) -> Result<(), CreateRegistrationError> {
        validate_positive(self.sets, "sets")?;
        validate_positive(self.repetitions, "repetitions")?;
        validate_non_negative(self.load, "load")?;
        validate_non_negative(self.intensity, "intensity")?;
        Ok(())
    }
}

#[tracing::instrument(
    skip(pool, caller, command),
    fields(training_id = command.training_id, exercise_id = command.exercise_id)
)]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: CreateRegistrationCommand,
) -> Result<TrainingRegistration, CreateRegistrationError> {
    command.validate()?;

    let mut conn = pool.acquire().await?;

    let owners = load_owners(&mut conn, command.training_id)
        .await?
        .ok_or(CreateRegistrationError::TrainingNotFound(command.training_id))?;
    if !can_access_training(caller, owners).is_allowed() {
        return Err(CreateRegistrationError::Forbidden);
    }

    let in_training: bool = sqlx::query_scalar(
        "SELECT EXISTS(
             SELECT 1 FROM training_exercises WHERE training_id = ? AND exercise_id = ?
         )",
    )
    .bind(command.training_id)
    .bind(command.exercise_id)
    .fetch_one(&mut *conn)
    .await?;
    if !in_training {
        return Err(CreateRegistrationError::ExerciseNotInTraining {
            training_id: command.training_id,
            exercise_id: command.exercise_id,
        });
    }

    let sql = format!(
        "INSERT INTO training_registrations
             (training_id, exercise_id, user_id, professor_id, repetitions, load, sets,
              volume, intensity, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING {}",
        REGISTRATION_COLUMNS
    );
    let registration = sqlx::query_as::<_, TrainingRegistration>(&sql)
        .bind(command.training_id)
        .bind(command.exercise_id)
        .bind(owners.user_id)
        .bind(owners.professor_id)
        .bind(command.repetitions)
        .bind(command.load)
        .bind(command.sets)
        .bind(volume(command.sets, command.repetitions, command.load))
        .bind(command.intensity)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

    tracing::info!(registration_id = registration.id, "Training session registered");
    Ok(registration)
}
