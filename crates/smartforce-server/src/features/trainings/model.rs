//! Training rows and the queries shared by training workflows
//!
//! Helpers take a `&mut SqliteConnection` so the same code runs against a
//! pooled connection or inside a transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use crate::{
    auth::TrainingOwners,
    features::shared::validation::{validate_positive, NumberValidationError},
};

/// Maximum training name length
pub const MAX_NAME_LENGTH: usize = 100;

/// One requested exercise in a training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub exercise_id: i64,
    pub sets: i64,
    pub repetitions: i64,
}

impl ExerciseEntry {
    pub fn validate(&self) -> Result<(), NumberValidationError> {
        validate_positive(self.sets, "sets")?;
        validate_positive(self.repetitions, "repetitions")?;
        Ok(())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct TrainingRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub professor_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A training exercise with the catalog fields needed for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingExerciseDetail {
    pub id: i64,
    pub exercise_id: i64,
    pub name: String,
    pub description: String,
    pub position: i64,
    pub sets: i64,
    pub repetitions: i64,
}

/// A fully materialized training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub professor_id: i64,
    pub exercises: Vec<TrainingExerciseDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Training {
    pub fn owners(&self) -> TrainingOwners {
        TrainingOwners {
            user_id: self.user_id,
            professor_id: self.professor_id,
        }
    }

    fn from_parts(record: TrainingRecord, exercises: Vec<TrainingExerciseDetail>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            user_id: record.user_id,
            professor_id: record.professor_id,
            exercises,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub(crate) const TRAINING_COLUMNS: &str =
    "id, name, description, user_id, professor_id, created_at, updated_at";

pub(crate) async fn load_owners(
    conn: &mut SqliteConnection,
    training_id: i64,
) -> Result<Option<TrainingOwners>, sqlx::Error> {
    let row: Option<(i64, i64)> =
        sqlx::query_as("SELECT user_id, professor_id FROM trainings WHERE id = ?")
            .bind(training_id)
            .fetch_optional(conn)
            .await?;

    Ok(row.map(|(user_id, professor_id)| TrainingOwners {
        user_id,
        professor_id,
    }))
}

pub(crate) async fn load_entries(
    conn: &mut SqliteConnection,
    training_id: i64,
) -> Result<Vec<TrainingExerciseDetail>, sqlx::Error> {
    sqlx::query_as::<_, TrainingExerciseDetail>(
        "SELECT te.id, te.exercise_id, e.name, e.description, te.position, te.sets, te.repetitions
         FROM training_exercises te
         JOIN exercises e ON e.id = te.exercise_id
         WHERE te.training_id = ?
         ORDER BY te.position, te.id",
    )
    .bind(training_id)
    .fetch_all(conn)
    .await
}

pub(crate) async fn materialize(
    conn: &mut SqliteConnection,
    record: TrainingRecord,
) -> Result<Training, sqlx::Error> {
    let exercises = load_entries(&mut *conn, record.id).await?;
    Ok(Training::from_parts(record, exercises))
}

pub(crate) async fn load_training(
    conn: &mut SqliteConnection,
    training_id: i64,
) -> Result<Option<Training>, sqlx::Error> {
    let sql = format!("SELECT {} FROM trainings WHERE id = ?", TRAINING_COLUMNS);
    let record = sqlx::query_as::<_, TrainingRecord>(&sql)
        .bind(training_id)
        .fetch_optional(&mut *conn)
        .await?;

    match record {
        Some(record) => Ok(Some(materialize(conn, record).await?)),
        None => Ok(None),
    }
}

pub(crate) async fn user_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await
}

pub(crate) async fn professor_exists(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM professors WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await
}

/// First listed exercise id with no catalog row, if any
pub(crate) async fn find_missing_exercise(
    conn: &mut SqliteConnection,
    entries: &[ExerciseEntry],
) -> Result<Option<i64>, sqlx::Error> {
    for entry in entries {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?)")
            .bind(entry.exercise_id)
            .fetch_one(&mut *conn)
            .await?;
        if !exists {
            return Ok(Some(entry.exercise_id));
        }
    }
    Ok(None)
}

/// Insert `entries` at consecutive positions starting at `first_position`
pub(crate) async fn insert_entries(
    conn: &mut SqliteConnection,
    training_id: i64,
    first_position: i64,
    entries: &[ExerciseEntry],
) -> Result<(), sqlx::Error> {
    for (offset, entry) in (0_i64..).zip(entries) {
        sqlx::query(
            "INSERT INTO training_exercises (training_id, exercise_id, position, sets, repetitions)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(training_id)
        .bind(entry.exercise_id)
        .bind(first_position + offset)
        .bind(entry.sets)
        .bind(entry.repetitions)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
