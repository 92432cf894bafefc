use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingRegistration {
    pub id: i64,
    pub training_id: i64,
    pub exercise_id: i64,
    pub user_id: i64,
    pub professor_id: i64,
    pub repetitions: i64,
    pub load: f64,
    pub sets: i64,
    pub volume: f64,
    pub intensity: f64,
    pub created_at: DateTime<Utc>,
}

pub(crate) const REGISTRATION_COLUMNS: &str = "id, training_id, exercise_id, user_id, \
     professor_id, repetitions, load, sets, volume, intensity, created_at";

/// Total work of a session: sets x repetitions x load
pub fn volume(sets: i64, repetitions: i64, load: f64) -> f64 {
    (sets * repetitions) as f64 * load
}
