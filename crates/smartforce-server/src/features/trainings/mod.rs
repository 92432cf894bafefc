//! Trainings: a professor's plan for one student, made of an ordered list
//! of exercises with set and repetition counts
//!
//! Every operation on an existing training first checks
//! [`can_access_training`](crate::auth::can_access_training): only the
//! training's student or its professor may see or change it. Multi-row
//! writes run in one transaction, so a training never exists with a partial
//! exercise list.

pub mod commands;
pub mod model;
pub mod queries;
pub mod routes;

pub use commands::{
    AddExerciseCommand, AddExerciseError, CreateTrainingCommand, CreateTrainingError,
    DeleteTrainingCommand, DeleteTrainingError, UpdateTrainingCommand, UpdateTrainingError,
};
pub use model::{ExerciseEntry, Training, TrainingExerciseDetail};
pub use queries::{
    GetTrainingError, GetTrainingQuery, ListTrainingsError, ListTrainingsQuery, TrainingOwner,
};
pub use routes::trainings_routes;

pub const CACHE_PATTERN: &str = "training:*";

pub fn cache_key(id: i64) -> String {
    format!("training:{}", id)
}
