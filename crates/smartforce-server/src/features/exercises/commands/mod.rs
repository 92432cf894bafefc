pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateExerciseCommand, CreateExerciseError};
pub use delete::{DeleteExerciseCommand, DeleteExerciseError};
pub use update::{UpdateExerciseCommand, UpdateExerciseError};
