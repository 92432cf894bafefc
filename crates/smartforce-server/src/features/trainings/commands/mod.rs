pub mod add_exercise;
pub mod create;
pub mod delete;
pub mod update;

pub use add_exercise::{AddExerciseCommand, AddExerciseError};
pub use create::{CreateTrainingCommand, CreateTrainingError};
pub use delete::{DeleteTrainingCommand, DeleteTrainingError};
pub use update::{UpdateTrainingCommand, UpdateTrainingError};
