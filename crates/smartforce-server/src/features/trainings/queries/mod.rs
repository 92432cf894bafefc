pub mod get;
pub mod list;

pub use get::{GetTrainingError, GetTrainingQuery};
pub use list::{ListTrainingsError, ListTrainingsQuery, TrainingOwner};
