pub mod get;
pub mod list;
pub mod muscle_groups;

pub use get::{GetExerciseError, GetExerciseQuery};
pub use list::{ListExercisesError, ListExercisesQuery};
pub use muscle_groups::MuscleGroupsError;
