//! Exercise catalog
//!
//! Plain CRUD with case-insensitive name search. Reads go through the cache
//! (`exercise:{id}`, `exercise:list:{skip}:{limit}:{name}`); every write
//! invalidates `exercise:*`.

pub mod commands;
pub mod model;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateExerciseCommand, CreateExerciseError, DeleteExerciseCommand, DeleteExerciseError,
    UpdateExerciseCommand, UpdateExerciseError,
};
pub use model::Exercise;
pub use queries::{
    GetExerciseError, GetExerciseQuery, ListExercisesError, ListExercisesQuery,
    MuscleGroupsError,
};
pub use routes::exercises_routes;

pub const CACHE_PATTERN: &str = "exercise:*";

pub fn cache_key(id: i64) -> String {
    format!("exercise:{}", id)
}

pub fn list_cache_key(skip: i64, limit: i64, name: Option<&str>) -> String {
    format!("exercise:list:{}:{}:{}", skip, limit, name.unwrap_or_default())
}
