pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateProfessorCommand, CreateProfessorError};
pub use delete::{DeleteProfessorCommand, DeleteProfessorError};
pub use update::{UpdateProfessorCommand, UpdateProfessorError};
