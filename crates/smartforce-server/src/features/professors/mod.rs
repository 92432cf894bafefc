//! Professors (trainers)
//!
//! Catalog professors carry only a name. Professors who registered through
//! `/auth/register` also have credentials, and only they may change or
//! delete their own record.

pub mod commands;
pub mod model;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateProfessorCommand, CreateProfessorError, DeleteProfessorCommand, DeleteProfessorError,
    UpdateProfessorCommand, UpdateProfessorError,
};
pub use model::Professor;
pub use queries::{GetProfessorError, GetProfessorQuery, ListProfessorsError, ListProfessorsQuery};
pub use routes::professors_routes;
