pub mod get;
pub mod list;

pub use get::{GetProfessorError, GetProfessorQuery};
pub use list::{ListProfessorsError, ListProfessorsQuery};
