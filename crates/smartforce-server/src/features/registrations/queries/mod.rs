pub mod list;

pub use list::{ListRegistrationsError, ListRegistrationsQuery};
