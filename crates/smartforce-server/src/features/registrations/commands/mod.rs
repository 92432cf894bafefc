pub mod create;

pub use create::{CreateRegistrationCommand, CreateRegistrationError};
