//! Training registrations: an append-only log of performed sessions
//!
//! Rows copy the training's user and professor ids instead of referencing
//! them, so the log survives deletion of the training.

pub mod commands;
pub mod model;
pub mod queries;
pub mod routes;

pub use commands::{CreateRegistrationCommand, CreateRegistrationError};
pub use model::TrainingRegistration;
pub use queries::{ListRegistrationsError, ListRegistrationsQuery};
pub use routes::registrations_routes;
