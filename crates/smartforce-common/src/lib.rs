//! SmartForce Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging and error handling for the SmartForce workspace.
//!
//! # Overview
//!
//! - **Logging**: centralized `tracing` subscriber setup driven by environment variables
//! - **Types**: the account [`Role`](types::Role) carried in access tokens
//! - **Error Handling**: [`CommonError`] and its `Result` alias
//!
//! # Example
//!
//! ```no_run
//! use smartforce_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

pub use error::{CommonError, Result};
pub use types::Role;
