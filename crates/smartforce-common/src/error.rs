//! Error types shared across SmartForce crates

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid role '{0}': expected 'student' or 'professor'")]
    InvalidRole(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
