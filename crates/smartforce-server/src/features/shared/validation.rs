//! Shared validation utilities
//!
//! ```rust,ignore
//! use crate::features::shared::validation::{validate_name, validate_email};
//!
//! validate_name(&command.name, 100)?;
//! validate_email(&command.email)?;
//! ```

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length accepted at registration and update
pub const MIN_PASSWORD_LENGTH: usize = 6;

// `None` only if the literal fails to compile, in which case nothing matches.
static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("Name is required and cannot be empty")]
    Required,

    #[error("Name must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    #[error("Email is required")]
    Required,

    #[error("Email '{0}' is not a valid address")]
    InvalidFormat(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    #[error("Password must be at least {min_length} characters")]
    TooShort { min_length: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumberValidationError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must be a finite number of zero or more")]
    Negative { field: &'static str },
}

/// Non-blank, at most `max_length` characters
pub fn validate_name(name: &str, max_length: usize) -> Result<(), NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Required);
    }

    if name.chars().count() > max_length {
        return Err(NameValidationError::TooLong { max_length });
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), EmailValidationError> {
    if email.trim().is_empty() {
        return Err(EmailValidationError::Required);
    }

    if !EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email)) {
        return Err(EmailValidationError::InvalidFormat(email.to_string()));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), PasswordValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordValidationError::TooShort {
            min_length: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Sets and repetitions
pub fn validate_positive(value: i64, field: &'static str) -> Result<(), NumberValidationError> {
    if value <= 0 {
        return Err(NumberValidationError::NotPositive { field });
    }
    Ok(())
}

/// Load and intensity
pub fn validate_non_negative(value: f64, field: &'static str) -> Result<(), NumberValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(NumberValidationError::Negative { field });
    }
    Ok(())
}

/// Lowercase an email so lookups and the unique index agree
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
