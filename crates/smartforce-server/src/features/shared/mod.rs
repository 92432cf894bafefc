//! Shared utilities and types for feature modules
//!
//! - **pagination**: skip/limit parameters and list metadata
//! - **validation**: input validation for names, emails, passwords and counts
//! - **error_helpers**: database constraint classification
//! - **test_helpers**: fixture builders (test-only)

pub mod error_helpers;
pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{Paginated, PaginationError, PaginationMetadata, PaginationParams};
