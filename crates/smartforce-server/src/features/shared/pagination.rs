//! Skip/limit pagination shared by list queries
//!
//! ```rust,ignore
//! let params = PaginationParams::new(Some(20), Some(10));
//! params.validate()?;
//! // ... SELECT ... LIMIT params.limit() OFFSET params.skip()
//! let page = Paginated::from_items(rows, &params, total);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("skip must be zero or greater")]
    NegativeSkip,

    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange { max: i64 },
}

/// Query-string pagination parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self { skip, limit }
    }

    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        if matches!(self.skip, Some(skip) if skip < 0) {
            return Err(PaginationError::NegativeSkip);
        }
        if matches!(self.limit, Some(limit) if !(1..=MAX_LIMIT).contains(&limit)) {
            return Err(PaginationError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMetadata {
    pub skip: i64,
    pub limit: i64,
    pub total: i64,
    pub has_more: bool,
}

impl PaginationMetadata {
    pub fn new(skip: i64, limit: i64, total: i64) -> Self {
        Self {
            skip,
            limit,
            total,
            has_more: skip + limit < total,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T> Paginated<T> {
    pub fn from_items(items: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            items,
            pagination: PaginationMetadata::new(params.skip(), params.limit(), total),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Envelope `meta` for list responses
    pub fn meta(&self) -> serde_json::Value {
        serde_json::json!({ "pagination": self.pagination })
    }
}
