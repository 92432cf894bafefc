//! Read-through cache
//!
//! Workflows read through the cache and invalidate key patterns after a
//! committed write. The database stays the source of truth: every cache
//! failure degrades to a miss, and a failed invalidation is only logged.
//!
//! Keys are namespaced by entity (`exercise:12`, `exercise:list:0:100:press`,
//! `user:4`). Patterns support a trailing `*` wildcard.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid cache pattern '{0}'")]
    InvalidPattern(String),
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;

    async fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Drop every entry matching `pattern`, returning how many were removed
    async fn invalidate(&self, pattern: &str) -> Result<usize, CacheError>;
}

/// Cache used when caching is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl Cache for NoopCache {
    async fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn set(&self, _key: &str, _value: Value, _ttl: Duration) {}

    async fn invalidate(&self, _pattern: &str) -> Result<usize, CacheError> {
        Ok(0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache with per-entry expiry
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn matches_pattern(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(key)?;

        if entry.expires_at <= Instant::now() {
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let Ok(mut entries) = self.entries.write() else {
            tracing::warn!(key, "Cache lock poisoned, skipping set");
            return;
        };

        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    async fn invalidate(&self, pattern: &str) -> Result<usize, CacheError> {
        let literal = pattern.strip_suffix('*').unwrap_or(pattern);
        if pattern.is_empty() || literal.contains('*') {
            return Err(CacheError::InvalidPattern(pattern.to_string()));
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        let before = entries.len();
        entries.retain(|key, _| !matches_pattern(pattern, key));
        Ok(before - entries.len())
    }
}

/// Shared handle to the configured cache with typed helpers
#[derive(Clone)]
pub struct SharedCache {
    inner: Arc<dyn Cache>,
    ttl: Duration,
}

impl std::fmt::Debug for SharedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl SharedCache {
    pub fn new(inner: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { inner, ttl }
    }

    pub fn memory(ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryCache::new()), ttl)
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopCache), Duration::ZERO)
    }

    /// Cached value for `key`, or `None` on a miss or an undecodable entry
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.inner.get(key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => {
                tracing::trace!(key, "Cache hit");
                Some(decoded)
            },
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
                None
            },
        }
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.inner.set(key, value, self.ttl).await,
            Err(e) => tracing::warn!(key, error = %e, "Value not cacheable"),
        }
    }

    /// Invalidate after a committed write; failures are logged, never returned
    pub async fn invalidate(&self, pattern: &str) {
        match self.inner.invalidate(pattern).await {
            Ok(removed) => tracing::debug!(pattern, removed, "Cache invalidated"),
            Err(e) => tracing::warn!(pattern, error = %e, "Cache invalidation failed"),
        }
    }
}
