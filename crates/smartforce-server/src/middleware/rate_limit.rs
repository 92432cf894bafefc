//! Rate limiting middleware using tower-governor

use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};

/// Default request quota per minute.
pub const DEFAULT_REQUESTS_PER_MINUTE: u64 = 60;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per minute allowed across the whole service
    pub requests_per_minute: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            requests_per_minute: std::env::var("RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REQUESTS_PER_MINUTE),
        }
    }

    /// Milliseconds needed to regain one request of quota
    fn replenish_interval_ms(&self) -> u64 {
        (60_000 / self.requests_per_minute.max(1)).max(1)
    }

    fn burst_size(&self) -> u32 {
        u32::try_from(self.requests_per_minute.max(1)).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Invalid rate limit configuration: {0} requests per minute")]
    InvalidQuota(u64),
}

/// Wrap `router` in a global token bucket.
///
/// The whole quota is available as a burst and refills evenly over a minute.
/// Requests over quota get `429 Too Many Requests` from the governor layer.
pub fn with_rate_limit<S>(
    router: Router<S>,
    config: &RateLimitConfig,
) -> Result<Router<S>, RateLimitError>
where
    S: Clone + Send + Sync + 'static,
{
    if config.requests_per_minute == 0 {
        return Err(RateLimitError::InvalidQuota(0));
    }

    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(GlobalKeyExtractor)
        .per_millisecond(config.replenish_interval_ms())
        .burst_size(config.burst_size())
        .finish()
        .ok_or(RateLimitError::InvalidQuota(config.requests_per_minute))?;

    tracing::debug!(
        requests_per_minute = config.requests_per_minute,
        "Rate limiting enabled"
    );

    Ok(router.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}
