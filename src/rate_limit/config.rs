//! Rate Limit Configuration
//!
//! Configuration for the sliding-window request limiter.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::RateLimitError;

/// Default request limit per period
pub const DEFAULT_REQUEST_LIMIT: usize = 100;
/// Default sliding window length in seconds
pub const DEFAULT_PERIOD_SECS: u64 = 60;
/// Default admission poll interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Rate limit configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum number of requests admitted within one sliding window
    pub limit: usize,

    /// Length of the sliding window in seconds
    pub period_secs: u64,

    /// How long a blocked caller sleeps between admission attempts,
    /// in milliseconds. A tunable, not a correctness knob.
    pub poll_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REQUEST_LIMIT,
            period_secs: DEFAULT_PERIOD_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl RateLimitConfig {
    /// Create a new rate limit configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, starting from defaults
    pub fn from_env() -> Self {
        Self::default().apply_env_overrides()
    }

    /// Apply environment variable overrides to this configuration
    ///
    /// Environment variables take precedence over existing values:
    /// - CRPT_RATE_LIMIT
    /// - CRPT_RATE_PERIOD_SECS
    /// - CRPT_RATE_POLL_INTERVAL_MS
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("CRPT_RATE_LIMIT") {
            if let Ok(limit) = val.parse::<usize>() {
                if limit > 0 {
                    self.limit = limit;
                }
            }
        }

        if let Ok(val) = std::env::var("CRPT_RATE_PERIOD_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                if secs > 0 {
                    self.period_secs = secs;
                }
            }
        }

        if let Ok(val) = std::env::var("CRPT_RATE_POLL_INTERVAL_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                if ms > 0 {
                    self.poll_interval_ms = ms;
                }
            }
        }

        self
    }

    /// Get the sliding window length
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    /// Get the admission poll interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::InvalidConfiguration`] if the limit or any
    /// interval is zero.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.limit == 0 {
            return Err(RateLimitError::InvalidConfiguration(
                "limit must be a positive number".to_string(),
            ));
        }
        if self.period_secs == 0 {
            return Err(RateLimitError::InvalidConfiguration(
                "period must be a positive duration".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(RateLimitError::InvalidConfiguration(
                "poll interval must be a positive duration".to_string(),
            ));
        }
        Ok(())
    }
}
