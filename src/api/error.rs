//! API Client Error Types
//!
//! This module defines all error types that can occur while submitting a
//! document.

use crate::rate_limit::RateLimitError;

/// Error types for document submission
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rate limiter rejected or cancelled the attempt
    #[error("Rate limiter error: {0}")]
    RateLimit(#[from] RateLimitError),

    /// Document could not be serialized to JSON
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport failure
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("API returned status {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body as returned by the endpoint
        body: String,
    },
}
