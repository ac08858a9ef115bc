//! Rate Limiter Error Types

/// Error types for rate limiter operations
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// The limiter was constructed with unusable parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The wait for a free slot was interrupted by [`close`](crate::rate_limit::RateLimiter::close)
    #[error("Acquisition cancelled: limiter is shut down")]
    Cancelled,
}
