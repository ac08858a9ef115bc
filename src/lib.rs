//! CRPT API Client Library
//!
//! This library provides a rate-limited client for the CRPT ("Chestny
//! Znak") goods-marking API: document types for the introduce-goods
//! operation, an HTTP submission client, and the sliding-window rate
//! limiter that keeps submissions under the endpoint's request limit.

pub mod api;
pub mod config;
pub mod logging;
pub mod rate_limit;

pub use api::{ApiError, CrptClient, DocumentResponse, GoodsIntroductionDocument, Product};
pub use config::Config;
pub use rate_limit::{RateLimitConfig, RateLimitError, RateLimiter};
