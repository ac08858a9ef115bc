//! Rate Limiting Module
//!
//! This module provides client-side admission control for calls to the
//! CRPT documents endpoint: a sliding-window limiter that blocks callers
//! once the configured number of calls has been dispatched within the
//! trailing period.
//!
//! # Features
//!
//! - Sliding window over monotonic timestamps, pruned on every attempt
//! - Blocking admission with a configurable poll interval
//! - Reserve/commit split: a slot is consumed when the call is attempted
//! - Safe under concurrent callers sharing one limiter
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RateLimiter                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  acquire ──► prune + check + reserve (one lock acquisition)  │
//! │     │                                                        │
//! │     └─ window full ──► sleep poll interval, retry            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Permit drop ──► usage record stamped at completion          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod limiter;

pub use config::RateLimitConfig;
pub use error::RateLimitError;
pub use limiter::{Permit, RateLimiter, WindowUsage, DEFAULT_POLL_INTERVAL};
