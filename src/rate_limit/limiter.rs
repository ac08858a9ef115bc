//! Sliding-Window Rate Limiter
//!
//! Admission control for calls to the remote documents endpoint: at most
//! `limit` admissions occur within any trailing window of length `period`.
//! Callers over the limit are blocked, not rejected, until capacity frees
//! up.
//!
//! Admission is a reserve/commit split. [`RateLimiter::acquire`] prunes
//! expired usage records and, if the window has room, hands out a
//! [`Permit`] while counting the reservation against the window. Dropping
//! the permit commits a usage record stamped with the completion instant,
//! so the slot is consumed once the call has actually been attempted.
//! Prune, size check and reservation happen under a single lock
//! acquisition; two racing callers can never both observe the same free
//! slot.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::trace;

use super::config::RateLimitConfig;
use super::error::RateLimitError;

/// Default sleep between admission attempts when the window is full
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Snapshot of the limiter's window, taken after a prune
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct WindowUsage {
    /// Committed usage records currently inside the window
    pub recorded: usize,
    /// Permits handed out but not yet committed
    pub reserved: usize,
    /// Maximum admissions per window
    pub limit: usize,
}

impl WindowUsage {
    /// Number of slots an `acquire` call would find free right now
    pub fn available(&self) -> usize {
        self.limit.saturating_sub(self.recorded + self.reserved)
    }
}

#[derive(Debug)]
struct Window {
    /// Completion timestamps of past admissions, oldest first
    records: VecDeque<Instant>,
    /// Permits handed out but not yet committed
    reserved: usize,
    /// Set once by `close`; waiters observe it and give up
    closed: bool,
}

impl Window {
    /// Drop every record older than the window start. Pure cleanup, not an
    /// admission decision.
    fn prune(&mut self, now: Instant, period: Duration) {
        // Early in the process lifetime `now - period` can underflow; no
        // record can predate the window start in that case.
        let Some(window_start) = now.checked_sub(period) else {
            return;
        };
        while self.records.front().is_some_and(|t| *t < window_start) {
            self.records.pop_front();
        }
    }
}

#[derive(Debug)]
struct Inner {
    period: Duration,
    limit: usize,
    poll_interval: Duration,
    window: Mutex<Window>,
    shutdown: Notify,
}

/// Client-side sliding-window rate limiter.
///
/// Cloning is cheap and all clones share one window, so a limiter can be
/// handed to any number of concurrent tasks. The window state lives behind
/// a single mutex; critical sections never span an await point, and a
/// blocked caller always sleeps with the lock released.
///
/// ```no_run
/// # use std::time::Duration;
/// # use crpt_client::rate_limit::RateLimiter;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let limiter = RateLimiter::new(Duration::from_secs(1), 5)?;
/// let response = limiter.run_guarded(|| async { submit().await }).await?;
/// # Ok(())
/// # }
/// # async fn submit() -> u16 { 200 }
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    inner: Arc<Inner>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `limit` calls per trailing
    /// `period`.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::InvalidConfiguration`] if `limit` is zero
    /// (a zero limit would block every caller forever) or `period` is zero.
    pub fn new(period: Duration, limit: usize) -> Result<Self, RateLimitError> {
        Self::with_poll_interval(period, limit, DEFAULT_POLL_INTERVAL)
    }

    /// Create a limiter with a custom admission poll interval.
    pub fn with_poll_interval(
        period: Duration,
        limit: usize,
        poll_interval: Duration,
    ) -> Result<Self, RateLimitError> {
        if limit == 0 {
            return Err(RateLimitError::InvalidConfiguration(
                "limit must be a positive number".to_string(),
            ));
        }
        if period.is_zero() {
            return Err(RateLimitError::InvalidConfiguration(
                "period must be a positive duration".to_string(),
            ));
        }
        if poll_interval.is_zero() {
            return Err(RateLimitError::InvalidConfiguration(
                "poll interval must be a positive duration".to_string(),
            ));
        }

        Ok(Self {
            inner: Arc::new(Inner {
                period,
                limit,
                poll_interval,
                window: Mutex::new(Window {
                    records: VecDeque::with_capacity(limit),
                    reserved: 0,
                    closed: false,
                }),
                shutdown: Notify::new(),
            }),
        })
    }

    /// Build a limiter from a validated [`RateLimitConfig`].
    pub fn from_config(config: &RateLimitConfig) -> Result<Self, RateLimitError> {
        config.validate()?;
        Self::with_poll_interval(config.period(), config.limit, config.poll_interval())
    }

    /// Maximum admissions per window
    pub fn limit(&self) -> usize {
        self.inner.limit
    }

    /// Length of the sliding window
    pub fn period(&self) -> Duration {
        self.inner.period
    }

    /// Block until the window has room, then reserve a slot.
    ///
    /// The returned [`Permit`] commits the usage record when dropped; hold
    /// it across the guarded call. Waiting callers recheck the window every
    /// poll interval. No fairness is guaranteed between waiters; whichever
    /// task observes the free slot first takes it.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Cancelled`] if [`close`](Self::close) is
    /// called before a slot frees up. Cancellation never leaves a partial
    /// reservation behind, and neither does dropping the returned future.
    pub async fn acquire(&self) -> Result<Permit, RateLimitError> {
        loop {
            {
                let mut window = self.inner.window.lock().unwrap();
                if window.closed {
                    return Err(RateLimitError::Cancelled);
                }
                window.prune(Instant::now(), self.inner.period);
                if window.records.len() + window.reserved < self.inner.limit {
                    window.reserved += 1;
                    return Ok(Permit {
                        inner: Arc::clone(&self.inner),
                    });
                }
            }

            trace!(
                limit = self.inner.limit,
                "window full, waiting for a free slot"
            );
            tokio::select! {
                _ = tokio::time::sleep(self.inner.poll_interval) => {}
                _ = self.inner.shutdown.notified() => {}
            }
        }
    }

    /// Run `operation` under the rate limit.
    ///
    /// Blocks until a slot is available, invokes the operation, and records
    /// usage unconditionally once the operation has been attempted. The
    /// operation's output is returned verbatim; a failing operation still
    /// consumes its slot. The limiter never logs or suppresses on the
    /// operation's behalf.
    pub async fn run_guarded<F, Fut>(&self, operation: F) -> Result<Fut::Output, RateLimitError>
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let permit = self.acquire().await?;
        let output = operation().await;
        permit.record_usage();
        Ok(output)
    }

    /// Shut the limiter down, failing all waiting callers with
    /// [`RateLimitError::Cancelled`].
    ///
    /// Waiters parked between admission attempts wake within one poll
    /// interval at the latest. Permits already handed out still commit
    /// their usage records when dropped.
    pub fn close(&self) {
        {
            let mut window = self.inner.window.lock().unwrap();
            window.closed = true;
        }
        self.inner.shutdown.notify_waiters();
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.inner.window.lock().unwrap().closed
    }

    /// Snapshot the window after pruning expired records.
    ///
    /// Observability only; admission decisions never go through this path.
    pub fn current_usage(&self) -> WindowUsage {
        let mut window = self.inner.window.lock().unwrap();
        window.prune(Instant::now(), self.inner.period);
        WindowUsage {
            recorded: window.records.len(),
            reserved: window.reserved,
            limit: self.inner.limit,
        }
    }
}

/// A reserved slot in the limiter's window.
///
/// Dropping the permit is the commit half of the reserve/commit split: the
/// reservation becomes a usage record stamped with the completion instant.
/// This runs even when the guarded operation fails or panics, mirroring
/// "the slot is consumed once you've actually used it".
#[derive(Debug)]
pub struct Permit {
    inner: Arc<Inner>,
}

impl Permit {
    /// Consume the permit, recording usage at the current instant.
    ///
    /// Equivalent to dropping the permit; spelled out for callers pairing
    /// [`RateLimiter::acquire`] with an explicit completion report.
    pub fn record_usage(self) {
        drop(self);
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        let mut window = self.inner.window.lock().unwrap();
        window.reserved = window.reserved.saturating_sub(1);
        window.records.push_back(Instant::now());
    }
}
