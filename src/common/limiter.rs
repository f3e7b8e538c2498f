//! Token-bucket limiter shared by every quota-bound request
//!
//! The bucket holds `capacity` tokens per `refill_window`. Each grant is
//! remembered until it is a full window old, so no `refill_window`-long
//! interval ever contains more than `capacity` grants. Waiters queue on a
//! fair async mutex and are served in arrival order.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use super::errors::{Result, StatsError};
use crate::config::types::LimiterConfig;

/// Process-wide rate limiter. Share it with `Arc`.
#[derive(Debug)]
pub struct TokenBucketLimiter {
    capacity: usize,
    refill_window: Duration,
    /// Grant instants inside the current window, oldest first
    grants: Mutex<VecDeque<Instant>>,
}

impl TokenBucketLimiter {
    /// Create a limiter allowing `capacity` grants per `refill_window`
    ///
    /// A zero capacity or zero window could never make progress (or never
    /// limit anything) and is rejected as a configuration error.
    pub fn new(capacity: usize, refill_window: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(StatsError::Configuration(
                "limiter capacity must be at least 1".to_string(),
            ));
        }
        if refill_window.is_zero() {
            return Err(StatsError::Configuration(
                "limiter refill window must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            refill_window,
            grants: Mutex::new(VecDeque::with_capacity(capacity)),
        })
    }

    /// Create a limiter from the `[limiter]` config section
    pub fn from_config(config: &LimiterConfig) -> Result<Self> {
        Self::new(
            config.capacity,
            Duration::from_millis(config.refill_window_ms),
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn refill_window(&self) -> Duration {
        self.refill_window
    }

    /// Wait until a token is available and take it
    ///
    /// Cancel-safe: a caller dropped while waiting takes no token.
    pub async fn acquire(&self) {
        // Holding the lock while sleeping keeps later callers queued behind us.
        let mut grants = self.grants.lock().await;

        loop {
            let now = Instant::now();
            while let Some(&oldest) = grants.front() {
                if now.saturating_duration_since(oldest) >= self.refill_window {
                    grants.pop_front();
                } else {
                    break;
                }
            }

            if grants.len() < self.capacity {
                grants.push_back(now);
                trace!(
                    "Token granted, {} of {} used in window",
                    grants.len(),
                    self.capacity
                );
                return;
            }

            if let Some(&oldest) = grants.front() {
                let ready_at = oldest + self.refill_window;
                debug!(
                    "Quota exhausted, waiting {:?} for the next token",
                    ready_at.saturating_duration_since(now)
                );
                sleep_until(ready_at).await;
            }
        }
    }
}
