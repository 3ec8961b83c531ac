//! Exponential backoff between failed poll cycles.
//!
//! # Example
//! ```rust
//! use relay_coordinator::jobs::BackoffRetryPolicy;
//! use std::time::Duration;
//!
//! let policy = BackoffRetryPolicy {
//!     retries: 5,
//!     initial_backoff: Duration::from_secs(1),
//!     multiplier: 2.0,
//!     max_backoff: Duration::from_secs(60),
//! };
//! assert_eq!(policy.backoff_duration(1), Some(Duration::from_secs(2)));
//! ```
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct BackoffRetryPolicy {
    /// Consecutive failures tolerated before the poller gives up
    pub retries: usize,
    /// Delay after the first failure
    pub initial_backoff: Duration,
    /// Factor by which the delay grows with every further failure
    pub multiplier: f64,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl Default for BackoffRetryPolicy {
    fn default() -> Self {
        Self {
            retries: 5,
            initial_backoff: Duration::from_millis(1000),
            multiplier: 1.5,
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl BackoffRetryPolicy {
    /// Delay before retrying after failure number `attempt` (zero based), or
    /// `None` once the retries are used up.
    pub fn backoff_duration(&self, attempt: usize) -> Option<Duration> {
        if attempt >= self.retries {
            return None;
        }
        let backoff =
            self.initial_backoff.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        Some(Duration::from_millis(
            backoff.min(self.max_backoff.as_millis() as f64) as u64,
        ))
    }
}
