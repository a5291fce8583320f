use std::time::Duration;

/// Configures how many times a request is retried and how long to wait
/// between attempts.
///
/// The wait before retry `i` (1-indexed) is `backoff_ms * 2^(i-1)`. There is
/// no upper cap on a single wait; large `retries` values grow the schedule
/// without bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub retries: u32,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff_ms: 200,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff_ms: u64) -> Self {
        Self {
            retries,
            backoff_ms,
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.backoff_ms = backoff_ms;
        self
    }

    /// Upper bound on the number of requests issued for one call.
    pub fn max_attempts(&self) -> u64 {
        u64::from(self.retries) + 1
    }

    /// Delay before retry number `retry` (1-indexed). Retry 0 is the
    /// initial attempt and never waits.
    ///
    /// Saturates at `u64::MAX` milliseconds instead of overflowing.
    pub fn delay_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let multiplier = 1u64.checked_shl(retry - 1).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_ms.saturating_mul(multiplier))
    }

    /// Sum of every wait in the schedule: `backoff_ms * (2^retries - 1)`.
    pub fn max_total_delay(&self) -> Duration {
        let multiplier = 1u64
            .checked_shl(self.retries)
            .map_or(u64::MAX, |value| value - 1);
        Duration::from_millis(self.backoff_ms.saturating_mul(multiplier))
    }
}
