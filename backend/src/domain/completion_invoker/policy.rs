//! Retry and timeout policy for completion attempts.

use std::time::Duration;

/// Attempt budget, per-attempt deadline, and backoff shape.
///
/// Backoff is deterministic: the delay after failed attempt `n` is
/// `initial_backoff * 2^(n - 1)`, capped at `max_backoff`. With the defaults
/// that is 2 s after the first failure and 4 s after the second; no delay
/// follows the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts including the first call; zero is treated as one.
    pub max_attempts: u32,
    /// Deadline raced against each attempt.
    pub attempt_timeout: Duration,
    /// Delay after the first failed attempt.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(30),
            initial_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Effective attempt budget.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use profile_backend::domain::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
    /// assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
    /// assert_eq!(policy.backoff_delay(3), Duration::from_secs(8));
    /// assert_eq!(policy.backoff_delay(9), Duration::from_secs(8));
    /// ```
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(exponent)
            .min(self.max_backoff)
    }
}
