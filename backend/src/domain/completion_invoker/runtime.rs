//! Runtime helpers used by the retry loop.

use std::time::Duration;

use async_trait::async_trait;

/// Async sleeping abstraction so backoff can be observed in tests.
#[async_trait]
pub trait BackoffSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    ///
    /// ```rust,no_run
    /// use async_trait::async_trait;
    /// use profile_backend::domain::BackoffSleeper;
    /// use std::sync::Mutex;
    /// use std::time::Duration;
    /// #[derive(Default)]
    /// struct CountingSleeper {
    ///     calls: Mutex<u32>,
    /// }
    /// #[async_trait]
    /// impl BackoffSleeper for CountingSleeper {
    ///     async fn sleep(&self, _duration: Duration) {
    ///         *self.calls.lock().expect("calls mutex") += 1;
    ///     }
    /// }
    /// ```
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper; dropping the future cancels the wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl BackoffSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
