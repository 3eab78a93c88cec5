//! Resilient invocation of the completion port.
//!
//! Each attempt races the completion call against a deadline; the first to
//! settle wins and a late response is discarded with its future. Failed
//! attempts are followed by a deterministic exponential backoff until the
//! attempt budget is spent, at which point the last failure is surfaced.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::PromptText;
use crate::domain::ports::{CompletionSource, CompletionSourceError};

mod policy;
mod runtime;

pub use policy::RetryPolicy;
pub use runtime::{BackoffSleeper, TokioSleeper};

/// Successful completion together with the attempt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Generated text, trimmed of surrounding whitespace.
    pub text: String,
    /// 1-based attempt number that succeeded.
    pub attempts: u32,
}

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("completion failed after {attempts} attempt(s): {last_error}")]
pub struct CompletionExhausted {
    /// Attempts made before giving up.
    pub attempts: u32,
    /// Failure observed on the final attempt.
    pub last_error: CompletionSourceError,
}

/// Domain-owned completion invoker.
pub struct CompletionInvoker {
    source: Arc<dyn CompletionSource>,
    sleeper: Arc<dyn BackoffSleeper>,
    policy: RetryPolicy,
}

impl CompletionInvoker {
    /// Build an invoker that sleeps on the Tokio timer between attempts.
    /// ```rust,ignore
    /// let invoker = CompletionInvoker::new(source, RetryPolicy::default());
    /// ```
    pub fn new(source: Arc<dyn CompletionSource>, policy: RetryPolicy) -> Self {
        Self::with_sleeper(source, Arc::new(TokioSleeper), policy)
    }

    /// Build an invoker with an injected sleeper.
    pub fn with_sleeper(
        source: Arc<dyn CompletionSource>,
        sleeper: Arc<dyn BackoffSleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            sleeper,
            policy,
        }
    }

    /// Generate completion text, retrying failed attempts with backoff.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionExhausted`] carrying the final attempt's failure
    /// once the attempt budget is spent.
    pub async fn invoke(
        &self,
        prompt: &PromptText,
    ) -> Result<CompletionOutcome, CompletionExhausted> {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            let last_error = match self.run_single_attempt(prompt).await {
                Ok(text) => {
                    debug!(attempt, "completion attempt succeeded");
                    return Ok(CompletionOutcome {
                        text,
                        attempts: attempt,
                    });
                }
                Err(error) => error,
            };

            if attempt >= max_attempts {
                warn!(
                    attempt,
                    max_attempts,
                    reason = last_error.label(),
                    error = %last_error,
                    "completion attempt failed; retry budget exhausted"
                );
                return Err(CompletionExhausted {
                    attempts: attempt,
                    last_error,
                });
            }

            let delay = self.policy.backoff_delay(attempt);
            warn!(
                attempt,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                reason = last_error.label(),
                error = %last_error,
                "completion attempt failed; backing off"
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    async fn run_single_attempt(
        &self,
        prompt: &PromptText,
    ) -> Result<String, CompletionSourceError> {
        let deadline = self.policy.attempt_timeout;
        match tokio::time::timeout(deadline, self.source.complete(prompt)).await {
            Err(_elapsed) => Err(CompletionSourceError::timeout(
                u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            )),
            Ok(Err(error)) => Err(error),
            Ok(Ok(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Err(CompletionSourceError::empty_completion())
                } else {
                    Ok(trimmed.to_owned())
                }
            }
        }
    }
}
