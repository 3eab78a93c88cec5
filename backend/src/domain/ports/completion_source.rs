//! Driven port for a single chat-completion call.
//!
//! Timeouts, retries, and backoff live in the domain invoker; adapters
//! perform exactly one request per call.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::PromptText;

define_port_error! {
    /// Errors surfaced by one completion attempt.
    pub enum CompletionSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "completion transport failed: {message}",
        /// The completion endpoint answered with a non-success status.
        Status { status: u16, body: String } =>
            "completion request failed with status {status}: {body}",
        /// The response lacked the expected completion text field.
        Malformed { message: String } =>
            "completion response malformed: {message}",
        /// The completion text was present but blank.
        EmptyCompletion {} =>
            "completion response contained no text",
        /// The attempt lost the race against the per-attempt deadline.
        Timeout { after_ms: u64 } =>
            "completion timed out after {after_ms} ms",
    }
}

/// Port for generating completion text from a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Send the prompt once and return the generated text.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let text = source.complete(&prompt).await?;
    /// ```
    async fn complete(&self, prompt: &PromptText) -> Result<String, CompletionSourceError>;
}
