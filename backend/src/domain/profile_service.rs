//! Profile generation service.
//!
//! Implements the [`ProfileGenerator`] driving port by running one strictly
//! sequential chain per request: normalise the handle, exchange credentials,
//! list comments, reduce them to a prompt, and invoke the completion API.
//! Any stage failure aborts the chain and is mapped to a domain [`Error`]
//! exactly once, here.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::completion_invoker::{CompletionExhausted, CompletionInvoker};
use crate::domain::ports::{
    AccessTokenSource, AccessTokenSourceError, CommentLimit, CommentSource, CommentSourceError,
    ProfileGenerator, ProfileResult,
};
use crate::domain::prompt::reduce_comments;
use crate::domain::{Error, Handle, HandlePolicy, HandleValidationError, PromptBudget};

/// Message returned when the platform does not know the user.
pub const SUBJECT_NOT_FOUND_MESSAGE: &str = "Reddit user not found";
/// Message returned when the user has no usable comments.
pub const NO_CONTENT_MESSAGE: &str = "This user has no public comments";

/// Pipeline position, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalizing,
    Authenticating,
    Fetching,
    Reducing,
    Completing,
    Done,
}

impl Stage {
    /// Stable snake_case label for structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normalizing => "normalizing",
            Self::Authenticating => "authenticating",
            Self::Fetching => "fetching",
            Self::Reducing => "reducing",
            Self::Completing => "completing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables fixed at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileServiceConfig {
    pub handle_policy: HandlePolicy,
    pub comment_limit: CommentLimit,
    pub prompt_budget: PromptBudget,
}

/// Request orchestrator implementing [`ProfileGenerator`].
pub struct ProfileService<T, C> {
    tokens: Arc<T>,
    comments: Arc<C>,
    invoker: CompletionInvoker,
    config: ProfileServiceConfig,
}

impl<T, C> ProfileService<T, C> {
    /// Create a service from its collaborators.
    pub fn new(
        tokens: Arc<T>,
        comments: Arc<C>,
        invoker: CompletionInvoker,
        config: ProfileServiceConfig,
    ) -> Self {
        Self {
            tokens,
            comments,
            invoker,
            config,
        }
    }
}

impl<T, C> ProfileService<T, C>
where
    T: AccessTokenSource,
    C: CommentSource,
{
    fn map_handle_error(error: HandleValidationError) -> Error {
        Error::invalid_input(error.to_string())
    }

    fn map_token_error(error: AccessTokenSourceError) -> Error {
        match error {
            AccessTokenSourceError::Rejected { .. } => {
                Error::upstream_auth_failure(format!("Reddit authentication failed: {error}"))
            }
            AccessTokenSourceError::Transport { .. } | AccessTokenSourceError::Malformed { .. } => {
                Error::upstream_protocol(error.to_string())
            }
        }
    }

    fn map_comment_error(error: CommentSourceError) -> Error {
        match error {
            CommentSourceError::NotFound { .. } => {
                Error::subject_not_found(SUBJECT_NOT_FOUND_MESSAGE)
            }
            CommentSourceError::Empty { .. } => Error::no_content(NO_CONTENT_MESSAGE),
            CommentSourceError::Status { .. }
            | CommentSourceError::Transport { .. }
            | CommentSourceError::Malformed { .. } => Error::upstream_protocol(error.to_string()),
        }
    }

    fn map_completion_error(error: CompletionExhausted) -> Error {
        Error::completion_failure(error.last_error.to_string())
    }

    fn enter(stage: Stage, handle: &str) {
        debug!(stage = %stage, handle, "profile pipeline stage");
    }

    async fn run(&self, raw_handle: &str) -> Result<ProfileResult, Error> {
        Self::enter(Stage::Normalizing, raw_handle);
        let handle =
            Handle::parse(raw_handle, self.config.handle_policy).map_err(Self::map_handle_error)?;

        Self::enter(Stage::Authenticating, handle.as_ref());
        let token = self
            .tokens
            .fetch_token()
            .await
            .map_err(Self::map_token_error)?;

        Self::enter(Stage::Fetching, handle.as_ref());
        let comments = self
            .comments
            .fetch_comments(&handle, &token, self.config.comment_limit)
            .await
            .map_err(Self::map_comment_error)?;
        drop(token);

        Self::enter(Stage::Reducing, handle.as_ref());
        let prompt = reduce_comments(comments.bodies(), self.config.prompt_budget);
        debug!(
            handle = handle.as_ref(),
            comments = comments.len(),
            excerpt_chars = prompt.excerpt().chars().count(),
            "prompt reduced"
        );

        Self::enter(Stage::Completing, handle.as_ref());
        let outcome = self
            .invoker
            .invoke(&prompt)
            .await
            .map_err(Self::map_completion_error)?;

        Self::enter(Stage::Done, handle.as_ref());
        info!(
            handle = handle.as_ref(),
            attempts = outcome.attempts,
            "profile generated"
        );
        Ok(ProfileResult::new(outcome.text))
    }
}

#[async_trait]
impl<T, C> ProfileGenerator for ProfileService<T, C>
where
    T: AccessTokenSource,
    C: CommentSource,
{
    async fn generate_profile(&self, raw_handle: &str) -> Result<ProfileResult, Error> {
        let result = self.run(raw_handle).await;
        if let Err(error) = &result {
            warn!(
                kind = %error.kind(),
                error = %error,
                "profile generation failed"
            );
        }
        result
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
