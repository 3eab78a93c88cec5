//! Domain primitives, ports, and services.
//!
//! Purpose: Hold the transport-agnostic core of the profile pipeline. Nothing
//! here knows about HTTP status codes, JSON envelopes, or concrete upstream
//! clients; adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorKind: failure taxonomy shared by every adapter.
//! - Handle / HandlePolicy: normalised target user.
//! - PromptBudget / PromptText / reduce_comments: prompt reduction.
//! - CompletionInvoker / RetryPolicy: resilient completion calls.
//! - ProfileService: request orchestrator behind `ProfileGenerator`.

pub mod completion_invoker;
pub mod error;
pub mod handle;
pub mod ports;
pub mod profile_service;
pub mod prompt;

pub use self::completion_invoker::{
    BackoffSleeper, CompletionExhausted, CompletionInvoker, CompletionOutcome, RetryPolicy,
    TokioSleeper,
};
pub use self::error::{Error, ErrorKind};
pub use self::handle::{Handle, HandlePolicy, HandleValidationError};
pub use self::profile_service::{ProfileService, ProfileServiceConfig, Stage};
pub use self::prompt::{PromptBudget, PromptText, reduce_comments};
