//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorKind`] to a status code and JSON envelope in a single pass; nothing
//! in the domain knows about status codes.

use std::fmt;

use crate::middleware::trace::TraceId;

/// Failure category surfaced by the profile pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The supplied username is missing or malformed.
    InvalidInput,
    /// The content platform rejected the credential exchange.
    UpstreamAuthFailure,
    /// The content platform does not know the requested user.
    SubjectNotFound,
    /// The user exists but has no usable text submissions.
    NoContent,
    /// The content platform answered with something unexpected.
    UpstreamProtocolError,
    /// Every completion attempt failed.
    CompletionFailure,
    /// Anything not covered by the categories above.
    Unknown,
}

impl ErrorKind {
    /// Stable snake_case label used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::UpstreamAuthFailure => "upstream_auth_failure",
            Self::SubjectNotFound => "subject_not_found",
            Self::NoContent => "no_content",
            Self::UpstreamProtocolError => "upstream_protocol_error",
            Self::CompletionFailure => "completion_failure",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// Captures the trace identifier in scope at construction time so failures
/// can be correlated with request logs.
///
/// # Examples
/// ```
/// use profile_backend::domain::{Error, ErrorKind};
///
/// let err = Error::no_content("This user has no public comments");
/// assert_eq!(err.kind(), ErrorKind::NoContent);
/// assert_eq!(err.message(), "This user has no public comments");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was created, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a trace identifier to the error.
    ///
    /// # Examples
    /// ```
    /// use profile_backend::domain::Error;
    ///
    /// let err = Error::unknown("boom").with_trace_id("abc");
    /// assert_eq!(err.trace_id(), Some("abc"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorKind::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Convenience constructor for [`ErrorKind::UpstreamAuthFailure`].
    pub fn upstream_auth_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamAuthFailure, message)
    }

    /// Convenience constructor for [`ErrorKind::SubjectNotFound`].
    pub fn subject_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SubjectNotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::NoContent`].
    pub fn no_content(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoContent, message)
    }

    /// Convenience constructor for [`ErrorKind::UpstreamProtocolError`].
    pub fn upstream_protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamProtocolError, message)
    }

    /// Convenience constructor for [`ErrorKind::CompletionFailure`].
    pub fn completion_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CompletionFailure, message)
    }

    /// Convenience constructor for [`ErrorKind::Unknown`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
