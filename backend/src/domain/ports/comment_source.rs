//! Driven port for reading a user's recent comments.
//!
//! The domain owns the limit and the non-empty comment set so the adapter only
//! deals with transport and decoding.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Handle;
use crate::domain::ports::AccessToken;

/// Largest page size the listing endpoint honours.
pub const COMMENT_LIMIT_MAX: u16 = 100;

/// Page-size limit for one listing call, within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLimit(u16);

impl CommentLimit {
    /// Build a limit, rejecting zero and values above [`COMMENT_LIMIT_MAX`].
    ///
    /// # Examples
    /// ```
    /// use profile_backend::domain::ports::CommentLimit;
    ///
    /// assert!(CommentLimit::new(0).is_none());
    /// assert!(CommentLimit::new(101).is_none());
    /// assert_eq!(CommentLimit::new(25).map(CommentLimit::get), Some(25));
    /// ```
    pub fn new(limit: u16) -> Option<Self> {
        (1..=COMMENT_LIMIT_MAX).contains(&limit).then_some(Self(limit))
    }

    /// Raw limit value.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl Default for CommentLimit {
    fn default() -> Self {
        Self(COMMENT_LIMIT_MAX)
    }
}

/// Non-empty, ordered comment bodies in the order the platform returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSet(Vec<String>);

impl CommentSet {
    /// Keep only bodies with visible text; `None` when nothing survives.
    ///
    /// # Examples
    /// ```
    /// use profile_backend::domain::ports::CommentSet;
    ///
    /// let set = CommentSet::from_bodies(vec!["  ".to_owned(), "hi".to_owned()])
    ///     .expect("one body");
    /// assert_eq!(set.bodies(), ["hi".to_owned()]);
    /// assert!(CommentSet::from_bodies(vec![String::new()]).is_none());
    /// ```
    pub fn from_bodies(bodies: impl IntoIterator<Item = String>) -> Option<Self> {
        let kept: Vec<String> = bodies
            .into_iter()
            .filter(|body| !body.trim().is_empty())
            .collect();
        (!kept.is_empty()).then_some(Self(kept))
    }

    /// Comment bodies in platform order.
    pub fn bodies(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Number of comments in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

define_port_error! {
    /// Errors surfaced while listing comments.
    pub enum CommentSourceError {
        /// The platform does not know the user.
        NotFound { handle: String } =>
            "user {handle} not found",
        /// The user exists but none of the listed items carry text.
        Empty { handle: String } =>
            "user {handle} has no public comments",
        /// Any other non-success status.
        Status { status: u16, body: String } =>
            "comment listing failed with status {status}: {body}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "comment listing transport failed: {message}",
        /// The response lacked the expected listing structure.
        Malformed { message: String } =>
            "comment listing malformed: {message}",
    }
}

/// Port for fetching the most recent comments of one user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Issue one listing request; no retries.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let comments = source.fetch_comments(&handle, &token, CommentLimit::default()).await?;
    /// assert!(!comments.is_empty());
    /// ```
    async fn fetch_comments(
        &self,
        handle: &Handle,
        token: &AccessToken,
        limit: CommentLimit,
    ) -> Result<CommentSet, CommentSourceError>;
}
