//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_source;
mod comment_source;
mod completion_source;
mod profile_generator;

#[cfg(test)]
pub use access_token_source::MockAccessTokenSource;
pub use access_token_source::{AccessToken, AccessTokenSource, AccessTokenSourceError};
#[cfg(test)]
pub use comment_source::MockCommentSource;
pub use comment_source::{
    COMMENT_LIMIT_MAX, CommentLimit, CommentSet, CommentSource, CommentSourceError,
};
#[cfg(test)]
pub use completion_source::MockCompletionSource;
pub use completion_source::{CompletionSource, CompletionSourceError};
#[cfg(test)]
pub use profile_generator::MockProfileGenerator;
pub use profile_generator::{ProfileGenerator, ProfileResult};
