//! Reddit outbound adapters.
//!
//! Thin reqwest implementations of the `AccessTokenSource` and
//! `CommentSource` ports. Each call performs exactly one request; retries and
//! error classification beyond transport live in the domain.

mod comment_source;
mod dto;
mod token_source;

use std::time::Duration;

use reqwest::Url;

use crate::settings::Secret;

pub use comment_source::RedditCommentSource;
pub use token_source::RedditTokenSource;

/// Default token endpoint host.
pub const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com";
/// Default host for authenticated API calls.
pub const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
/// Default user agent; Reddit throttles generic agents aggressively.
pub const DEFAULT_USER_AGENT: &str = "profile-backend/0.1";

/// How the service authenticates against the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthGrant {
    /// Application-only `client_credentials` grant.
    ClientCredentials,
    /// Resource-owner `password` grant for a script application.
    Password { username: String, password: Secret },
}

impl AuthGrant {
    /// Label used in start-up logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ClientCredentials => "client_credentials",
            Self::Password { .. } => "password",
        }
    }
}

/// Registered application credentials plus the grant to use with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: Secret,
    pub grant: AuthGrant,
}

/// Endpoints and transport settings shared by both Reddit adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditEndpoints {
    /// Base URL of the token endpoint host.
    pub auth_base: Url,
    /// Base URL for bearer-authenticated listing calls.
    pub api_base: Url,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Overall per-request timeout.
    pub timeout: Duration,
}
