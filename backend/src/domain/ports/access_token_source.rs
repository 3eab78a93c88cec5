//! Driven port for exchanging platform credentials for a bearer token.
//!
//! A token is fetched fresh for every profile request and dropped with it;
//! nothing caches or shares tokens across requests.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;

/// Short-lived bearer credential for the content platform.
///
/// `Debug` output is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

define_port_error! {
    /// Errors surfaced while obtaining a bearer token.
    pub enum AccessTokenSourceError {
        /// The token endpoint answered with a non-success status.
        Rejected { status: u16, body: String } =>
            "token exchange rejected with status {status}: {body}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "token exchange transport failed: {message}",
        /// The response did not carry a usable `access_token`.
        Malformed { message: String } =>
            "token response malformed: {message}",
    }
}

/// Port for obtaining a bearer token from the content platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Perform one credential exchange.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = source.fetch_token().await?;
    /// assert!(!token.expose().is_empty());
    /// ```
    async fn fetch_token(&self) -> Result<AccessToken, AccessTokenSourceError>;
}
