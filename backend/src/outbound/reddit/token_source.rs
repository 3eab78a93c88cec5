//! Reqwest-backed Reddit token exchange.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::TokenResponseDto;
use super::{AuthGrant, RedditCredentials, RedditEndpoints};
use crate::domain::ports::{AccessToken, AccessTokenSource, AccessTokenSourceError};
use crate::outbound::http_support::{AdapterBuildError, body_preview, build_client, endpoint};

/// Exchanges application credentials for a bearer token on every call.
pub struct RedditTokenSource {
    client: Client,
    token_url: Url,
    credentials: RedditCredentials,
}

impl RedditTokenSource {
    /// Build the adapter; the token URL is `{auth_base}/api/v1/access_token`.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed or the base URL
    /// cannot carry a path.
    pub fn new(
        endpoints: &RedditEndpoints,
        credentials: RedditCredentials,
    ) -> Result<Self, AdapterBuildError> {
        let client = build_client(endpoints.timeout, &endpoints.user_agent)?;
        let token_url = endpoint(&endpoints.auth_base, ["api", "v1", "access_token"])?;
        Ok(Self {
            client,
            token_url,
            credentials,
        })
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        match &self.credentials.grant {
            AuthGrant::ClientCredentials => vec![("grant_type", "client_credentials")],
            AuthGrant::Password { username, password } => vec![
                ("grant_type", "password"),
                ("username", username.as_str()),
                ("password", password.expose()),
            ],
        }
    }
}

#[async_trait]
impl AccessTokenSource for RedditTokenSource {
    async fn fetch_token(&self) -> Result<AccessToken, AccessTokenSourceError> {
        debug!(grant = self.credentials.grant.label(), "requesting access token");
        let response = self
            .client
            .post(self.token_url.clone())
            .basic_auth(
                &self.credentials.client_id,
                Some(self.credentials.client_secret.expose()),
            )
            .form(&self.form())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(AccessTokenSourceError::rejected(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }

        parse_token(status.as_u16(), body.as_ref())
    }
}

fn parse_token(status: u16, body: &[u8]) -> Result<AccessToken, AccessTokenSourceError> {
    let decoded: TokenResponseDto = serde_json::from_slice(body).map_err(|error| {
        AccessTokenSourceError::malformed(format!("invalid token JSON payload: {error}"))
    })?;
    match decoded {
        TokenResponseDto {
            access_token: Some(token),
            ..
        } if !token.trim().is_empty() => Ok(AccessToken::new(token)),
        TokenResponseDto { error: Some(_), .. } => {
            Err(AccessTokenSourceError::rejected(status, body_preview(body)))
        }
        _ => Err(AccessTokenSourceError::malformed(
            "response carried no access_token",
        )),
    }
}

fn map_transport_error(error: reqwest::Error) -> AccessTokenSourceError {
    AccessTokenSourceError::transport(error.to_string())
}

#[cfg(test)]
#[path = "token_source_tests.rs"]
mod tests;
