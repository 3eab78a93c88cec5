//! Reqwest-backed Reddit comment listing.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::RedditEndpoints;
use super::dto::ListingDto;
use crate::domain::Handle;
use crate::domain::ports::{
    AccessToken, CommentLimit, CommentSet, CommentSource, CommentSourceError,
};
use crate::outbound::http_support::{AdapterBuildError, body_preview, build_client, endpoint};

/// Lists a user's most recent comments from `{api_base}/user/{handle}/comments`.
pub struct RedditCommentSource {
    client: Client,
    api_base: Url,
}

impl RedditCommentSource {
    /// Build the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed or the base URL
    /// cannot carry a path.
    pub fn new(endpoints: &RedditEndpoints) -> Result<Self, AdapterBuildError> {
        let client = build_client(endpoints.timeout, &endpoints.user_agent)?;
        endpoint(&endpoints.api_base, ["user"])?;
        Ok(Self {
            client,
            api_base: endpoints.api_base.clone(),
        })
    }

    fn listing_url(&self, handle: &Handle, limit: CommentLimit) -> Result<Url, CommentSourceError> {
        let mut url = endpoint(&self.api_base, ["user", handle.as_ref(), "comments"])
            .map_err(|error| CommentSourceError::transport(error.to_string()))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.get().to_string())
            .append_pair("raw_json", "1");
        Ok(url)
    }
}

#[async_trait]
impl CommentSource for RedditCommentSource {
    async fn fetch_comments(
        &self,
        handle: &Handle,
        token: &AccessToken,
        limit: CommentLimit,
    ) -> Result<CommentSet, CommentSourceError> {
        let url = self.listing_url(handle, limit)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            return Err(CommentSourceError::not_found(handle.as_ref()));
        }
        if !status.is_success() {
            return Err(CommentSourceError::status(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }

        let bodies = parse_listing(body.as_ref())?;
        let listed = bodies.len();
        let comments = CommentSet::from_bodies(bodies)
            .ok_or_else(|| CommentSourceError::empty(handle.as_ref()))?;
        debug!(
            handle = handle.as_ref(),
            listed,
            kept = comments.len(),
            "comment listing fetched"
        );
        Ok(comments)
    }
}

fn parse_listing(body: &[u8]) -> Result<Vec<String>, CommentSourceError> {
    let decoded: ListingDto = serde_json::from_slice(body).map_err(|error| {
        CommentSourceError::malformed(format!("expected data.children listing: {error}"))
    })?;
    Ok(decoded.into_bodies())
}

fn map_transport_error(error: reqwest::Error) -> CommentSourceError {
    CommentSourceError::transport(error.to_string())
}

#[cfg(test)]
#[path = "comment_source_tests.rs"]
mod tests;
