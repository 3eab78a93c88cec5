//! Transport helpers shared by the reqwest-backed adapters.

use std::time::Duration;

use reqwest::{Client, Url};

/// Errors raised while constructing an outbound adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The configured base URL cannot carry path segments.
    #[error("base URL {url} cannot carry path segments")]
    BaseUrl { url: String },
}

/// Build a client with an overall request timeout and a fixed user agent.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// Append percent-encoded path segments to `base`, keeping its own path.
///
/// `https://api.example.com/v1` + `["chat", "completions"]` yields
/// `https://api.example.com/v1/chat/completions`; `Url::join` would drop `v1`.
pub(crate) fn endpoint<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, AdapterBuildError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|()| AdapterBuildError::BaseUrl {
            url: base.to_string(),
        })?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// Whitespace-compacted, length-capped rendering of an upstream body.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.openai.com/v1", "https://api.openai.com/v1/chat/completions")]
    #[case("https://api.openai.com/v1/", "https://api.openai.com/v1/chat/completions")]
    #[case("http://127.0.0.1:9000", "http://127.0.0.1:9000/chat/completions")]
    fn endpoint_keeps_base_path(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        let url = endpoint(&base, ["chat", "completions"]).expect("joinable");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn endpoint_percent_encodes_segments() {
        let base = Url::parse("https://oauth.reddit.com").expect("valid base");
        let url = endpoint(&base, ["user", "a/b c", "comments"]).expect("joinable");
        assert_eq!(url.path(), "/user/a%2Fb%20c/comments");
    }

    #[rstest]
    fn endpoint_rejects_opaque_base() {
        let base = Url::parse("mailto:ops@example.com").expect("valid url");
        let error = endpoint(&base, ["x"]).expect_err("cannot be a base");
        assert!(matches!(error, AdapterBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn preview_compacts_whitespace() {
        assert_eq!(body_preview(b"{\n  \"error\":   401\n}"), "{ \"error\": 401 }");
    }

    #[rstest]
    fn preview_is_capped() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
