//! Reqwest-backed chat-completion source.
//!
//! One call is one HTTP request. Deadlines and retries are applied by the
//! domain's completion invoker, which drops this future when an attempt
//! times out.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::OpenAiConfig;
use super::dto::{ChatMessageDto, ChatRequestDto, ChatResponseDto};
use crate::domain::PromptText;
use crate::domain::ports::{CompletionSource, CompletionSourceError};
use crate::outbound::http_support::{AdapterBuildError, body_preview, build_client, endpoint};

/// System message framing every profile request.
const SYSTEM_PROMPT: &str =
    "You write short, friendly personality profiles of online community members.";
const USER_AGENT: &str = concat!("profile-backend/", env!("CARGO_PKG_VERSION"));

/// Completion adapter for OpenAI-compatible chat endpoints.
pub struct OpenAiCompletionSource {
    client: Client,
    completions_url: Url,
    config: OpenAiConfig,
}

impl OpenAiCompletionSource {
    /// Build the adapter; requests go to `{api_base}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed or the base URL
    /// cannot carry a path.
    pub fn new(config: OpenAiConfig) -> Result<Self, AdapterBuildError> {
        let client = build_client(config.timeout, USER_AGENT)?;
        let completions_url = endpoint(&config.api_base, ["chat", "completions"])?;
        Ok(Self {
            client,
            completions_url,
            config,
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a PromptText) -> ChatRequestDto<'a> {
        ChatRequestDto {
            model: self.config.model.as_str(),
            messages: [
                ChatMessageDto {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessageDto {
                    role: "user",
                    content: prompt.as_str(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl CompletionSource for OpenAiCompletionSource {
    async fn complete(&self, prompt: &PromptText) -> Result<String, CompletionSourceError> {
        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(self.config.api_key.expose())
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(CompletionSourceError::status(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }

        parse_completion(body.as_ref())
    }
}

fn parse_completion(body: &[u8]) -> Result<String, CompletionSourceError> {
    let decoded: ChatResponseDto = serde_json::from_slice(body).map_err(|error| {
        CompletionSourceError::malformed(format!("invalid completion JSON payload: {error}"))
    })?;
    decoded
        .into_first_content()
        .ok_or_else(|| CompletionSourceError::malformed("missing choices[0].message.content"))
}

fn map_transport_error(error: reqwest::Error) -> CompletionSourceError {
    CompletionSourceError::transport(error.to_string())
}

#[cfg(test)]
#[path = "completion_source_tests.rs"]
mod tests;
