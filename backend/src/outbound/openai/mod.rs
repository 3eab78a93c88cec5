//! OpenAI chat-completions outbound adapter.

mod completion_source;
mod dto;

use std::time::Duration;

use reqwest::Url;

use crate::settings::Secret;

pub use completion_source::OpenAiCompletionSource;

/// Default API base URL, including the version segment.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Output-token budget for one profile.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// Sampling temperature for profile generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection and sampling settings for the completion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    pub api_base: Url,
    pub api_key: Secret,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Transport-level ceiling; the domain races a tighter per-attempt deadline.
    pub timeout: Duration,
}
