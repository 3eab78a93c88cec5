//! Environment-driven service configuration.
//!
//! Everything is read once at start-up through [`mockable::Env`] and
//! validated before the server binds, so a missing credential fails the
//! process instead of the first request.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use mockable::Env;
use reqwest::Url;
use tracing::info;

use crate::domain::ports::CommentLimit;
use crate::domain::{HandlePolicy, ProfileServiceConfig, PromptBudget, RetryPolicy};
use crate::outbound::openai::{self, OpenAiConfig};
use crate::outbound::reddit::{self, AuthGrant, RedditCredentials, RedditEndpoints};

mod secret;

pub use secret::Secret;

const REDDIT_CLIENT_ID_ENV: &str = "REDDIT_CLIENT_ID";
const REDDIT_CLIENT_SECRET_ENV: &str = "REDDIT_CLIENT_SECRET";
const REDDIT_USERNAME_ENV: &str = "REDDIT_USERNAME";
const REDDIT_PASSWORD_ENV: &str = "REDDIT_PASSWORD";
const REDDIT_AUTH_BASE_ENV: &str = "REDDIT_AUTH_BASE";
const REDDIT_API_BASE_ENV: &str = "REDDIT_API_BASE";
const REDDIT_USER_AGENT_ENV: &str = "REDDIT_USER_AGENT";
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
const OPENAI_API_BASE_ENV: &str = "OPENAI_API_BASE";
const COMMENT_LIMIT_ENV: &str = "PROFILE_COMMENT_LIMIT";
const PROMPT_MAX_CHARS_ENV: &str = "PROFILE_PROMPT_MAX_CHARS";
const VALIDATE_HANDLES_ENV: &str = "PROFILE_VALIDATE_HANDLES";
const COMPLETION_TIMEOUT_ENV: &str = "COMPLETION_TIMEOUT_SECS";
const COMPLETION_MAX_ATTEMPTS_ENV: &str = "COMPLETION_MAX_ATTEMPTS";
const HTTP_CLIENT_TIMEOUT_ENV: &str = "HTTP_CLIENT_TIMEOUT_SECS";
const BIND_ADDR_ENV: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const URL_EXPECTED: &str = "an absolute http(s) URL";
const POSITIVE_EXPECTED: &str = "a positive integer";
const LIMIT_EXPECTED: &str = "an integer in 1..=100";
const ADDR_EXPECTED: &str = "host:port";

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Only one half of the password-grant credentials was supplied.
    #[error("{present} is set but {missing} is not; set both or neither")]
    IncompletePasswordGrant {
        present: &'static str,
        missing: &'static str,
    },
}

/// Fully validated process configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    pub reddit_endpoints: RedditEndpoints,
    pub reddit_credentials: RedditCredentials,
    pub openai: OpenAiConfig,
    pub service: ProfileServiceConfig,
    pub retry: RetryPolicy,
}

impl Settings {
    /// Log the active configuration; secrets appear only as fingerprints.
    pub fn log_summary(&self) {
        info!(
            bind_addr = %self.bind_addr,
            reddit_client_id = %self.reddit_credentials.client_id,
            reddit_secret_fingerprint = %self.reddit_credentials.client_secret.fingerprint(),
            reddit_grant = self.reddit_credentials.grant.label(),
            reddit_api_base = %self.reddit_endpoints.api_base,
            openai_key_fingerprint = %self.openai.api_key.fingerprint(),
            openai_model = %self.openai.model,
            comment_limit = self.service.comment_limit.get(),
            prompt_max_chars = self.service.prompt_budget.max_chars(),
            validate_handles = self.service.handle_policy.validate_shape,
            completion_attempts = self.retry.attempts(),
            completion_timeout_secs = self.retry.attempt_timeout.as_secs(),
            "configuration loaded"
        );
    }
}

/// Build settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use profile_backend::settings::settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "REDDIT_CLIENT_ID" => Some("id".to_owned()),
///     "REDDIT_CLIENT_SECRET" => Some("secret".to_owned()),
///     "OPENAI_API_KEY" => Some("sk-test".to_owned()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env).expect("valid settings");
/// assert_eq!(settings.service.comment_limit.get(), 100);
/// ```
///
/// # Errors
///
/// Returns [`SettingsError`] naming the first missing or invalid variable.
pub fn settings_from_env<E: Env>(env: &E) -> Result<Settings, SettingsError> {
    let reddit_credentials = reddit_credentials_from_env(env)?;
    let http_timeout = Duration::from_secs(positive_from_env(
        env,
        HTTP_CLIENT_TIMEOUT_ENV,
        DEFAULT_HTTP_CLIENT_TIMEOUT_SECS,
    )?);
    let reddit_endpoints = RedditEndpoints {
        auth_base: url_from_env(env, REDDIT_AUTH_BASE_ENV, reddit::DEFAULT_AUTH_BASE)?,
        api_base: url_from_env(env, REDDIT_API_BASE_ENV, reddit::DEFAULT_API_BASE)?,
        user_agent: optional(env, REDDIT_USER_AGENT_ENV)
            .unwrap_or_else(|| reddit::DEFAULT_USER_AGENT.to_owned()),
        timeout: http_timeout,
    };

    let defaults = RetryPolicy::default();
    let retry = RetryPolicy {
        max_attempts: positive_from_env(env, COMPLETION_MAX_ATTEMPTS_ENV, defaults.max_attempts)?,
        attempt_timeout: Duration::from_secs(positive_from_env(
            env,
            COMPLETION_TIMEOUT_ENV,
            defaults.attempt_timeout.as_secs(),
        )?),
        ..defaults
    };

    let openai = OpenAiConfig {
        api_base: url_from_env(env, OPENAI_API_BASE_ENV, openai::DEFAULT_API_BASE)?,
        api_key: Secret::new(required(env, OPENAI_API_KEY_ENV)?),
        model: optional(env, OPENAI_MODEL_ENV).unwrap_or_else(|| openai::DEFAULT_MODEL.to_owned()),
        max_tokens: openai::DEFAULT_MAX_TOKENS,
        temperature: openai::DEFAULT_TEMPERATURE,
        timeout: retry.attempt_timeout.max(http_timeout),
    };

    let service = ProfileServiceConfig {
        handle_policy: HandlePolicy {
            validate_shape: bool_from_env(env, VALIDATE_HANDLES_ENV, true)?,
        },
        comment_limit: comment_limit_from_env(env)?,
        prompt_budget: prompt_budget_from_env(env)?,
    };

    Ok(Settings {
        bind_addr: bind_addr_from_env(env)?,
        reddit_endpoints,
        reddit_credentials,
        openai,
        service,
        retry,
    })
}

fn reddit_credentials_from_env<E: Env>(env: &E) -> Result<RedditCredentials, SettingsError> {
    let client_id = required(env, REDDIT_CLIENT_ID_ENV)?;
    let client_secret = Secret::new(required(env, REDDIT_CLIENT_SECRET_ENV)?);
    let grant = match (
        optional(env, REDDIT_USERNAME_ENV),
        optional(env, REDDIT_PASSWORD_ENV),
    ) {
        (Some(username), Some(password)) => AuthGrant::Password {
            username,
            password: Secret::new(password),
        },
        (None, None) => AuthGrant::ClientCredentials,
        (Some(_), None) => {
            return Err(SettingsError::IncompletePasswordGrant {
                present: REDDIT_USERNAME_ENV,
                missing: REDDIT_PASSWORD_ENV,
            });
        }
        (None, Some(_)) => {
            return Err(SettingsError::IncompletePasswordGrant {
                present: REDDIT_PASSWORD_ENV,
                missing: REDDIT_USERNAME_ENV,
            });
        }
    };
    Ok(RedditCredentials {
        client_id,
        client_secret,
        grant,
    })
}

fn comment_limit_from_env<E: Env>(env: &E) -> Result<CommentLimit, SettingsError> {
    let Some(value) = optional(env, COMMENT_LIMIT_ENV) else {
        return Ok(CommentLimit::default());
    };
    value
        .parse::<u16>()
        .ok()
        .and_then(CommentLimit::new)
        .ok_or(SettingsError::InvalidEnv {
            name: COMMENT_LIMIT_ENV,
            value,
            expected: LIMIT_EXPECTED,
        })
}

fn prompt_budget_from_env<E: Env>(env: &E) -> Result<PromptBudget, SettingsError> {
    let Some(value) = optional(env, PROMPT_MAX_CHARS_ENV) else {
        return Ok(PromptBudget::default());
    };
    value
        .parse::<usize>()
        .ok()
        .and_then(PromptBudget::new)
        .ok_or(SettingsError::InvalidEnv {
            name: PROMPT_MAX_CHARS_ENV,
            value,
            expected: POSITIVE_EXPECTED,
        })
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, SettingsError> {
    let value = optional(env, BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value.parse().map_err(|_| SettingsError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value,
        expected: ADDR_EXPECTED,
    })
}

fn url_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: &str,
) -> Result<Url, SettingsError> {
    let value = optional(env, name).unwrap_or_else(|| default.to_owned());
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => Ok(url),
        _ => Err(SettingsError::InvalidEnv {
            name,
            value,
            expected: URL_EXPECTED,
        }),
    }
}

fn positive_from_env<E, T>(env: &E, name: &'static str, default: T) -> Result<T, SettingsError>
where
    E: Env,
    T: FromStr + PartialOrd + Default,
{
    let Some(value) = optional(env, name) else {
        return Ok(default);
    };
    match value.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(SettingsError::InvalidEnv {
            name,
            value,
            expected: POSITIVE_EXPECTED,
        }),
    }
}

fn bool_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: bool,
) -> Result<bool, SettingsError> {
    let Some(value) = optional(env, name) else {
        return Ok(default);
    };
    parse_bool(&value).ok_or(SettingsError::InvalidEnv {
        name,
        value,
        expected: BOOL_EXPECTED,
    })
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, SettingsError> {
    optional(env, name).ok_or(SettingsError::MissingEnv { name })
}

/// Trimmed value; blank counts as unset.
fn optional<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
