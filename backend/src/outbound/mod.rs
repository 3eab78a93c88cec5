//! Outbound adapters implementing domain ports for external services.
//!
//! - **reddit**: token exchange and comment listing over the Reddit API
//! - **openai**: chat completions
//!
//! Adapters are thin translators between HTTP payloads and domain types.
//! They perform one request per call and contain no retry logic.

mod http_support;
pub mod openai;
pub mod reddit;

pub use http_support::AdapterBuildError;
