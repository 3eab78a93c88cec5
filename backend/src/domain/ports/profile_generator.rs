//! Driving port used by inbound adapters to request a profile.

use async_trait::async_trait;

use crate::domain::Error;

/// Generated personality summary; free text with no further structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResult(String);

impl ProfileResult {
    /// Wrap generated text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the summary text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take ownership of the summary text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Port for turning a raw, caller-supplied handle into a profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGenerator: Send + Sync {
    /// Run the whole pipeline for one handle.
    ///
    /// `raw_handle` is passed exactly as received; normalisation is part of
    /// the pipeline.
    async fn generate_profile(&self, raw_handle: &str) -> Result<ProfileResult, Error>;
}
