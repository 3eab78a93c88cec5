//! Shared test doubles for completion retry tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::PromptText;
use crate::domain::completion_invoker::BackoffSleeper;
use crate::domain::ports::{CompletionSource, CompletionSourceError};

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper(Mutex<Vec<Duration>>);

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.0.lock().expect("sleeper mutex").clone()
    }
}

#[async_trait]
impl BackoffSleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.0.lock().expect("sleeper mutex").push(duration);
    }
}

/// One scripted completion attempt.
pub enum CompletionStep {
    /// Resolve immediately with this result.
    Reply(Result<String, CompletionSourceError>),
    /// Never resolve, so the attempt loses to its deadline.
    Hang,
}

impl CompletionStep {
    pub fn text(text: &str) -> Self {
        Self::Reply(Ok(text.to_owned()))
    }

    pub fn failure(error: CompletionSourceError) -> Self {
        Self::Reply(Err(error))
    }
}

/// Completion source replaying a script and recording every prompt.
pub struct ScriptedCompletionSource {
    script: Mutex<VecDeque<CompletionStep>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedCompletionSource {
    pub fn new(script: Vec<CompletionStep>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts mutex").clone()
    }
}

#[async_trait]
impl CompletionSource for ScriptedCompletionSource {
    async fn complete(&self, prompt: &PromptText) -> Result<String, CompletionSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompts mutex")
            .push(prompt.as_str().to_owned());
        let step = self.script.lock().expect("script mutex").pop_front();
        match step {
            Some(CompletionStep::Reply(result)) => result,
            Some(CompletionStep::Hang) => {
                std::future::pending::<()>().await;
                Err(CompletionSourceError::transport("pending future resolved"))
            }
            None => Err(CompletionSourceError::transport(
                "completion script exhausted unexpectedly",
            )),
        }
    }
}
