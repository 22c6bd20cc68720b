//! In-process stand-in for the Model Gateway, used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionModel, LlmError};

type Responder = Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>;

enum Script {
    Sequence(Mutex<VecDeque<Result<String, LlmError>>>),
    Function(Responder),
}

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub temperature: f32,
}

pub struct StubModel {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubModel {
    /// Answers calls in order. Running past the end yields `EmptyContent`.
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::results(responses.into_iter().map(|r| Ok(r.into())))
    }

    /// Like `sequence`, but individual calls may fail.
    pub fn results<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<String, LlmError>>,
    {
        Self {
            script: Script::Sequence(Mutex::new(responses.into_iter().collect())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers each call by applying `f` to the prompt.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            script: Script::Function(Box::new(f)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            temperature,
        });

        match &self.script {
            Script::Sequence(queue) => queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent)),
            Script::Function(f) => f(prompt),
        }
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}
