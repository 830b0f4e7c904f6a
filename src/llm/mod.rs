//! Language-model backend used by the planner.

mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Ways a completion request can fail.
///
/// Quota exhaustion is kept apart from other failures because the planner
/// recovers from it locally, while anything else aborts planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("language model quota exhausted")]
    QuotaExhausted,

    #[error("language model error: {0}")]
    Backend(String),
}

/// Sends a prompt and returns the model's raw text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Client that returns a fixed outcome and records every prompt.
    pub struct ScriptedLlm {
        outcome: Result<String, LlmError>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        pub fn replying(text: &str) -> Self {
            Self::with_outcome(Ok(text.to_string()))
        }

        pub fn quota_exhausted() -> Self {
            Self::with_outcome(Err(LlmError::QuotaExhausted))
        }

        pub fn failing(message: &str) -> Self {
            Self::with_outcome(Err(LlmError::Backend(message.to_string())))
        }

        fn with_outcome(outcome: Result<String, LlmError>) -> Self {
            Self {
                outcome,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.outcome.clone()
        }
    }
}
