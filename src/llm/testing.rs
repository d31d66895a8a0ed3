//! Scripted LLM providers for unit tests.
//!
//! `ScriptedProvider` replays a fixed sequence of canned outcomes and
//! records every outbound request, which lets tests assert on call counts
//! and prompt contents without a live endpoint.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::LlmError;
use crate::llm::{Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage};

/// One scripted outcome: generated text or a service failure message.
pub type ScriptedOutcome = Result<String, String>;

/// An [`LlmProvider`] that replays canned outcomes in order.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    /// Create a provider that replays `script` in order. Once the script is
    /// exhausted, further calls fail with a "script exhausted" error.
    pub fn new(script: Vec<ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider whose every call succeeds with `content`.
    pub fn always(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            // Large enough that no single test runs out.
            script: Mutex::new((0..64).map(|_| Ok(content.clone())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider whose every call fails with `message`.
    pub fn always_failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            script: Mutex::new((0..64).map(|_| Err(message.clone())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of generate calls made so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Snapshot of every request made so far, in call order.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    /// The user-message content of the `index`-th request.
    pub async fn user_prompt(&self, index: usize) -> String {
        let requests = self.requests.lock().await;
        requests[index]
            .messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        self.requests.lock().await.push(request);

        let outcome = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));

        match outcome {
            Ok(content) => Ok(GenerationResponse {
                id: "scripted".to_string(),
                model: "scripted".to_string(),
                choices: vec![Choice {
                    index: 0,
                    message: Message::assistant(content),
                    finish_reason: "stop".to_string(),
                }],
                usage: Usage {
                    prompt_tokens: 0,
                    completion_tokens: 0,
                    total_tokens: 0,
                },
            }),
            Err(message) => Err(LlmError::RequestFailed(message)),
        }
    }
}
