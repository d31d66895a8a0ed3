//! Reviewer agent: critiques a draft against the original instruction.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::{GenerationRequest, LlmProvider, Message};

use super::types::{context_prefix, STAGE_CONTEXT_CHARS};

/// Output cap for critique requests.
const REVIEW_MAX_TOKENS: u32 = 400;

const REVIEWER_DIRECTIVE: &str = "You are a requirements engineering quality reviewer. \
    Critique content for accuracy, completeness, and clarity. \
    Provide specific improvement suggestions.";

/// Produces a free-form critique of a draft. Long-lived and shared across
/// pipeline invocations; holds no per-call state.
pub struct ReviewerAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl ReviewerAgent {
    /// Create a reviewer backed by `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Critique `content` relative to the original instruction and up to
    /// [`STAGE_CONTEXT_CHARS`] characters of source context.
    ///
    /// Failure handling is the coordinator's concern (see
    /// `ReviewFailurePolicy`); this method just reports the error.
    pub async fn review(
        &self,
        content: &str,
        original_instruction: &str,
        source_context: Option<&str>,
    ) -> Result<String, LlmError> {
        let context = match source_context {
            Some(text) => format!(
                "Original material: {}\n\n",
                context_prefix(text, STAGE_CONTEXT_CHARS)
            ),
            None => String::new(),
        };

        let review_prompt = format!(
            "{context}Task: {original_instruction}\n\nGenerated content:\n{content}\n\n\
             Provide critique with specific improvements."
        );

        let request = GenerationRequest::new(
            self.model.clone(),
            vec![
                Message::system(REVIEWER_DIRECTIVE),
                Message::user(review_prompt),
            ],
        )
        .with_max_tokens(REVIEW_MAX_TOKENS);

        let response = self.provider.generate(request).await?;
        response
            .first_content()
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::ParseError("no content in LLM response".to_string()))
    }
}
