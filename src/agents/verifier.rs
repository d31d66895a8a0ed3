//! Verification agent: renders a final verdict on a refined draft.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::{GenerationRequest, LlmProvider, Message};

use super::types::{context_prefix, STAGE_CONTEXT_CHARS};

/// Output cap for verification requests.
const VERIFY_MAX_TOKENS: u32 = 200;

/// The approval token looked for in verdict text, case-insensitively.
pub const APPROVAL_TOKEN: &str = "APPROVED";

const VERIFIER_DIRECTIVE: &str = "You are a requirements engineering verification expert. \
    Check if content meets requirements and is factually accurate.";

/// Checks a refined draft and returns either an approval or residual-fix
/// notes. Long-lived and shared across pipeline invocations.
pub struct VerificationAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl VerificationAgent {
    /// Create a verifier backed by `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Ask the service whether `content` meets the task requirements.
    ///
    /// The verdict is free text; the coordinator interprets it only by
    /// looking for [`APPROVAL_TOKEN`]. Failure handling is the
    /// coordinator's concern (see `VerifyFailurePolicy`).
    pub async fn verify(
        &self,
        content: &str,
        original_instruction: &str,
        source_context: Option<&str>,
    ) -> Result<String, LlmError> {
        let context = match source_context {
            Some(text) => format!(
                "Reference: {}\n\n",
                context_prefix(text, STAGE_CONTEXT_CHARS)
            ),
            None => String::new(),
        };

        let verify_prompt = format!(
            "{context}Task: {original_instruction}\n\nContent:\n{content}\n\n\
             Verify accuracy and completeness. Return APPROVED or suggest final fixes."
        );

        let request = GenerationRequest::new(
            self.model.clone(),
            vec![
                Message::system(VERIFIER_DIRECTIVE),
                Message::user(verify_prompt),
            ],
        )
        .with_max_tokens(VERIFY_MAX_TOKENS);

        let response = self.provider.generate(request).await?;
        response
            .first_content()
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::ParseError("no content in LLM response".to_string()))
    }
}
