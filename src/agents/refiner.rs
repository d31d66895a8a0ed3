//! Refiner agent: improves a draft based on the reviewer's critique.

use std::sync::Arc;

use crate::llm::{GenerationRequest, LlmProvider, Message};

use super::types::{context_prefix, STAGE_CONTEXT_CHARS};

/// Output cap for refinement requests.
const REFINE_MAX_TOKENS: u32 = 600;

const REFINER_DIRECTIVE: &str = "You are a requirements engineering content refiner. \
    Improve content based on reviewer feedback while maintaining original intent.";

/// Produces an improved draft from the original plus its critique.
///
/// Refinement failure degrades to a no-op: the original content comes back
/// unchanged rather than an error propagating.
pub struct RefinerAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl RefinerAgent {
    /// Create a refiner backed by `provider`.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Produce an improved version of `original_content` guided by
    /// `critique`. On any service failure the original content is returned
    /// verbatim.
    pub async fn refine(
        &self,
        original_content: &str,
        critique: &str,
        original_instruction: &str,
        source_context: Option<&str>,
    ) -> String {
        let context = match source_context {
            Some(text) => format!(
                "Source material: {}\n\n",
                context_prefix(text, STAGE_CONTEXT_CHARS)
            ),
            None => String::new(),
        };

        let refine_prompt = format!(
            "{context}Task: {original_instruction}\n\nOriginal:\n{original_content}\n\n\
             Critique:\n{critique}\n\nProvide improved version."
        );

        let request = GenerationRequest::new(
            self.model.clone(),
            vec![
                Message::system(REFINER_DIRECTIVE),
                Message::user(refine_prompt),
            ],
        )
        .with_max_tokens(REFINE_MAX_TOKENS);

        match self.provider.generate(request).await {
            Ok(response) => match response.first_content() {
                Some(improved) => improved.to_string(),
                None => {
                    tracing::warn!("refinement returned no choices, keeping original draft");
                    original_content.to_string()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "refinement failed, keeping original draft");
                original_content.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedProvider;

    #[tokio::test]
    async fn test_refine_returns_improved_text() {
        let provider = Arc::new(ScriptedProvider::always("improved"));
        let agent = RefinerAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "");

        let refined = agent.refine("draft", "too vague", "Summarize", None).await;
        assert_eq!(refined, "improved");

        let prompt = provider.user_prompt(0).await;
        assert!(prompt.contains("Original:\ndraft"));
        assert!(prompt.contains("Critique:\ntoo vague"));
    }

    #[tokio::test]
    async fn test_refine_failure_degrades_to_original() {
        let provider = Arc::new(ScriptedProvider::always_failing("timeout"));
        let agent = RefinerAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "");

        let refined = agent.refine("draft", "too vague", "Summarize", None).await;
        assert_eq!(refined, "draft");
    }

    #[tokio::test]
    async fn test_refine_truncates_context_to_1000_chars() {
        let provider = Arc::new(ScriptedProvider::always("improved"));
        let agent = RefinerAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "");

        let context = "z".repeat(1200);
        agent
            .refine("draft", "critique", "Summarize", Some(&context))
            .await;

        let prompt = provider.user_prompt(0).await;
        assert!(prompt.starts_with(&format!("Source material: {}", "z".repeat(1000))));
        assert!(!prompt.contains(&"z".repeat(1001)));
    }
}
