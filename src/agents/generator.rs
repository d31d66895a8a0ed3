//! Generator agent: produces the first draft of content for a task.

use std::sync::Arc;

use crate::llm::{GenerationRequest, LlmProvider, Message};

use super::types::{context_prefix, DraftOutcome, TaskKind, GENERATOR_CONTEXT_CHARS};

/// Output cap for generation requests.
const GENERATE_MAX_TOKENS: u32 = 600;

/// Directive for summary generation. Also the fallback for unknown kinds.
const SUMMARY_DIRECTIVE: &str =
    "You are a requirements engineering expert. Generate clear, accurate summaries.";

/// Directive for quiz generation.
const QUIZ_DIRECTIVE: &str =
    "You are a requirements engineering expert. Generate well-structured quiz questions with answers.";

/// Directive for assignment generation.
const ASSIGNMENT_DIRECTIVE: &str =
    "You are a requirements engineering expert. Generate practical scenario-based assignments.";

/// Produces the initial draft for one of the three content kinds.
///
/// A generator is constructed per pipeline invocation, keyed by task kind;
/// the kind selects the fixed system directive.
pub struct GeneratorAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
    directive: &'static str,
}

impl GeneratorAgent {
    /// Create a generator for the given task kind.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, kind: TaskKind) -> Self {
        let directive = match kind {
            TaskKind::Summary => SUMMARY_DIRECTIVE,
            TaskKind::Quiz => QUIZ_DIRECTIVE,
            TaskKind::Assignment => ASSIGNMENT_DIRECTIVE,
        };

        Self {
            provider,
            model: model.into(),
            directive,
        }
    }

    /// Generate a first draft for `instruction`, optionally grounded in the
    /// first [`GENERATOR_CONTEXT_CHARS`] characters of `source_context`.
    ///
    /// A completion-service failure is reported as [`DraftOutcome::Failed`];
    /// this is the only stage whose failure aborts the pipeline.
    pub async fn generate(
        &self,
        instruction: &str,
        source_context: Option<&str>,
    ) -> DraftOutcome {
        let user_prompt = match source_context {
            Some(context) => format!(
                "Based on:\n{}\n\n{}",
                context_prefix(context, GENERATOR_CONTEXT_CHARS),
                instruction
            ),
            None => instruction.to_string(),
        };

        let request = GenerationRequest::new(
            self.model.clone(),
            vec![
                Message::system(self.directive),
                Message::user(user_prompt),
            ],
        )
        .with_max_tokens(GENERATE_MAX_TOKENS);

        match self.provider.generate(request).await {
            Ok(response) => match response.first_content() {
                Some(content) => DraftOutcome::Content(content.to_string()),
                None => {
                    tracing::warn!("generation returned no choices");
                    DraftOutcome::Failed("no content in LLM response".to_string())
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "generation request failed");
                DraftOutcome::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedProvider;

    #[tokio::test]
    async fn test_generate_uses_kind_directive() {
        let provider = Arc::new(ScriptedProvider::always("draft"));
        let agent = GeneratorAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "", TaskKind::Quiz);

        let outcome = agent.generate("Write a quiz", None).await;
        assert_eq!(outcome, DraftOutcome::Content("draft".to_string()));

        let requests = provider.requests().await;
        assert_eq!(requests[0].messages[0].role, "system");
        assert_eq!(requests[0].messages[0].content, QUIZ_DIRECTIVE);
        assert_eq!(requests[0].max_tokens, Some(GENERATE_MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_generate_truncates_context_to_2000_chars() {
        let provider = Arc::new(ScriptedProvider::always("draft"));
        let agent = GeneratorAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "", TaskKind::Summary);

        let context = "x".repeat(2500);
        agent.generate("Summarize key points", Some(&context)).await;

        let prompt = provider.user_prompt(0).await;
        let expected_prefix = format!("Based on:\n{}", "x".repeat(2000));
        assert!(prompt.starts_with(&expected_prefix));
        assert!(!prompt.contains(&"x".repeat(2001)));
        assert!(prompt.ends_with("Summarize key points"));
    }

    #[tokio::test]
    async fn test_generate_without_context_sends_bare_instruction() {
        let provider = Arc::new(ScriptedProvider::always("draft"));
        let agent = GeneratorAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "", TaskKind::Summary);

        agent.generate("Summarize key points", None).await;

        assert_eq!(provider.user_prompt(0).await, "Summarize key points");
    }

    #[tokio::test]
    async fn test_generate_failure_is_tagged() {
        let provider = Arc::new(ScriptedProvider::always_failing("boom"));
        let agent = GeneratorAgent::new(Arc::clone(&provider) as Arc<dyn LlmProvider>, "", TaskKind::Summary);

        let outcome = agent.generate("Summarize", None).await;
        assert!(outcome.is_failed());
    }
}
