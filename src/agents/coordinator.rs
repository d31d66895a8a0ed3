//! Coordinator: the fixed four-stage content pipeline.
//!
//! Each invocation runs GENERATE → REVIEW → REFINE → VERIFY → FINALIZE,
//! strictly in sequence with no branching back. A failed generation aborts
//! the pipeline; every later stage has a degrade policy instead.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm::LlmProvider;

use super::error::AgentResult;
use super::generator::GeneratorAgent;
use super::refiner::RefinerAgent;
use super::reviewer::ReviewerAgent;
use super::types::{DraftOutcome, TaskKind};
use super::verifier::{VerificationAgent, APPROVAL_TOKEN};

/// What to do when the review call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewFailurePolicy {
    /// Feed the error text to the refiner as if it were a critique.
    #[default]
    PassThroughAsCritique,
    /// Skip refinement entirely and verify the unrefined draft.
    SkipRefinement,
}

/// What to do when the verification call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyFailurePolicy {
    /// Treat the draft as approved.
    #[default]
    AssumeApproved,
    /// Annotate the output as unverified.
    FlagUnverified,
}

/// Configuration for a [`Coordinator`].
#[derive(Debug, Clone, Default)]
pub struct CoordinatorConfig {
    /// Model identifier passed to every stage. Empty uses the provider
    /// default.
    pub model: String,
    /// Failure policy for the review stage.
    pub review_failure: ReviewFailurePolicy,
    /// Failure policy for the verification stage.
    pub verify_failure: VerifyFailurePolicy,
}

impl CoordinatorConfig {
    /// Create a configuration with default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the review-failure policy.
    pub fn with_review_failure(mut self, policy: ReviewFailurePolicy) -> Self {
        self.review_failure = policy;
        self
    }

    /// Set the verification-failure policy.
    pub fn with_verify_failure(mut self, policy: VerifyFailurePolicy) -> Self {
        self.verify_failure = policy;
        self
    }
}

/// How a pipeline invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum PipelineStatus {
    /// All four stages ran.
    Completed {
        /// Whether the verdict contained the approval token.
        approved: bool,
    },
    /// Generation failed; review, refinement and verification were skipped.
    Aborted {
        /// The generation failure message.
        reason: String,
    },
}

/// Result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// The final artifact text.
    pub output: String,
    /// How the pipeline ended.
    pub status: PipelineStatus,
}

/// The seam between the pipeline and its callers (the evaluation harness,
/// the CLI). Lets tests drive the harness with a scripted pipeline.
#[async_trait]
pub trait ContentPipeline: Send + Sync {
    /// Run the full pipeline for one task.
    async fn run(
        &self,
        kind: TaskKind,
        instruction: &str,
        source_context: Option<&str>,
    ) -> AgentResult<PipelineResult>;
}

/// Orchestrates the four agents into one fixed pipeline.
///
/// Constructed once and passed by reference; reviewer, refiner and verifier
/// are long-lived (they hold only fixed directives), while a fresh
/// generator is built per invocation, keyed by task kind.
pub struct Coordinator {
    provider: Arc<dyn LlmProvider>,
    config: CoordinatorConfig,
    reviewer: ReviewerAgent,
    refiner: RefinerAgent,
    verifier: VerificationAgent,
}

impl Coordinator {
    /// Create a coordinator over `provider` with the given configuration.
    pub fn new(provider: Arc<dyn LlmProvider>, config: CoordinatorConfig) -> Self {
        let reviewer = ReviewerAgent::new(Arc::clone(&provider), config.model.clone());
        let refiner = RefinerAgent::new(Arc::clone(&provider), config.model.clone());
        let verifier = VerificationAgent::new(Arc::clone(&provider), config.model.clone());

        Self {
            provider,
            config,
            reviewer,
            refiner,
            verifier,
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn run_pipeline(
        &self,
        kind: TaskKind,
        instruction: &str,
        source_context: Option<&str>,
    ) -> PipelineResult {
        // Stage 1: generate the initial draft.
        let generator =
            GeneratorAgent::new(Arc::clone(&self.provider), self.config.model.clone(), kind);
        let draft = match generator.generate(instruction, source_context).await {
            DraftOutcome::Content(draft) => draft,
            DraftOutcome::Failed(reason) => {
                tracing::warn!(%kind, reason = %reason, "generation failed, aborting pipeline");
                return PipelineResult {
                    output: format!("Error: {reason}"),
                    status: PipelineStatus::Aborted { reason },
                };
            }
        };

        // Stage 2: critique the draft.
        let critique = match self.reviewer.review(&draft, instruction, source_context).await {
            Ok(critique) => Some(critique),
            Err(err) => match self.config.review_failure {
                ReviewFailurePolicy::PassThroughAsCritique => {
                    tracing::warn!(error = %err, "review failed, passing error text through as critique");
                    Some(format!("Error: {err}"))
                }
                ReviewFailurePolicy::SkipRefinement => {
                    tracing::warn!(error = %err, "review failed, skipping refinement");
                    None
                }
            },
        };

        // Stage 3: refine on the critique. Refinement failure already
        // degrades to the original draft inside the agent.
        let refined = match critique {
            Some(critique) => {
                self.refiner
                    .refine(&draft, &critique, instruction, source_context)
                    .await
            }
            None => draft,
        };

        // Stage 4: verify the refined draft.
        let verdict = match self.verifier.verify(&refined, instruction, source_context).await {
            Ok(verdict) => verdict,
            Err(err) => match self.config.verify_failure {
                VerifyFailurePolicy::AssumeApproved => {
                    tracing::warn!(error = %err, "verification failed, assuming approval");
                    APPROVAL_TOKEN.to_string()
                }
                VerifyFailurePolicy::FlagUnverified => {
                    tracing::warn!(error = %err, "verification failed, flagging output as unverified");
                    format!("Unverified: {err}")
                }
            },
        };

        // Finalize: approved verdicts pass the refined draft through
        // verbatim; anything else is appended as a visible note.
        let approved = verdict.to_uppercase().contains(APPROVAL_TOKEN);
        let output = if approved {
            refined
        } else {
            format!("{refined}\n\n[Note: {verdict}]")
        };

        PipelineResult {
            output,
            status: PipelineStatus::Completed { approved },
        }
    }
}

#[async_trait]
impl ContentPipeline for Coordinator {
    async fn run(
        &self,
        kind: TaskKind,
        instruction: &str,
        source_context: Option<&str>,
    ) -> AgentResult<PipelineResult> {
        Ok(self.run_pipeline(kind, instruction, source_context).await)
    }
}
