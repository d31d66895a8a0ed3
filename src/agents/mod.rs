//! Multi-agent content pipeline: generation, critique, refinement and
//! verification over a shared LLM provider.

pub mod coordinator;
pub mod error;
pub mod generator;
pub mod refiner;
pub mod reviewer;
pub mod types;
pub mod verifier;

pub use coordinator::{
    ContentPipeline, Coordinator, CoordinatorConfig, PipelineResult, PipelineStatus,
    ReviewFailurePolicy, VerifyFailurePolicy,
};
pub use error::{AgentError, AgentResult};
pub use generator::GeneratorAgent;
pub use refiner::RefinerAgent;
pub use reviewer::ReviewerAgent;
pub use types::{DraftOutcome, TaskKind, GENERATOR_CONTEXT_CHARS, STAGE_CONTEXT_CHARS};
pub use verifier::{VerificationAgent, APPROVAL_TOKEN};
