//! Error types for the multi-agent content pipeline.

use thiserror::Error;

/// Errors that can occur during agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Error from the LLM provider.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Error parsing an LLM response.
    #[error("Failed to parse LLM response: {0}")]
    ResponseParse(String),

    /// Pipeline stage failed.
    #[error("Pipeline stage '{stage}' failed: {reason}")]
    PipelineStage { stage: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::error::LlmError> for AgentError {
    fn from(err: crate::error::LlmError) -> Self {
        AgentError::Llm(err.to_string())
    }
}

/// Result type alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;
