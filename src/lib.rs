//! eduforge: multi-agent educational content generation and evaluation.
//!
//! This library runs a fixed generate/review/refine/verify pipeline over an
//! LLM completion service and scores pipeline output against a labeled
//! corpus with rubric judgments and lexical-overlap metrics.

// Core modules
pub mod agents;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod eval;
pub mod llm;

// Re-export commonly used error types
pub use error::{CorpusError, HarnessError, LlmError};
