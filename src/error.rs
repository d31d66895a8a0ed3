//! Error types for eduforge operations.
//!
//! Defines error types for the major subsystems:
//! - LLM API interactions
//! - Test-corpus loading
//! - Evaluation harness runs and results persistence

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key: EDUFORGE_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading the evaluation corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus file '{path}' could not be read: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("Corpus file '{path}' is not valid JSON: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },

    #[error("Corpus contains no materials")]
    Empty,
}

/// Errors that can occur during an evaluation harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Failed to write results to '{path}': {source}")]
    ResultsWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
