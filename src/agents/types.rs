//! Shared types for the content-generation agents.

use serde::{Deserialize, Serialize};

/// Maximum characters of source context included in a generation prompt.
pub const GENERATOR_CONTEXT_CHARS: usize = 2000;

/// Maximum characters of source context included in review, refinement and
/// verification prompts.
pub const STAGE_CONTEXT_CHARS: usize = 1000;

/// The kind of educational content a task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// A prose summary of the source material.
    Summary,
    /// Quiz questions with answers.
    Quiz,
    /// A scenario-based practical assignment.
    Assignment,
}

impl TaskKind {
    /// Parse a task-kind label from the corpus or CLI.
    ///
    /// Unrecognized labels fall back to [`TaskKind::Summary`].
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "quiz" => TaskKind::Quiz,
            "assignment" => TaskKind::Assignment,
            // "summary", "summarization" and anything unknown.
            _ => TaskKind::Summary,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Summary => write!(f, "summary"),
            TaskKind::Quiz => write!(f, "quiz"),
            TaskKind::Assignment => write!(f, "assignment"),
        }
    }
}

/// Outcome of the generation stage: real content or a tagged failure.
///
/// This replaces in-band error strings as the inter-stage signal, so content
/// that legitimately contains the text `Error:` is never mistaken for a
/// failed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    /// A usable draft.
    Content(String),
    /// The completion service could not produce a draft.
    Failed(String),
}

impl DraftOutcome {
    /// Whether this outcome is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, DraftOutcome::Failed(_))
    }
}

/// A prefix of `context` at most `limit` characters long.
///
/// Bounds are character counts, not byte offsets, so multi-byte text never
/// splits mid-character.
pub fn context_prefix(context: &str, limit: usize) -> &str {
    match context.char_indices().nth(limit) {
        Some((byte_index, _)) => &context[..byte_index],
        None => context,
    }
}
