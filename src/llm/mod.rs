//! LLM client layer: message types, the provider trait and the
//! OpenAI-compatible HTTP client.

pub mod client;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    ChatClient, Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage,
    DEFAULT_MODEL,
};
