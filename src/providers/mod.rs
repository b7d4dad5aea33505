//! ChatProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core so the pipeline and the
//! tests are decoupled from the specific LLM library.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the chat provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for the chat-completion call.
///
/// One prompt in, the model's free-text reply out. The reply is expected
/// to contain a JSON array of review comments somewhere in the text;
/// extraction is the caller's concern.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the prompt and return the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
