//! Model client adapter.
//!
//! Both the planning and the synthesis stage talk to the model through the
//! same shape: one prompt in, one completion out. Retries and streaming are
//! deliberately absent.

mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiClient;

/// Failure of a model call. The agent treats every variant as the upstream
/// being unavailable for the current invocation.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion contained no text")]
    EmptyResponse,
}

/// Text-in/text-out completion.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Complete a single prompt.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
