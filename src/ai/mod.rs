//! Chat-completion gateway integration
//!
//! Provides the seam between the naming pipeline and whichever provider
//! serves chat completions. Responses are returned untyped because their
//! shape varies by provider and model.

pub mod mock;
pub mod openrouter;

pub use mock::MockChatClient;
pub use openrouter::OpenRouterChatClient;

use crate::prompts::ChatPrompt;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send one prompt and return the raw response body.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Value>;
}
