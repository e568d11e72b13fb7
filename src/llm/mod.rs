//! Language model access: the [`LanguageModel`] seam and its HTTP client.

pub mod chat;

use anyhow::Result;
use async_trait::async_trait;

pub use chat::ChatClient;

/// One non-streaming completion: a system message plus a user prompt in, text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String>;
}
