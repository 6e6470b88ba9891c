use async_trait::async_trait;
use std::fmt::Debug;

use super::Completion;
use crate::domain::DomainError;

/// Trait for upstream completion providers (OpenAI-compatible, etc.)
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Send a single-turn completion request to the given model
    async fn complete(&self, prompt: &str, model: &str) -> Result<Completion, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
