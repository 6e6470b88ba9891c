//! Upstream LLM provider domain models and traits

mod provider;
mod response;
mod tier;

pub use provider::CompletionProvider;
pub use response::{Completion, ModelPricing};
pub use tier::ModelTier;

#[cfg(test)]
pub use provider::mock::MockCompletionProvider;
