//! Infrastructure layer - concrete implementations of domain traits

pub mod cache;
pub mod embedding;
pub mod llm;
pub mod logging;
pub mod rate_limit;
pub mod semantic_cache;
pub mod services;
pub mod usage;

pub use cache::InMemoryExactCache;
pub use embedding::OpenAiEmbeddingProvider;
pub use llm::{HttpClient, OpenAiCompletionProvider};
pub use rate_limit::FixedWindowRateLimiter;
pub use semantic_cache::InMemorySemanticCache;
pub use services::{GatewayReply, GatewayService};
pub use usage::UsageTracker;
