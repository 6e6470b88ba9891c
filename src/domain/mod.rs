//! Domain layer - core types, traits, and pure logic

pub mod cache;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod rate_limit;
pub mod router;
pub mod scorer;
pub mod semantic_cache;
pub mod usage;

pub use cache::{exact_cache_key, normalize_query, CachedCompletion, ExactCache};
pub use embedding::{cosine_similarity, EmbeddingProvider};
pub use error::DomainError;
pub use llm::{Completion, CompletionProvider, ModelPricing, ModelTier};
pub use rate_limit::{RateLimitConfig, RateLimitDecision};
pub use router::{BudgetState, ModelRouter, RouteDecision, RouterConfig};
pub use scorer::{ComplexityScorer, ScorerConfig};
pub use semantic_cache::{
    SemanticCache, SemanticCacheConfig, SemanticCacheStats, SemanticEntry, SemanticHit,
};
pub use usage::{CacheOutcome, UsageSnapshot};
