//! Exact cache trait and value types

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::llm::ModelTier;
use crate::domain::DomainError;

/// Value stored in the exact cache: the response plus the model that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedCompletion {
    response_text: String,
    model: String,
    tier: ModelTier,
}

impl CachedCompletion {
    pub fn new(response_text: impl Into<String>, model: impl Into<String>, tier: ModelTier) -> Self {
        Self {
            response_text: response_text.into(),
            model: model.into(),
            tier,
        }
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tier(&self) -> ModelTier {
        self.tier
    }
}

/// Trait for the exact (normalized-query) response cache
///
/// Entries are partitioned by model tier; an entry stored for one tier is
/// never returned for another. `put` is last-write-wins.
#[async_trait]
pub trait ExactCache: Send + Sync + Debug {
    /// Look up a live entry for the normalized query and tier
    async fn get(
        &self,
        query: &str,
        tier: ModelTier,
    ) -> Result<Option<CachedCompletion>, DomainError>;

    /// Store a response, unconditionally replacing any entry for the same key
    async fn put(
        &self,
        query: &str,
        tier: ModelTier,
        value: CachedCompletion,
        ttl: Duration,
    ) -> Result<(), DomainError>;

    /// Remove all entries
    async fn clear(&self) -> Result<(), DomainError>;

    /// Number of physically present entries (may include not-yet-swept expired ones)
    async fn size(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_completion_accessors() {
        let value = CachedCompletion::new("four", "gpt-4o-mini", ModelTier::Cheap);

        assert_eq!(value.response_text(), "four");
        assert_eq!(value.model(), "gpt-4o-mini");
        assert_eq!(value.tier(), ModelTier::Cheap);
    }

    #[test]
    fn test_cached_completion_serde_roundtrip() {
        let value = CachedCompletion::new("four", "gpt-4o-mini", ModelTier::Cheap);

        let json = serde_json::to_string(&value).unwrap();
        let back: CachedCompletion = serde_json::from_str(&json).unwrap();

        assert_eq!(back.response_text(), "four");
        assert_eq!(back.tier(), ModelTier::Cheap);
    }
}
