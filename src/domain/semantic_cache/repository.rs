//! Semantic cache trait and types

use std::fmt::Debug;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::llm::ModelTier;
use crate::domain::DomainError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// An entry in the semantic cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticEntry {
    /// Unique identifier for this entry
    id: String,
    /// Embedding vector used for similarity search
    embedding: Vec<f32>,
    /// The original query text
    query_text: String,
    /// The cached response text
    response_text: String,
    /// Model that produced the response
    model: String,
    /// Tier the entry is partitioned under
    tier: ModelTier,
    /// When this entry was created (epoch seconds)
    created_at: u64,
    /// When this entry expires (epoch seconds)
    expires_at: u64,
    /// When this entry was last returned by a lookup (epoch seconds)
    last_accessed_at: u64,
}

impl SemanticEntry {
    pub fn new(
        id: impl Into<String>,
        embedding: Vec<f32>,
        query_text: impl Into<String>,
        response_text: impl Into<String>,
        model: impl Into<String>,
        tier: ModelTier,
        ttl: Duration,
    ) -> Self {
        let now = now_secs();

        Self {
            id: id.into(),
            embedding,
            query_text: query_text.into(),
            response_text: response_text.into(),
            model: model.into(),
            tier,
            created_at: now,
            expires_at: now + ttl.as_secs(),
            last_accessed_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
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

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    pub fn last_accessed_at(&self) -> u64 {
        self.last_accessed_at
    }

    pub fn is_expired(&self) -> bool {
        now_secs() >= self.expires_at
    }

    /// Mark the entry as just accessed (required for correct LRU eviction)
    pub fn touch(&mut self) {
        self.last_accessed_at = now_secs();
    }

    #[cfg(test)]
    pub fn force_expired(&mut self) {
        self.expires_at = 0;
    }

    #[cfg(test)]
    pub fn set_last_accessed_at(&mut self, at: u64) {
        self.last_accessed_at = at;
    }
}

/// A successful similarity lookup
#[derive(Debug, Clone)]
pub struct SemanticHit {
    /// Response text of the matched entry
    pub response_text: String,
    /// Query text of the matched entry
    pub matched_query: String,
    /// Model that produced the cached response
    pub model: String,
    /// Cosine similarity between the probe and the matched entry
    pub similarity: f32,
}

/// Statistics for the semantic cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticCacheStats {
    /// Number of physically present entries
    pub total_entries: usize,
    /// Total lookup hits
    pub hits: u64,
    /// Total lookup misses
    pub misses: u64,
    /// Total entries evicted at capacity
    pub evictions: u64,
}

impl SemanticCacheStats {
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;

        if total == 0 {
            return 0.0;
        }

        self.hits as f32 / total as f32
    }
}

/// Trait for the similarity-based response cache
///
/// Lookup scans live same-tier entries in insertion order and returns the
/// first entry at or above the similarity threshold. This is deliberately a
/// first-match scan, not a best-match scan; the result can depend on
/// insertion order when several entries clear the threshold.
#[async_trait]
pub trait SemanticCache: Send + Sync + Debug {
    /// Find the first live same-tier entry with similarity >= `min_similarity`.
    ///
    /// Updates the hit entry's last-accessed time. A probe whose dimension
    /// disagrees with stored entries fails with `DimensionMismatch`.
    async fn find(
        &self,
        embedding: &[f32],
        tier: ModelTier,
        min_similarity: f32,
    ) -> Result<Option<SemanticHit>, DomainError>;

    /// Store a new entry, evicting the least-recently-accessed entry first
    /// when at capacity
    async fn store(&self, entry: SemanticEntry) -> Result<(), DomainError>;

    /// Remove all entries and reset statistics
    async fn clear(&self) -> Result<(), DomainError>;

    /// Number of physically present entries
    async fn size(&self) -> Result<usize, DomainError>;

    /// Get cache statistics
    async fn stats(&self) -> Result<SemanticCacheStats, DomainError>;

    /// Physically remove expired entries, returning how many were removed
    async fn cleanup_expired(&self) -> Result<usize, DomainError>;
}
