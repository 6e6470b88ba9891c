//! In-memory semantic cache implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::embedding::cosine_similarity;
use crate::domain::llm::ModelTier;
use crate::domain::semantic_cache::{
    SemanticCache, SemanticCacheStats, SemanticEntry, SemanticHit,
};
use crate::domain::DomainError;

/// Thread-safe in-memory semantic cache
///
/// Entries are held in a `Vec` in insertion order and lookups scan that order,
/// returning the first live same-tier entry at or above the similarity
/// threshold. The embedding dimension is fixed at construction; a probe or
/// entry with a different dimension is rejected as a programming error.
#[derive(Debug)]
pub struct InMemorySemanticCache {
    entries: RwLock<Vec<SemanticEntry>>,
    dimensions: usize,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl InMemorySemanticCache {
    pub fn new(dimensions: usize, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            dimensions,
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn check_dimensions(&self, actual: usize) -> Result<(), DomainError> {
        if actual != self.dimensions {
            error!(
                expected = self.dimensions,
                actual, "embedding dimension mismatch, this is a bug in the caller"
            );
            return Err(DomainError::dimension_mismatch(self.dimensions, actual));
        }

        Ok(())
    }

    /// Evict the entry with the oldest last-accessed time. Called with the
    /// write lock held, only when the cache is full.
    fn evict_lru(&self, entries: &mut Vec<SemanticEntry>) {
        let oldest = entries
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| entry.last_accessed_at())
            .map(|(index, _)| index);

        if let Some(index) = oldest {
            let evicted = entries.remove(index);
            self.evictions.fetch_add(1, Ordering::Relaxed);

            debug!(
                entry_id = %evicted.id(),
                query = %evicted.query_text(),
                "evicted least recently accessed entry"
            );
        }
    }
}

#[async_trait]
impl SemanticCache for InMemorySemanticCache {
    async fn find(
        &self,
        embedding: &[f32],
        tier: ModelTier,
        min_similarity: f32,
    ) -> Result<Option<SemanticHit>, DomainError> {
        self.check_dimensions(embedding.len())?;

        let mut entries = self.entries.write().map_err(|_| {
            DomainError::internal("semantic cache lock poisoned")
        })?;

        // First match at or above the threshold wins, in insertion order.
        for entry in entries.iter_mut() {
            if entry.tier() != tier || entry.is_expired() {
                continue;
            }

            let similarity = cosine_similarity(embedding, entry.embedding());

            if similarity >= min_similarity {
                entry.touch();
                self.hits.fetch_add(1, Ordering::Relaxed);

                debug!(
                    entry_id = %entry.id(),
                    similarity,
                    matched_query = %entry.query_text(),
                    "semantic cache hit"
                );

                return Ok(Some(SemanticHit {
                    response_text: entry.response_text().to_string(),
                    matched_query: entry.query_text().to_string(),
                    model: entry.model().to_string(),
                    similarity,
                }));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn store(&self, entry: SemanticEntry) -> Result<(), DomainError> {
        self.check_dimensions(entry.embedding().len())?;

        let mut entries = self.entries.write().map_err(|_| {
            DomainError::internal("semantic cache lock poisoned")
        })?;

        if entries.len() >= self.max_entries {
            self.evict_lru(&mut entries);
        }

        entries.push(entry);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|_| {
            DomainError::internal("semantic cache lock poisoned")
        })?;

        let removed = entries.len();
        entries.clear();

        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);

        info!(removed, "semantic cache cleared");
        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        let entries = self.entries.read().map_err(|_| {
            DomainError::internal("semantic cache lock poisoned")
        })?;

        Ok(entries.len())
    }

    async fn stats(&self) -> Result<SemanticCacheStats, DomainError> {
        let entries = self.entries.read().map_err(|_| {
            DomainError::internal("semantic cache lock poisoned")
        })?;

        Ok(SemanticCacheStats {
            total_entries: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        })
    }

    async fn cleanup_expired(&self) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().map_err(|_| {
            DomainError::internal("semantic cache lock poisoned")
        })?;

        let before = entries.len();
        entries.retain(|entry| !entry.is_expired());
        let removed = before - entries.len();

        if removed > 0 {
            debug!(removed, "removed expired semantic cache entries");
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const DIMS: usize = 3;

    fn cache() -> InMemorySemanticCache {
        InMemorySemanticCache::new(DIMS, 100)
    }

    fn entry(id: &str, embedding: Vec<f32>, query: &str, response: &str) -> SemanticEntry {
        SemanticEntry::new(
            id,
            embedding,
            query,
            response,
            "test-model",
            ModelTier::Cheap,
            Duration::from_secs(3600),
        )
    }

    #[tokio::test]
    async fn test_store_and_find_identical() {
        let cache = cache();

        cache
            .store(entry("e-1", vec![1.0, 0.0, 0.0], "what is rust", "a language"))
            .await
            .unwrap();

        let hit = cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.85)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(hit.response_text, "a language");
        assert_eq!(hit.matched_query, "what is rust");
        assert!(hit.similarity > 0.999);
    }

    #[tokio::test]
    async fn test_find_below_threshold_misses() {
        let cache = cache();

        cache
            .store(entry("e-1", vec![1.0, 0.0, 0.0], "q", "r"))
            .await
            .unwrap();

        let result = cache
            .find(&[0.0, 1.0, 0.0], ModelTier::Cheap, 0.85)
            .await
            .unwrap();

        assert!(result.is_none());

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_first_match_wins_over_better_match() {
        let cache = cache();

        // Both entries clear the threshold against the probe, but the first
        // inserted one is less similar.
        cache
            .store(entry("first", vec![0.95, 0.05, 0.0], "first query", "first response"))
            .await
            .unwrap();
        cache
            .store(entry("second", vec![1.0, 0.0, 0.0], "second query", "second response"))
            .await
            .unwrap();

        let hit = cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.9)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(hit.response_text, "first response");
    }

    #[tokio::test]
    async fn test_tier_partitioning() {
        let cache = cache();

        cache
            .store(entry("e-1", vec![1.0, 0.0, 0.0], "q", "cheap response"))
            .await
            .unwrap();

        let result = cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Expensive, 0.85)
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_expired_entries_skipped() {
        let cache = cache();

        let mut expired = entry("e-1", vec![1.0, 0.0, 0.0], "q", "stale");
        expired.force_expired();
        cache.store(expired).await.unwrap();

        let result = cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.85)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(cache.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_on_find() {
        let cache = cache();

        let err = cache
            .find(&[1.0, 0.0], ModelTier::Cheap, 0.85)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DimensionMismatch { expected: 3, actual: 2 }));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_on_store() {
        let cache = cache();

        let err = cache
            .store(entry("e-1", vec![1.0, 0.0, 0.0, 0.0], "q", "r"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DimensionMismatch { .. }));
    }

    #[tokio::test]
    async fn test_lru_eviction_at_capacity() {
        let cache = InMemorySemanticCache::new(DIMS, 2);

        let mut old = entry("old", vec![1.0, 0.0, 0.0], "old query", "old");
        old.set_last_accessed_at(1);
        let mut newer = entry("newer", vec![0.0, 1.0, 0.0], "newer query", "newer");
        newer.set_last_accessed_at(2);

        cache.store(old).await.unwrap();
        cache.store(newer).await.unwrap();
        cache
            .store(entry("newest", vec![0.0, 0.0, 1.0], "newest query", "newest"))
            .await
            .unwrap();

        assert_eq!(cache.size().await.unwrap(), 2);

        // The oldest-accessed entry is gone.
        let result = cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.99)
            .await
            .unwrap();
        assert!(result.is_none());

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.evictions, 1);
    }

    #[tokio::test]
    async fn test_hit_refreshes_lru_position() {
        let cache = InMemorySemanticCache::new(DIMS, 2);

        let mut first = entry("first", vec![1.0, 0.0, 0.0], "first", "first");
        first.set_last_accessed_at(1);
        let mut second = entry("second", vec![0.0, 1.0, 0.0], "second", "second");
        second.set_last_accessed_at(2);

        cache.store(first).await.unwrap();
        cache.store(second).await.unwrap();

        // Touch the first entry so the second becomes the LRU victim.
        cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.99)
            .await
            .unwrap()
            .unwrap();

        cache
            .store(entry("third", vec![0.0, 0.0, 1.0], "third", "third"))
            .await
            .unwrap();

        assert!(cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.99)
            .await
            .unwrap()
            .is_some());
        assert!(cache
            .find(&[0.0, 1.0, 0.0], ModelTier::Cheap, 0.99)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let cache = cache();

        let mut stale = entry("stale", vec![1.0, 0.0, 0.0], "q1", "r1");
        stale.force_expired();
        cache.store(stale).await.unwrap();
        cache
            .store(entry("live", vec![0.0, 1.0, 0.0], "q2", "r2"))
            .await
            .unwrap();

        let removed = cache.cleanup_expired().await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(cache.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_resets_stats() {
        let cache = cache();

        cache
            .store(entry("e-1", vec![1.0, 0.0, 0.0], "q", "r"))
            .await
            .unwrap();
        cache
            .find(&[1.0, 0.0, 0.0], ModelTier::Cheap, 0.85)
            .await
            .unwrap();

        cache.clear().await.unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }
}
