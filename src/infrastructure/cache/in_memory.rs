//! In-memory exact cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{exact_cache_key, CachedCompletion, ExactCache};
use crate::domain::llm::ModelTier;
use crate::domain::DomainError;

/// Configuration for the in-memory exact cache
#[derive(Debug, Clone)]
pub struct InMemoryExactCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryExactCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedCompletion,
    /// Expiration timestamp (millis since epoch). Expiry is tracked per
    /// entry rather than through moka's builder-level time-to-live, which
    /// would silently cap every configured TTL at one global bound.
    expires_at: u64,
}

/// Thread-safe in-memory exact cache
///
/// Keys are SHA-256 digests of the normalized query and tier, so lookups are
/// O(1) average. Expired entries are removed lazily on the next `get`.
#[derive(Debug)]
pub struct InMemoryExactCache {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryExactCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryExactCacheConfig::default())
    }

    pub fn with_config(config: InMemoryExactCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { cache }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Self::current_time_millis() > entry.expires_at
    }
}

impl Default for InMemoryExactCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExactCache for InMemoryExactCache {
    async fn get(
        &self,
        query: &str,
        tier: ModelTier,
    ) -> Result<Option<CachedCompletion>, DomainError> {
        let key = exact_cache_key(query, tier);

        match self.cache.get(&key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(&key).await;
                    return Ok(None);
                }

                Ok(Some(entry.value))
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        query: &str,
        tier: ModelTier,
        value: CachedCompletion,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        let key = exact_cache_key(query, tier);
        let expires_at = Self::current_time_millis() + ttl.as_millis() as u64;

        self.cache.insert(key, CacheEntry { value, expires_at }).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(text: &str, tier: ModelTier) -> CachedCompletion {
        CachedCompletion::new(text, "test-model", tier)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "What is 2+2?",
                ModelTier::Cheap,
                completion("four", ModelTier::Cheap),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let hit = cache.get("What is 2+2?", ModelTier::Cheap).await.unwrap();
        assert_eq!(hit.unwrap().response_text(), "four");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryExactCache::new();

        let result = cache.get("never stored", ModelTier::Cheap).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_normalized_queries_hit() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "what is rust",
                ModelTier::Cheap,
                completion("a language", ModelTier::Cheap),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let hit = cache
            .get("  What   IS Rust ", ModelTier::Cheap)
            .await
            .unwrap();
        assert!(hit.is_some());
    }

    #[tokio::test]
    async fn test_tier_partitioning() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "what is rust",
                ModelTier::Cheap,
                completion("cheap answer", ModelTier::Cheap),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let other_tier = cache.get("what is rust", ModelTier::Expensive).await.unwrap();
        assert!(other_tier.is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "short lived",
                ModelTier::Cheap,
                completion("gone soon", ModelTier::Cheap),
                Duration::from_millis(50),
            )
            .await
            .unwrap();

        assert!(cache.get("short lived", ModelTier::Cheap).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        let result = cache.get("short lived", ModelTier::Cheap).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_multi_day_ttl_survives_housekeeping() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "long lived",
                ModelTier::Cheap,
                completion("still here", ModelTier::Cheap),
                Duration::from_secs(7 * 24 * 3600),
            )
            .await
            .unwrap();

        // Housekeeping must not expire entries on moka's behalf; only the
        // per-entry expires_at decides.
        cache.cache.run_pending_tasks().await;

        let hit = cache.get("long lived", ModelTier::Cheap).await.unwrap();
        assert_eq!(hit.unwrap().response_text(), "still here");
        assert_eq!(cache.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "q",
                ModelTier::Cheap,
                completion("first", ModelTier::Cheap),
                Duration::from_secs(60),
            )
            .await
            .unwrap();
        cache
            .put(
                "q",
                ModelTier::Cheap,
                completion("second", ModelTier::Cheap),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let hit = cache.get("q", ModelTier::Cheap).await.unwrap().unwrap();
        assert_eq!(hit.response_text(), "second");
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InMemoryExactCache::new();

        cache
            .put(
                "a",
                ModelTier::Cheap,
                completion("1", ModelTier::Cheap),
                Duration::from_secs(60),
            )
            .await
            .unwrap();
        cache
            .put(
                "b",
                ModelTier::Expensive,
                completion("2", ModelTier::Expensive),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        cache.clear().await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 0);
    }
}
