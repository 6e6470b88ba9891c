//! Exact cache key generation
//!
//! Hit rate depends entirely on the normalization strategy, so it is fixed
//! here: Unicode lowercasing, then runs of whitespace collapsed to a single
//! space, leading/trailing whitespace trimmed. The stored key is the SHA-256
//! hex digest of `normalized_query:tier`, keeping keys uniform-length and
//! lookups O(1) average.

use sha2::{Digest, Sha256};

use crate::domain::llm::ModelTier;

/// Normalize a query for exact matching
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate the cache key for a (query, tier) pair
pub fn exact_cache_key(query: &str, tier: ModelTier) -> String {
    let content = format!("{}:{}", normalize_query(query), tier);

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
