//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI, Cohere, etc.)
///
/// Implementations must return vectors of exactly `dimensions()` length and
/// map transport or API failures to `DomainError::EmbeddingUnavailable`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate an embedding vector for the given text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Fixed dimension of vectors produced by this provider
    fn dimensions(&self) -> usize;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Deterministic mock embedder with optional per-text fixed vectors
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        fixed: RwLock<HashMap<String, Vec<f32>>>,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                fixed: RwLock::new(HashMap::new()),
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Pin the vector returned for a specific input text
        pub fn set_embedding(&self, text: impl Into<String>, vector: Vec<f32>) {
            self.fixed.write().unwrap().insert(text.into(), vector);
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::embedding_unavailable(error));
            }

            if let Some(vector) = self.fixed.read().unwrap().get(text) {
                return Ok(vector.clone());
            }

            // Deterministic pseudo-embedding from the text bytes
            let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            Ok((0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                .collect())
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }

        fn provider_name(&self) -> &'static str {
            "mock-embedding"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new(64);

            let a = provider.embed("hello").await.unwrap();
            let b = provider.embed("hello").await.unwrap();

            assert_eq!(a, b);
            assert_eq!(a.len(), 64);
        }

        #[tokio::test]
        async fn test_fixed_embedding() {
            let provider = MockEmbeddingProvider::new(3);
            provider.set_embedding("hi", vec![1.0, 0.0, 0.0]);

            assert_eq!(provider.embed("hi").await.unwrap(), vec![1.0, 0.0, 0.0]);
        }

        #[tokio::test]
        async fn test_error() {
            let provider = MockEmbeddingProvider::new(3).with_error("service down");

            let result = provider.embed("hi").await;
            assert!(matches!(
                result,
                Err(DomainError::EmbeddingUnavailable { .. })
            ));
        }
    }
}
