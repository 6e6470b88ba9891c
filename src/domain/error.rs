use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Embedding unavailable: {message}")]
    EmbeddingUnavailable { message: String },

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Rate limit exceeded for caller '{caller_id}': resets in {reset_in_seconds}s")]
    RateLimitExceeded {
        caller_id: String,
        remaining: u32,
        reset_in_seconds: u64,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn embedding_unavailable(message: impl Into<String>) -> Self {
        Self::EmbeddingUnavailable {
            message: message.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn rate_limit_exceeded(
        caller_id: impl Into<String>,
        remaining: u32,
        reset_in_seconds: u64,
    ) -> Self {
        Self::RateLimitExceeded {
            caller_id: caller_id.into(),
            remaining,
            reset_in_seconds,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let error = DomainError::provider("openai", "quota exceeded");
        assert_eq!(error.to_string(), "Provider error: openai - quota exceeded");
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let error = DomainError::dimension_mismatch(384, 768);
        assert_eq!(
            error.to_string(),
            "Embedding dimension mismatch: expected 384, got 768"
        );
    }

    #[test]
    fn test_rate_limit_display() {
        let error = DomainError::rate_limit_exceeded("caller-1", 0, 42);
        assert_eq!(
            error.to_string(),
            "Rate limit exceeded for caller 'caller-1': resets in 42s"
        );
    }
}
