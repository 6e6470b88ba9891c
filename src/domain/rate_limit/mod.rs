//! Per-caller rate limiting types

use serde::{Deserialize, Serialize};

/// Configuration for the per-caller rate limiter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window duration in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum requests admitted per caller per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

fn default_window_secs() -> u64 {
    3600
}

fn default_max_requests() -> u32 {
    100
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

impl RateLimitConfig {
    pub fn new(window_secs: u64, max_requests: u32) -> Self {
        Self {
            window_secs,
            max_requests,
        }
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitDecision {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Remaining requests in the current window after this decision
    pub remaining: u32,
    /// Seconds until the caller's window resets
    pub reset_in_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();

        assert_eq!(config.window_secs, 3600);
        assert_eq!(config.max_requests, 100);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RateLimitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_requests, 100);
    }
}
