//! Fixed-window per-caller rate limiter

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::rate_limit::{RateLimitConfig, RateLimitDecision};

#[derive(Debug, Clone)]
struct CallerWindow {
    window_start: Instant,
    count: u32,
}

/// In-memory fixed-window rate limiter, keyed by caller id
///
/// The check and the count increment happen under a single write lock, so two
/// concurrent requests can never both consume the last slot.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    config: RateLimitConfig,
    windows: RwLock<HashMap<String, CallerWindow>>,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: RwLock::new(HashMap::new()),
        }
    }

    fn window_duration(&self) -> Duration {
        Duration::from_secs(self.config.window_secs)
    }

    /// Atomically check the caller's window and record the request if admitted
    pub async fn check_and_record(&self, caller_id: &str) -> RateLimitDecision {
        let now = Instant::now();
        let window = self.window_duration();
        let mut windows = self.windows.write().await;

        let entry = windows
            .entry(caller_id.to_string())
            .or_insert_with(|| CallerWindow {
                window_start: now,
                count: 0,
            });

        if now.duration_since(entry.window_start) >= window {
            entry.window_start = now;
            entry.count = 0;
        }

        let elapsed = now.duration_since(entry.window_start);
        let reset_in_seconds = window.saturating_sub(elapsed).as_secs();

        if entry.count >= self.config.max_requests {
            debug!(caller_id, count = entry.count, "rate limit exceeded");

            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_in_seconds,
            };
        }

        entry.count += 1;

        RateLimitDecision {
            allowed: true,
            remaining: self.config.max_requests - entry.count,
            reset_in_seconds,
        }
    }

    /// Drop windows that have fully elapsed, to bound memory across many callers
    pub async fn cleanup_stale(&self) -> usize {
        let now = Instant::now();
        let window = self.window_duration();
        let mut windows = self.windows.write().await;

        let before = windows.len();
        windows.retain(|_, entry| now.duration_since(entry.window_start) < window);

        before - windows.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
