//! Usage accounting types

use serde::{Deserialize, Serialize};

/// How a request was served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOutcome {
    Exact,
    Semantic,
    Miss,
}

impl CacheOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Semantic => "semantic",
            Self::Miss => "miss",
        }
    }
}

impl std::fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of the usage counters.
///
/// Averages and rates are derived here on read; only the raw monotone
/// counters are stored, so the ratios can never drift from the counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub total_requests: u64,
    pub total_cost_usd: f64,
    pub exact_hits: u64,
    pub semantic_hits: u64,
    pub misses: u64,
    pub cheap_requests: u64,
    pub expensive_requests: u64,
    pub total_latency_ms: u64,
}

impl UsageSnapshot {
    pub fn cache_hits(&self) -> u64 {
        self.exact_hits + self.semantic_hits
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }

        self.cache_hits() as f64 / self.total_requests as f64
    }

    pub fn avg_cost_per_request(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }

        self.total_cost_usd / self.total_requests as f64
    }

    pub fn avg_latency_ms(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }

        self.total_latency_ms as f64 / self.total_requests as f64
    }

    /// Cost avoided by serving hits from cache, assuming each hit would have
    /// cost the current average miss price
    pub fn estimated_savings_usd(&self) -> f64 {
        if self.misses == 0 {
            return 0.0;
        }

        let avg_miss_cost = self.total_cost_usd / self.misses as f64;
        avg_miss_cost * self.cache_hits() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(CacheOutcome::Exact.to_string(), "exact");
        assert_eq!(CacheOutcome::Semantic.to_string(), "semantic");
        assert_eq!(CacheOutcome::Miss.to_string(), "miss");
    }

    #[test]
    fn test_outcome_is_hit() {
        assert!(CacheOutcome::Exact.is_hit());
        assert!(CacheOutcome::Semantic.is_hit());
        assert!(!CacheOutcome::Miss.is_hit());
    }

    #[test]
    fn test_snapshot_derived_metrics() {
        let snapshot = UsageSnapshot {
            total_requests: 10,
            total_cost_usd: 0.05,
            exact_hits: 3,
            semantic_hits: 2,
            misses: 5,
            cheap_requests: 8,
            expensive_requests: 2,
            total_latency_ms: 1000,
        };

        assert_eq!(snapshot.cache_hits(), 5);
        assert!((snapshot.hit_rate() - 0.5).abs() < 1e-9);
        assert!((snapshot.avg_cost_per_request() - 0.005).abs() < 1e-9);
        assert!((snapshot.avg_latency_ms() - 100.0).abs() < 1e-9);
        assert!((snapshot.estimated_savings_usd() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = UsageSnapshot::default();

        assert_eq!(snapshot.hit_rate(), 0.0);
        assert_eq!(snapshot.avg_cost_per_request(), 0.0);
        assert_eq!(snapshot.estimated_savings_usd(), 0.0);
    }
}
