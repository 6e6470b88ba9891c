//! In-memory usage tracker

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::llm::ModelTier;
use crate::domain::router::BudgetState;
use crate::domain::usage::{CacheOutcome, UsageSnapshot};

/// Converts dollars to microdollars for lossless atomic accumulation
fn usd_to_micros(usd: f64) -> u64 {
    (usd * 1_000_000.0).round() as u64
}

fn micros_to_usd(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

/// Thread-safe usage tracker backed by atomic counters
///
/// `record` is synchronous and has no await points, so a recorded request is
/// always counted in full even if the surrounding task is cancelled.
#[derive(Debug, Default)]
pub struct UsageTracker {
    total_requests: AtomicU64,
    total_cost_micros: AtomicU64,
    exact_hits: AtomicU64,
    semantic_hits: AtomicU64,
    misses: AtomicU64,
    cheap_requests: AtomicU64,
    expensive_requests: AtomicU64,
    total_latency_ms: AtomicU64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request
    pub fn record(&self, outcome: CacheOutcome, tier: ModelTier, cost_usd: f64, latency_ms: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_cost_micros
            .fetch_add(usd_to_micros(cost_usd), Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);

        match outcome {
            CacheOutcome::Exact => self.exact_hits.fetch_add(1, Ordering::Relaxed),
            CacheOutcome::Semantic => self.semantic_hits.fetch_add(1, Ordering::Relaxed),
            CacheOutcome::Miss => self.misses.fetch_add(1, Ordering::Relaxed),
        };

        match tier {
            ModelTier::Cheap => self.cheap_requests.fetch_add(1, Ordering::Relaxed),
            ModelTier::Expensive => self.expensive_requests.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn total_cost_usd(&self) -> f64 {
        micros_to_usd(self.total_cost_micros.load(Ordering::Relaxed))
    }

    /// Budget state against a spending limit in USD. A limit of zero or less
    /// means unlimited.
    pub fn budget_state(&self, limit_usd: f64) -> BudgetState {
        if limit_usd <= 0.0 {
            return BudgetState::Available;
        }

        if self.total_cost_usd() >= limit_usd {
            BudgetState::Exhausted
        } else {
            BudgetState::Available
        }
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            total_cost_usd: self.total_cost_usd(),
            exact_hits: self.exact_hits.load(Ordering::Relaxed),
            semantic_hits: self.semantic_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cheap_requests: self.cheap_requests.load(Ordering::Relaxed),
            expensive_requests: self.expensive_requests.load(Ordering::Relaxed),
            total_latency_ms: self.total_latency_ms.load(Ordering::Relaxed),
        }
    }
}
