//! Usage reporting endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::semantic_cache::SemanticCacheStats;
use crate::domain::usage::UsageSnapshot;

/// GET /admin/usage response body
#[derive(Debug, Serialize, Deserialize)]
pub struct UsageReport {
    pub total_requests: u64,
    pub total_cost_usd: f64,
    pub exact_hits: u64,
    pub semantic_hits: u64,
    pub misses: u64,
    pub cheap_requests: u64,
    pub expensive_requests: u64,
    pub cache_hit_rate: f64,
    pub avg_cost_per_request: f64,
    pub avg_latency_ms: f64,
    pub estimated_savings_usd: f64,
    pub semantic_cache: SemanticCacheStats,
}

impl UsageReport {
    pub fn new(snapshot: UsageSnapshot, semantic_cache: SemanticCacheStats) -> Self {
        Self {
            total_requests: snapshot.total_requests,
            total_cost_usd: snapshot.total_cost_usd,
            exact_hits: snapshot.exact_hits,
            semantic_hits: snapshot.semantic_hits,
            misses: snapshot.misses,
            cheap_requests: snapshot.cheap_requests,
            expensive_requests: snapshot.expensive_requests,
            cache_hit_rate: snapshot.hit_rate(),
            avg_cost_per_request: snapshot.avg_cost_per_request(),
            avg_latency_ms: snapshot.avg_latency_ms(),
            estimated_savings_usd: snapshot.estimated_savings_usd(),
            semantic_cache,
        }
    }
}

/// GET /admin/usage
pub async fn get_usage(State(state): State<AppState>) -> Result<Json<UsageReport>, ApiError> {
    let snapshot = state.gateway.usage();
    let semantic_stats = state.gateway.semantic_stats().await?;

    Ok(Json(UsageReport::new(snapshot, semantic_stats)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_derives_ratios() {
        let snapshot = UsageSnapshot {
            total_requests: 4,
            total_cost_usd: 0.02,
            exact_hits: 1,
            semantic_hits: 1,
            misses: 2,
            cheap_requests: 3,
            expensive_requests: 1,
            total_latency_ms: 400,
        };

        let report = UsageReport::new(snapshot, SemanticCacheStats::default());

        assert!((report.cache_hit_rate - 0.5).abs() < 1e-9);
        assert!((report.avg_latency_ms - 100.0).abs() < 1e-9);
    }
}
