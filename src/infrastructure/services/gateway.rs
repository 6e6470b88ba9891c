//! Request orchestration
//!
//! Drives each request through rate limiting, complexity scoring, the two
//! cache tiers, routing, the upstream call, and usage accounting. No lock is
//! held across an embedding or provider call; reconfiguration swaps an
//! immutable snapshot instead of mutating shared state.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::cache::{CachedCompletion, ExactCache};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::llm::{CompletionProvider, ModelTier};
use crate::domain::router::{BudgetState, ModelRouter};
use crate::domain::scorer::ComplexityScorer;
use crate::domain::semantic_cache::{SemanticCache, SemanticCacheStats, SemanticEntry};
use crate::domain::usage::{CacheOutcome, UsageSnapshot};
use crate::domain::DomainError;
use crate::infrastructure::rate_limit::FixedWindowRateLimiter;
use crate::infrastructure::usage::UsageTracker;

/// Immutable view of the engine parameters for one request.
///
/// Built once per reconfiguration; requests clone the `Arc` and never observe
/// a half-applied update.
#[derive(Debug)]
pub struct EngineSnapshot {
    scorer: ComplexityScorer,
    router: ModelRouter,
    semantic_enabled: bool,
    similarity_threshold: f32,
    semantic_ttl: Duration,
    exact_ttl: Duration,
    budget_limit_usd: f64,
    cheap_model: String,
    expensive_model: String,
}

impl EngineSnapshot {
    pub fn from_config(config: &EngineConfig) -> Result<Self, DomainError> {
        Ok(Self {
            scorer: ComplexityScorer::new(config.scorer.clone())?,
            router: ModelRouter::new(config.router.clone()),
            semantic_enabled: config.semantic_cache.enabled,
            similarity_threshold: config.semantic_cache.similarity_threshold,
            semantic_ttl: config.semantic_cache.ttl(),
            exact_ttl: Duration::from_secs(config.exact_cache.ttl_secs),
            budget_limit_usd: config.budget.limit_usd,
            cheap_model: config.models.cheap.clone(),
            expensive_model: config.models.expensive.clone(),
        })
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Cheap => &self.cheap_model,
            ModelTier::Expensive => &self.expensive_model,
        }
    }
}

/// Result of one orchestrated request
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub response_text: String,
    pub model: String,
    pub tier: ModelTier,
    pub complexity_score: f32,
    pub cache_outcome: CacheOutcome,
    pub route_reason: &'static str,
    pub cost_usd: f64,
    pub latency_ms: u64,
    /// Similarity of the matched entry, for semantic hits only
    pub similarity: Option<f32>,
    /// Query text of the matched entry, for semantic hits only
    pub matched_query: Option<String>,
}

/// The request orchestrator
#[derive(Debug)]
pub struct GatewayService {
    exact_cache: Arc<dyn ExactCache>,
    semantic_cache: Arc<dyn SemanticCache>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    completion_provider: Arc<dyn CompletionProvider>,
    rate_limiter: FixedWindowRateLimiter,
    usage: UsageTracker,
    engine: RwLock<Arc<EngineSnapshot>>,
}

impl GatewayService {
    pub fn new(
        exact_cache: Arc<dyn ExactCache>,
        semantic_cache: Arc<dyn SemanticCache>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        completion_provider: Arc<dyn CompletionProvider>,
        rate_limiter: FixedWindowRateLimiter,
        engine_config: &EngineConfig,
    ) -> Result<Self, DomainError> {
        let snapshot = EngineSnapshot::from_config(engine_config)?;

        Ok(Self {
            exact_cache,
            semantic_cache,
            embedding_provider,
            completion_provider,
            rate_limiter,
            usage: UsageTracker::new(),
            engine: RwLock::new(Arc::new(snapshot)),
        })
    }

    fn snapshot(&self) -> Result<Arc<EngineSnapshot>, DomainError> {
        self.engine
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| DomainError::internal("engine snapshot lock poisoned"))
    }

    /// Atomically swap in a new engine configuration.
    ///
    /// In-flight requests keep the snapshot they started with. The rate
    /// limiter and cache capacities are fixed at startup and are not touched
    /// here.
    pub fn reload(&self, engine_config: &EngineConfig) -> Result<(), DomainError> {
        let snapshot = EngineSnapshot::from_config(engine_config)?;

        let mut guard = self
            .engine
            .write()
            .map_err(|_| DomainError::internal("engine snapshot lock poisoned"))?;
        *guard = Arc::new(snapshot);

        info!("engine configuration reloaded");
        Ok(())
    }

    /// Handle one query end to end
    pub async fn handle(&self, query: &str, caller_id: &str) -> Result<GatewayReply, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("Query must not be empty"));
        }

        let decision = self.rate_limiter.check_and_record(caller_id).await;
        if !decision.allowed {
            return Err(DomainError::rate_limit_exceeded(
                caller_id,
                decision.remaining,
                decision.reset_in_seconds,
            ));
        }

        let started = Instant::now();
        let engine = self.snapshot()?;

        let score = engine.scorer.score(query);
        // Caches are partitioned by the tier the score alone would pick, so
        // a later budget-forced downgrade cannot change which partition a
        // lookup reads.
        let candidate_tier = engine.router.candidate_tier(score);

        debug!(caller_id, score, ?candidate_tier, "scored query");

        if let Some(cached) = self.exact_cache.get(query, candidate_tier).await? {
            let latency_ms = started.elapsed().as_millis() as u64;
            self.usage
                .record(CacheOutcome::Exact, cached.tier(), 0.0, latency_ms);

            return Ok(GatewayReply {
                response_text: cached.response_text().to_string(),
                model: cached.model().to_string(),
                tier: cached.tier(),
                complexity_score: score,
                cache_outcome: CacheOutcome::Exact,
                route_reason: "exact-cache-hit",
                cost_usd: 0.0,
                latency_ms,
                similarity: None,
                matched_query: None,
            });
        }

        let embedding = if engine.semantic_enabled {
            match self.embedding_provider.embed(query).await {
                Ok(vector) => Some(vector),
                Err(DomainError::EmbeddingUnavailable { message }) => {
                    warn!(message, "embedding unavailable, skipping semantic cache");
                    None
                }
                Err(other) => return Err(other),
            }
        } else {
            None
        };

        if let Some(ref vector) = embedding {
            if let Some(hit) = self
                .semantic_cache
                .find(vector, candidate_tier, engine.similarity_threshold)
                .await?
            {
                let latency_ms = started.elapsed().as_millis() as u64;
                self.usage
                    .record(CacheOutcome::Semantic, candidate_tier, 0.0, latency_ms);

                return Ok(GatewayReply {
                    response_text: hit.response_text,
                    model: hit.model,
                    tier: candidate_tier,
                    complexity_score: score,
                    cache_outcome: CacheOutcome::Semantic,
                    route_reason: "semantic-cache-hit",
                    cost_usd: 0.0,
                    latency_ms,
                    similarity: Some(hit.similarity),
                    matched_query: Some(hit.matched_query),
                });
            }
        }

        let budget = self.usage.budget_state(engine.budget_limit_usd);
        let route = engine.router.route(score, budget);
        let model = engine.model_for(route.tier);

        if budget == BudgetState::Exhausted {
            warn!(caller_id, score, "budget exhausted, forcing cheap tier");
        }

        // Provider failures propagate before any cache write or cost record.
        let completion = self.completion_provider.complete(query, model).await?;

        let cached_value =
            CachedCompletion::new(completion.response_text(), model, route.tier);
        if let Err(e) = self
            .exact_cache
            .put(query, route.tier, cached_value, engine.exact_ttl)
            .await
        {
            warn!(error = %e, "exact cache write failed");
        }

        if let Some(vector) = embedding {
            let entry = SemanticEntry::new(
                Uuid::new_v4().to_string(),
                vector,
                query,
                completion.response_text(),
                model,
                route.tier,
                engine.semantic_ttl,
            );

            if let Err(e) = self.semantic_cache.store(entry).await {
                // A dimension mismatch here is a bug between the embedding
                // provider and the cache, not a transient condition.
                if matches!(e, DomainError::DimensionMismatch { .. }) {
                    error!(error = %e, "semantic cache rejected entry");
                } else {
                    warn!(error = %e, "semantic cache write failed");
                }
            }
        }

        let latency_ms = started.elapsed().as_millis() as u64;
        let cost_usd = completion.cost_usd();
        self.usage
            .record(CacheOutcome::Miss, route.tier, cost_usd, latency_ms);

        debug!(
            caller_id,
            model,
            reason = route.reason,
            cost_usd,
            "served from provider"
        );

        Ok(GatewayReply {
            response_text: completion.into_response_text(),
            model: model.to_string(),
            tier: route.tier,
            complexity_score: score,
            cache_outcome: CacheOutcome::Miss,
            route_reason: route.reason,
            cost_usd,
            latency_ms,
            similarity: None,
            matched_query: None,
        })
    }

    pub fn usage(&self) -> UsageSnapshot {
        self.usage.snapshot()
    }

    pub async fn semantic_stats(&self) -> Result<SemanticCacheStats, DomainError> {
        self.semantic_cache.stats().await
    }

    /// Drop every cached response from both tiers
    pub async fn clear_caches(&self) -> Result<(), DomainError> {
        self.exact_cache.clear().await?;
        self.semantic_cache.clear().await?;

        info!("caches cleared");
        Ok(())
    }

    /// Sweep expired semantic entries and stale rate limit windows
    pub async fn run_maintenance(&self) -> Result<usize, DomainError> {
        let removed = self.semantic_cache.cleanup_expired().await?;
        self.rate_limiter.cleanup_stale().await;
        Ok(removed)
    }
}

/// Spawn the periodic maintenance sweep for a running gateway.
///
/// Runs for the life of the server; expired semantic entries would otherwise
/// hold capacity slots until LRU pressure and per-caller rate limit windows
/// would accumulate forever.
pub fn spawn_maintenance(
    gateway: Arc<GatewayService>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately; skip it so sweeps start one
        // full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match gateway.run_maintenance().await {
                Ok(removed) if removed > 0 => {
                    debug!(removed, "maintenance sweep removed expired entries");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "maintenance sweep failed"),
            }
        }
    })
}
