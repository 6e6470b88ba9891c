//! LLM Cost Firewall
//!
//! A cost-aware proxy in front of LLM providers:
//! - Lexical complexity scoring routes queries to a cheap or expensive tier
//! - An exact cache and a similarity-based semantic cache avoid repeat spend
//! - Per-caller rate limiting and a global budget cap bound worst-case cost

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::embedding::OpenAiEmbeddingProvider;
use infrastructure::llm::{HttpClient, OpenAiCompletionProvider};
use infrastructure::rate_limit::FixedWindowRateLimiter;
use infrastructure::semantic_cache::InMemorySemanticCache;
use infrastructure::services::GatewayService;
use infrastructure::InMemoryExactCache;

/// Create the application state with all services initialized
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .or_else(|| config.provider.api_key.clone())
        .unwrap_or_else(|| "sk-placeholder".to_string());

    let timeout = std::time::Duration::from_secs(config.provider.timeout_secs);
    let http_client = HttpClient::with_timeout(timeout)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let completion_provider = OpenAiCompletionProvider::with_base_url(
        http_client.clone(),
        api_key.clone(),
        config.provider.base_url.clone(),
        config.engine.models.pricing.clone(),
    );

    let embedding_provider = OpenAiEmbeddingProvider::with_options(
        http_client,
        api_key,
        config.provider.base_url.clone(),
        config.provider.embedding_model.clone(),
        config.provider.embedding_dimensions,
    );

    let semantic_cache = InMemorySemanticCache::new(
        config.provider.embedding_dimensions,
        config.engine.semantic_cache.max_entries,
    );

    let gateway = GatewayService::new(
        Arc::new(InMemoryExactCache::new()),
        Arc::new(semantic_cache),
        Arc::new(embedding_provider),
        Arc::new(completion_provider),
        FixedWindowRateLimiter::new(config.engine.rate_limit.clone()),
        &config.engine,
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize engine: {}", e))?;

    info!(
        cheap = %config.engine.models.cheap,
        expensive = %config.engine.models.expensive,
        "Gateway initialized"
    );

    Ok(AppState::new(Arc::new(gateway)))
}
