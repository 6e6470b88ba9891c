use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::llm::ModelPricing;
use crate::domain::rate_limit::RateLimitConfig;
use crate::domain::router::RouterConfig;
use crate::domain::scorer::ScorerConfig;
use crate::domain::semantic_cache::SemanticCacheConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Upstream provider connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API key; overridden by OPENAI_API_KEY when set
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    /// HTTP timeout for provider calls in seconds
    pub timeout_secs: u64,
}

/// Everything the request engine needs: scoring, routing, caching, rate
/// limiting, budget, and the tier-to-model mapping.
///
/// This block is hot-reloadable at runtime; see the engine snapshot handling
/// in the gateway service.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub scorer: ScorerConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub semantic_cache: SemanticCacheConfig,
    #[serde(default)]
    pub exact_cache: ExactCacheConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub models: ModelsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExactCacheConfig {
    /// Time-to-live for exact cache entries in seconds
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetConfig {
    /// Total spending limit in USD; zero or negative disables the limit
    pub limit_usd: f64,
}

/// Tier-to-model mapping and per-model pricing
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    pub cheap: String,
    pub expensive: String,
    /// USD per 1K tokens, keyed by model name
    #[serde(default)]
    pub pricing: HashMap<String, ModelPricing>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimensions: 1536,
            timeout_secs: 60,
        }
    }
}

impl Default for ExactCacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self { limit_usd: 0.0 }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        let mut pricing = HashMap::new();
        pricing.insert(
            "gpt-4o-mini".to_string(),
            ModelPricing::new(0.000_15, 0.000_6),
        );
        pricing.insert("gpt-4o".to_string(), ModelPricing::new(0.002_5, 0.01));

        Self {
            cheap: "gpt-4o-mini".to_string(),
            expensive: "gpt-4o".to_string(),
            pricing,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
