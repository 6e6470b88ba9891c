pub mod app_config;

pub use app_config::{
    AppConfig, BudgetConfig, EngineConfig, ExactCacheConfig, LogFormat, LoggingConfig,
    ModelsConfig, ProviderConfig, ServerConfig,
};
