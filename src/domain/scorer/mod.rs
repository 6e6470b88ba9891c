//! Query complexity scoring

mod complexity;
mod config;

pub use complexity::ComplexityScorer;
pub use config::ScorerConfig;
