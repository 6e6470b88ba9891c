//! Admin API endpoints

pub mod cache;
pub mod engine;
pub mod usage;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/usage", get(usage::get_usage))
        .route("/cache/clear", post(cache::clear_caches))
        .route("/engine", put(engine::reload_engine))
}
