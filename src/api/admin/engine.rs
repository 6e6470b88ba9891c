//! Engine reconfiguration endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::config::EngineConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub reloaded: bool,
}

/// PUT /admin/engine
///
/// Replaces the engine parameters atomically. A rejected config (for example
/// an invalid scorer pattern) leaves the running configuration untouched.
pub async fn reload_engine(
    State(state): State<AppState>,
    Json(config): Json<EngineConfig>,
) -> Result<Json<ReloadResponse>, ApiError> {
    state.gateway.reload(&config)?;

    info!("Engine configuration replaced via admin API");
    Ok(Json(ReloadResponse { reloaded: true }))
}
