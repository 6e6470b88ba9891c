//! Cache administration endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCachesResponse {
    pub cleared: bool,
}

/// POST /admin/cache/clear
pub async fn clear_caches(
    State(state): State<AppState>,
) -> Result<Json<ClearCachesResponse>, ApiError> {
    state.gateway.clear_caches().await?;

    Ok(Json(ClearCachesResponse { cleared: true }))
}
