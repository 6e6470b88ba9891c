//! Chat endpoint handler

use axum::{extract::State, Json};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ChatRequest, ChatResponse};

/// POST /v1/chat
pub async fn create_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply = state
        .gateway
        .handle(&request.query, &request.caller_id)
        .await?;

    info!(
        caller_id = %request.caller_id,
        model = %reply.model,
        cache = %reply.cache_outcome,
        reason = reply.route_reason,
        "Chat request served"
    );

    Ok(Json(ChatResponse::from(reply)))
}
