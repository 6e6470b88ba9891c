//! Chat request and response types

use serde::{Deserialize, Serialize};

use crate::domain::llm::ModelTier;
use crate::domain::usage::CacheOutcome;
use crate::infrastructure::services::GatewayReply;

/// POST /v1/chat request body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    /// Identifier the rate limiter buckets by; defaults to "anonymous"
    #[serde(default = "default_caller_id")]
    pub caller_id: String,
}

fn default_caller_id() -> String {
    "anonymous".to_string()
}

/// POST /v1/chat response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    pub tier: ModelTier,
    pub complexity_score: f32,
    pub cache_hit: bool,
    pub cache_type: CacheOutcome,
    pub route_reason: String,
    pub cost_usd: f64,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_query: Option<String>,
}

/// Longest matched-query echo returned to callers
const MATCHED_QUERY_MAX_CHARS: usize = 100;

impl From<GatewayReply> for ChatResponse {
    fn from(reply: GatewayReply) -> Self {
        Self {
            response: reply.response_text,
            model: reply.model,
            tier: reply.tier,
            complexity_score: reply.complexity_score,
            cache_hit: reply.cache_outcome.is_hit(),
            cache_type: reply.cache_outcome,
            route_reason: reply.route_reason.to_string(),
            cost_usd: reply.cost_usd,
            latency_ms: reply.latency_ms,
            similarity: reply.similarity,
            matched_query: reply
                .matched_query
                .map(|q| q.chars().take(MATCHED_QUERY_MAX_CHARS).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_default_caller() {
        let request: ChatRequest = serde_json::from_str(r#"{"query": "hi"}"#).unwrap();
        assert_eq!(request.caller_id, "anonymous");
    }

    #[test]
    fn test_response_from_reply() {
        let reply = GatewayReply {
            response_text: "four".to_string(),
            model: "gpt-4o-mini".to_string(),
            tier: ModelTier::Cheap,
            complexity_score: 0.1,
            cache_outcome: CacheOutcome::Semantic,
            route_reason: "semantic-cache-hit",
            cost_usd: 0.0,
            latency_ms: 3,
            similarity: Some(0.91),
            matched_query: Some("what is 2 plus 2".to_string()),
        };

        let response = ChatResponse::from(reply);

        assert!(response.cache_hit);
        assert_eq!(response.cache_type, CacheOutcome::Semantic);
        assert_eq!(response.similarity, Some(0.91));
    }

    #[test]
    fn test_miss_omits_similarity_fields() {
        let reply = GatewayReply {
            response_text: "answer".to_string(),
            model: "gpt-4o".to_string(),
            tier: ModelTier::Expensive,
            complexity_score: 0.8,
            cache_outcome: CacheOutcome::Miss,
            route_reason: "complexity-above-threshold",
            cost_usd: 0.01,
            latency_ms: 300,
            similarity: None,
            matched_query: None,
        };

        let json = serde_json::to_string(&ChatResponse::from(reply)).unwrap();

        assert!(!json.contains("similarity"));
        assert!(!json.contains("matched_query"));
    }
}
