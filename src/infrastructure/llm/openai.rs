use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::http_client::HttpClientTrait;
use crate::domain::llm::{Completion, CompletionProvider, ModelPricing};
use crate::domain::DomainError;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI-compatible chat completion provider
///
/// Cost is computed locally from the usage block and the configured per-model
/// pricing table.
#[derive(Debug)]
pub struct OpenAiCompletionProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    pricing: HashMap<String, ModelPricing>,
}

impl<C: HttpClientTrait> OpenAiCompletionProvider<C> {
    pub fn new(
        client: C,
        api_key: impl Into<String>,
        pricing: HashMap<String, ModelPricing>,
    ) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL, pricing)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        pricing: HashMap<String, ModelPricing>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            pricing,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn cost_for(&self, model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
        match self.pricing.get(model) {
            Some(pricing) => pricing.cost(input_tokens, output_tokens),
            None => {
                warn!(model, "no pricing configured for model, recording zero cost");
                0.0
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for OpenAiCompletionProvider<C> {
    async fn complete(&self, prompt: &str, model: &str) -> Result<Completion, DomainError> {
        let body = serde_json::json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let started = Instant::now();
        let json = self
            .client
            .post_json(&self.chat_completions_url(), self.headers(), &body)
            .await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let response: ChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

        let usage = response.usage.unwrap_or_default();
        let cost_usd = self.cost_for(model, usage.prompt_tokens, usage.completion_tokens);

        Ok(Completion::new(
            choice.message.content.unwrap_or_default(),
            usage.prompt_tokens,
            usage.completion_tokens,
            cost_usd,
            latency_ms,
        ))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
