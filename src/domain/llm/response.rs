//! Completion response types

use serde::{Deserialize, Serialize};

/// Result of one upstream completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// The generated response text
    response_text: String,
    /// Prompt tokens consumed
    input_tokens: u32,
    /// Completion tokens generated
    output_tokens: u32,
    /// Cost of this call in USD
    cost_usd: f64,
    /// Wall-clock latency of the provider call
    latency_ms: u64,
}

impl Completion {
    pub fn new(
        response_text: impl Into<String>,
        input_tokens: u32,
        output_tokens: u32,
        cost_usd: f64,
        latency_ms: u64,
    ) -> Self {
        Self {
            response_text: response_text.into(),
            input_tokens,
            output_tokens,
            cost_usd,
            latency_ms,
        }
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    pub fn input_tokens(&self) -> u32 {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> u32 {
        self.output_tokens
    }

    pub fn cost_usd(&self) -> f64 {
        self.cost_usd
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    pub fn into_response_text(self) -> String {
        self.response_text
    }
}

/// Per-model pricing in USD per 1K tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl ModelPricing {
    pub fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    /// Cost of a call in USD given token usage
    pub fn cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        (input_tokens as f64 / 1000.0) * self.input_per_1k
            + (output_tokens as f64 / 1000.0) * self.output_per_1k
    }
}
