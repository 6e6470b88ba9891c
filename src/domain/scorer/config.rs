//! Complexity scorer configuration

use serde::{Deserialize, Serialize};

/// Configuration for the query complexity scorer
///
/// Weights apply to signals that are individually clamped to [0, 1]; the
/// simple-pattern weight is a penalty subtracted from the sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Character count at which the length signal saturates
    #[serde(default = "default_length_saturation")]
    pub length_saturation: usize,

    /// Keywords that indicate a complex query (substring match, lowercased)
    #[serde(default = "default_complex_keywords")]
    pub complex_keywords: Vec<String>,

    /// Regex patterns that indicate a simple query (matched on lowercased text)
    #[serde(default = "default_simple_patterns")]
    pub simple_patterns: Vec<String>,

    #[serde(default = "default_length_weight")]
    pub length_weight: f32,

    #[serde(default = "default_complex_weight")]
    pub complex_weight: f32,

    #[serde(default = "default_multi_sentence_weight")]
    pub multi_sentence_weight: f32,

    #[serde(default = "default_long_word_weight")]
    pub long_word_weight: f32,

    #[serde(default = "default_simple_penalty")]
    pub simple_penalty: f32,
}

fn default_length_saturation() -> usize {
    200
}

fn default_complex_keywords() -> Vec<String> {
    [
        "analyze",
        "explain",
        "compare",
        "detailed",
        "comprehensive",
        "step-by-step",
        "reasoning",
        "evaluate",
        "critique",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_simple_patterns() -> Vec<String> {
    [
        "^what is\\b",
        "^who is\\b",
        "^define\\b",
        "^translate\\b",
        "^summarize\\b",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_length_weight() -> f32 {
    0.25
}

fn default_complex_weight() -> f32 {
    0.50
}

fn default_multi_sentence_weight() -> f32 {
    0.15
}

fn default_long_word_weight() -> f32 {
    0.10
}

fn default_simple_penalty() -> f32 {
    0.40
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            length_saturation: default_length_saturation(),
            complex_keywords: default_complex_keywords(),
            simple_patterns: default_simple_patterns(),
            length_weight: default_length_weight(),
            complex_weight: default_complex_weight(),
            multi_sentence_weight: default_multi_sentence_weight(),
            long_word_weight: default_long_word_weight(),
            simple_penalty: default_simple_penalty(),
        }
    }
}

impl ScorerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_saturation(mut self, chars: usize) -> Self {
        self.length_saturation = chars;
        self
    }

    pub fn with_complex_keywords(mut self, keywords: Vec<String>) -> Self {
        self.complex_keywords = keywords;
        self
    }

    pub fn with_simple_patterns(mut self, patterns: Vec<String>) -> Self {
        self.simple_patterns = patterns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScorerConfig::default();

        assert_eq!(config.length_saturation, 200);
        assert!(config.complex_keywords.contains(&"analyze".to_string()));
        assert!(config.simple_patterns.iter().any(|p| p.contains("what is")));
        assert!((config.length_weight - 0.25).abs() < f32::EPSILON);
        assert!((config.simple_penalty - 0.40).abs() < f32::EPSILON);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ScorerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.length_saturation, 200);
        assert_eq!(config.complex_keywords.len(), 9);
    }

    #[test]
    fn test_builder() {
        let config = ScorerConfig::new()
            .with_length_saturation(500)
            .with_complex_keywords(vec!["prove".into()]);

        assert_eq!(config.length_saturation, 500);
        assert_eq!(config.complex_keywords, vec!["prove".to_string()]);
    }
}
