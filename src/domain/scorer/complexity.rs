//! Query complexity scoring
//!
//! Estimates how "hard" a query is on a [0, 1] scale from cheap lexical
//! signals. The score is deterministic and side-effect free; it drives tier
//! selection but takes no dependency on cache or router state.

use regex::RegexSet;

use super::ScorerConfig;
use crate::domain::DomainError;

const COMPLEX_KEYWORD_SATURATION: f32 = 3.0;
const LONG_WORD_SATURATION: f32 = 5.0;
const LONG_WORD_MIN_CHARS: usize = 8;

/// Scores query complexity from lexical signals
#[derive(Debug)]
pub struct ComplexityScorer {
    config: ScorerConfig,
    simple_patterns: RegexSet,
}

impl ComplexityScorer {
    /// Build a scorer, compiling the simple-query patterns once.
    ///
    /// An invalid pattern is a configuration fault.
    pub fn new(config: ScorerConfig) -> Result<Self, DomainError> {
        let simple_patterns = RegexSet::new(&config.simple_patterns).map_err(|e| {
            DomainError::configuration(format!("Invalid simple-query pattern: {}", e))
        })?;

        Ok(Self {
            config,
            simple_patterns,
        })
    }

    /// Score a query in [0, 1]. Higher means more complex.
    pub fn score(&self, text: &str) -> f32 {
        let lower = text.to_lowercase();

        let length_signal =
            (text.chars().count() as f32 / self.config.length_saturation as f32).min(1.0);

        let complex_count = self
            .config
            .complex_keywords
            .iter()
            .filter(|kw| lower.contains(kw.as_str()))
            .count();
        let complex_signal = (complex_count as f32 / COMPLEX_KEYWORD_SATURATION).min(1.0);

        let multi_sentence_signal = if sentence_count(text) >= 2 { 1.0 } else { 0.0 };

        let long_words = text
            .split_whitespace()
            .filter(|w| w.chars().count() > LONG_WORD_MIN_CHARS)
            .count();
        let long_word_signal = (long_words as f32 / LONG_WORD_SATURATION).min(1.0);

        let simple_signal = if self.simple_patterns.is_match(&lower) {
            1.0
        } else {
            0.0
        };

        let score = self.config.length_weight * length_signal
            + self.config.complex_weight * complex_signal
            + self.config.multi_sentence_weight * multi_sentence_signal
            + self.config.long_word_weight * long_word_signal
            - self.config.simple_penalty * simple_signal;

        score.clamp(0.0, 1.0)
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }
}

/// Number of sentence delimiters (`.`, `?`, `!`), minimum 1
fn sentence_count(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '.' | '?' | '!'))
        .count()
        .max(1)
}
