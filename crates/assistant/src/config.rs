//! Assistant settings, derived from the application config.

use smartdoc_config::AppConfig;
use smartdoc_context::{ChunkerConfig, SelectionConfig};

/// Sampling settings for one kind of request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub model: String,
    /// Used for question answering.
    pub answer: Sampling,
    pub summary: Sampling,
    pub questions: Sampling,
    pub evaluation: Sampling,
    pub chunking: ChunkerConfig,
    pub selection: SelectionConfig,
    /// Token budget for the context window of each answer.
    pub max_context_tokens: usize,
    /// Previous turns included in answer prompts.
    pub history_turns: usize,
    pub max_key_sentences: usize,
    pub summary_max_words: usize,
}

impl AssistantConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        let chunking = ChunkerConfig {
            chunk_size: config.chunking.chunk_size,
            overlap: config.chunking.overlap,
            lookback: config.chunking.lookback,
            lookahead: config.chunking.lookahead,
        };
        let selection = SelectionConfig {
            chars_per_token: config.retrieval.chars_per_token,
            term_weight: config.retrieval.term_weight,
            min_score: config.retrieval.min_score,
        };

        Self {
            model: config.model.clone(),
            answer: Sampling {
                temperature: config.temperature,
                max_tokens: config.max_response_tokens,
            },
            summary: Sampling {
                temperature: 0.3,
                max_tokens: 200,
            },
            questions: Sampling {
                temperature: 0.5,
                max_tokens: 800,
            },
            evaluation: Sampling {
                temperature: 0.3,
                max_tokens: 400,
            },
            chunking,
            selection,
            max_context_tokens: config.retrieval.max_context_tokens,
            history_turns: config.retrieval.history_turns,
            max_key_sentences: config.summary.max_key_sentences,
            summary_max_words: config.summary.max_words,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}
