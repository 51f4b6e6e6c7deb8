//! # SmartDoc Assistant
//!
//! Grounded question answering, summaries, and challenge quizzes over an
//! uploaded document. The model is reached only through the
//! [`Provider`](smartdoc_core::Provider) trait; session state and the
//! chunk cache are values the caller owns and passes in.

pub mod assistant;
pub mod cache;
pub mod config;
pub mod offline;
pub mod parse;
pub mod prompt;
pub mod stats;
pub mod summary;
pub mod validate;

#[cfg(test)]
mod test_helpers;

pub use assistant::{Answer, DocumentAssistant, PreparedPrompt};
pub use cache::ChunkCache;
pub use config::{AssistantConfig, Sampling};
pub use offline::OfflineProvider;
pub use parse::{fallback_questions, parse_answer, parse_evaluation, parse_questions};
pub use stats::{QuestionStatistics, question_statistics};
pub use summary::{extract_key_sentences, truncate_words};
pub use validate::validate_question;
