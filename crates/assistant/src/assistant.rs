//! The document assistant: grounded Q&A, summaries and challenge mode.
//!
//! # Flow (question answering)
//!
//! 1. Validate the question
//! 2. Select a token-budgeted context window from the document's chunks
//! 3. Add the session's recent conversation
//! 4. Ask the provider for an `Answer:` / `Reference:` response
//! 5. Record the turn (with citations) in the caller's session

use std::sync::Arc;

use serde::Serialize;
use smartdoc_context::ContextAssembler;
use smartdoc_core::error::ProviderError;
use smartdoc_core::provider::{Provider, ProviderRequest};
use smartdoc_core::{
    AssemblyError, ChallengeQuestion, ChallengeState, ChatTurn, Chunk, Citation, ContextWindow,
    Document, Evaluation, SelectionStats, Session,
};
use tracing::{debug, info, warn};

use crate::cache::ChunkCache;
use crate::config::{AssistantConfig, Sampling};
use crate::parse::{
    MAX_CHALLENGE_QUESTIONS, fallback_questions, parse_answer, parse_evaluation, parse_questions,
};
use crate::prompt::{self, EVALUATION_EXCERPT_CHARS, QUESTION_EXCERPT_CHARS};
use crate::summary::{extract_key_sentences, truncate_words};
use crate::validate::validate_question;

/// Characters of raw text summarized when no key sentence qualifies.
const SUMMARY_FALLBACK_CHARS: usize = 2000;

/// A grounded answer to one question.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub answer: String,
    pub reference: String,
    /// Spans of the chunks the model was shown.
    pub citations: Vec<Citation>,
    pub stats: SelectionStats,
    pub context_tokens: usize,
}

/// An answer prompt ready to send, with the window it was built from.
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub prompt: String,
    pub window: ContextWindow,
}

pub struct DocumentAssistant {
    provider: Arc<dyn Provider>,
    config: AssistantConfig,
    assembler: ContextAssembler,
}

impl DocumentAssistant {
    /// Create an assistant, validating chunking and selection settings.
    pub fn new(provider: Arc<dyn Provider>, config: AssistantConfig) -> Result<Self, AssemblyError> {
        let assembler = ContextAssembler::new(config.chunking, config.selection)?;
        Ok(Self {
            provider,
            config,
            assembler,
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn assembler(&self) -> &ContextAssembler {
        &self.assembler
    }

    /// Chunks for `document`, memoized in the caller's cache.
    pub fn chunks<'c>(
        &self,
        cache: &'c mut ChunkCache,
        document: &Document,
    ) -> Result<&'c [Chunk], AssemblyError> {
        cache.get_or_chunk(document, self.assembler.chunker())
    }

    /// Build the grounded prompt for `question` without sending it.
    pub fn prepare_answer(
        &self,
        session: &Session,
        chunks: &[Chunk],
        question: &str,
    ) -> smartdoc_core::Result<PreparedPrompt> {
        let question = validate_question(question)?;
        let window = self
            .assembler
            .select(chunks, question, self.config.max_context_tokens)?;

        if window.is_empty() {
            warn!(
                candidates = window.stats.candidates,
                max_tokens = window.max_tokens,
                "no chunk fits the context budget"
            );
        }

        let history = session.recent_context(self.config.history_turns);
        let prompt = prompt::answer_prompt(&window.render(), &history, question);
        Ok(PreparedPrompt { prompt, window })
    }

    /// Answer a question from the document and record the turn in `session`.
    ///
    /// Validation, selection and provider errors are returned as-is; the
    /// session is only modified on success.
    pub async fn answer_question(
        &self,
        session: &mut Session,
        chunks: &[Chunk],
        question: &str,
    ) -> smartdoc_core::Result<Answer> {
        let PreparedPrompt { prompt, window } = self.prepare_answer(session, chunks, question)?;

        info!(
            model = %self.config.model,
            chunks = window.len(),
            tokens = window.total_tokens,
            "answering question"
        );

        let text = self.complete_text(prompt, self.config.answer).await?;
        let parsed = parse_answer(&text);

        session.push_turn(ChatTurn {
            question: question.trim().to_string(),
            answer: parsed.answer.clone(),
            reference: parsed.reference.clone(),
            citations: window.citations.clone(),
            timestamp: chrono::Utc::now(),
        });

        Ok(Answer {
            answer: parsed.answer,
            reference: parsed.reference,
            citations: window.citations,
            stats: window.stats,
            context_tokens: window.total_tokens,
        })
    }

    /// Summarize a document in at most `summary_max_words` words.
    pub async fn summarize(&self, document: &Document) -> smartdoc_core::Result<String> {
        let key = extract_key_sentences(document.text(), self.config.max_key_sentences);
        let content = if key.is_empty() {
            document.excerpt(SUMMARY_FALLBACK_CHARS).to_string()
        } else {
            key.join(". ")
        };
        debug!(key_sentences = key.len(), "summarizing document");

        let prompt = prompt::summary_prompt(&content, self.config.summary_max_words);
        let text = self.complete_text(prompt, self.config.summary).await?;
        Ok(truncate_words(&text, self.config.summary_max_words))
    }

    /// Generate challenge questions, falling back to generic ones when the
    /// provider fails or returns nothing usable.
    pub async fn generate_challenge_questions(&self, document: &Document) -> Vec<ChallengeQuestion> {
        let prompt = prompt::question_prompt(
            document.excerpt(QUESTION_EXCERPT_CHARS),
            MAX_CHALLENGE_QUESTIONS,
        );

        match self.complete_text(prompt, self.config.questions).await {
            Ok(text) => {
                let questions = parse_questions(&text);
                if questions.is_empty() {
                    warn!("no questions could be parsed, using fallback questions");
                    return fallback_questions();
                }
                info!(count = questions.len(), "generated challenge questions");
                questions
            }
            Err(e) => {
                warn!(error = %e, "question generation failed, using fallback questions");
                fallback_questions()
            }
        }
    }

    /// Generate questions and start a fresh challenge in `session`.
    pub async fn start_challenge(&self, session: &mut Session, document: &Document) -> usize {
        let questions = self.generate_challenge_questions(document).await;
        let count = questions.len();
        session.challenge = ChallengeState::new(questions);
        count
    }

    /// Grade a user's answer. Provider failures yield a neutral evaluation.
    pub async fn evaluate_answer(
        &self,
        question: &ChallengeQuestion,
        user_answer: &str,
        document: &Document,
    ) -> Evaluation {
        let prompt = prompt::evaluation_prompt(
            document.excerpt(EVALUATION_EXCERPT_CHARS),
            &question.question,
            &question.expected_answer,
            user_answer.trim(),
        );

        match self.complete_text(prompt, self.config.evaluation).await {
            Ok(text) => parse_evaluation(&text),
            Err(e) => {
                warn!(error = %e, "answer evaluation failed, using neutral score");
                Evaluation {
                    score: Evaluation::NEUTRAL_SCORE,
                    feedback: "Unable to evaluate answer at this time.".into(),
                    justification: "System error occurred during evaluation.".into(),
                }
            }
        }
    }

    /// Evaluate an answer to the session's current challenge question and
    /// advance. Returns `None` when no question is pending.
    pub async fn submit_challenge_answer(
        &self,
        session: &mut Session,
        document: &Document,
        user_answer: &str,
    ) -> Option<Evaluation> {
        let index = session.challenge.current_index;
        let question = session.challenge.current()?.clone();

        let evaluation = self.evaluate_answer(&question, user_answer, document).await;
        session
            .challenge
            .record(index, user_answer.trim(), evaluation.clone());
        Some(evaluation)
    }

    /// Whether the provider accepts requests with the configured key.
    pub async fn check_provider(&self) -> bool {
        match self.provider.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "provider health check failed");
                false
            }
        }
    }

    async fn complete_text(&self, prompt: String, sampling: Sampling) -> Result<String, ProviderError> {
        let request = ProviderRequest::prompt(&self.config.model, prompt)
            .with_temperature(sampling.temperature)
            .with_max_tokens(sampling.max_tokens);

        let response = self.provider.complete(request).await?;
        let text = response.message.content.trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
