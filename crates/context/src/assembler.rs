//! Context assembly: ranking chunks into a token-budgeted window.
//!
//! Turns a document into chunks and, per query, picks the chunks that go
//! into a token-bounded context window:
//!
//! 1. **Score** every chunk against the query terms
//! 2. **Rank** by score descending, ties by `sequence_index` ascending
//! 3. **Fill** the budget greedily in ranked order; a chunk that does not
//!    fit is dropped and the next one is tried
//!
//! # Determinism
//!
//! Assembly is deterministic: identical inputs always produce identical
//! outputs. No random or time-dependent logic is used.

use serde::{Deserialize, Serialize};
use smartdoc_core::chunk::{Chunk, ContextWindow, ScoredChunk, SelectionStats};
use smartdoc_core::document::Document;
use smartdoc_core::error::AssemblyError;
use tracing::debug;

use crate::chunker::{Chunker, ChunkerConfig};
use crate::scoring::{QueryTerms, TermScorer};
use crate::token::{DEFAULT_CHARS_PER_TOKEN, TokenEstimator};

/// Scoring and budgeting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Divisor for the character-based token estimate.
    pub chars_per_token: usize,
    /// Weight applied to each query-term occurrence.
    pub term_weight: f32,
    /// Chunks scoring below this are not candidates.
    pub min_score: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            term_weight: 1.0,
            min_score: 0.0,
        }
    }
}

/// Select from `chunks` with the default selection configuration.
pub fn select(
    chunks: &[Chunk],
    query: &str,
    max_tokens: usize,
) -> Result<ContextWindow, AssemblyError> {
    ContextAssembler::with_defaults().select(chunks, query, max_tokens)
}

/// The context assembler. Holds only configuration; create one and reuse it.
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    chunker: Chunker,
    scorer: TermScorer,
    estimator: TokenEstimator,
    min_score: f32,
}

impl ContextAssembler {
    /// Create an assembler, validating both configurations.
    pub fn new(chunking: ChunkerConfig, selection: SelectionConfig) -> Result<Self, AssemblyError> {
        if !selection.min_score.is_finite() {
            return Err(AssemblyError::InvalidConfiguration(
                "min_score must be a finite number".into(),
            ));
        }
        Ok(Self {
            chunker: Chunker::new(chunking)?,
            scorer: TermScorer::new(selection.term_weight)?,
            estimator: TokenEstimator::new(selection.chars_per_token)?,
            min_score: selection.min_score,
        })
    }

    /// Create an assembler with default chunking (1500/150) and selection.
    pub fn with_defaults() -> Self {
        Self {
            chunker: Chunker::default(),
            scorer: TermScorer::default(),
            estimator: TokenEstimator::default(),
            min_score: 0.0,
        }
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    pub fn chunker_config(&self) -> &ChunkerConfig {
        self.chunker.config()
    }

    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    /// Split a document into chunks.
    pub fn chunk(&self, document: &Document) -> Result<Vec<Chunk>, AssemblyError> {
        self.chunker.chunk(document)
    }

    /// Score every chunk and sort into ranked order.
    pub fn rank(&self, chunks: &[Chunk], query: &str) -> Vec<ScoredChunk> {
        let terms = QueryTerms::parse(query);
        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .map(|c| ScoredChunk {
                chunk: c.clone(),
                score: self.scorer.score(&terms, c),
                tokens: self.estimator.estimate_chars(c.char_len()),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.chunk.sequence_index.cmp(&b.chunk.sequence_index))
        });
        scored
    }

    /// Assemble a context window for `query` within `max_tokens`.
    ///
    /// # Algorithm
    ///
    /// 1. Reject a zero budget
    /// 2. Rank all chunks and discard those below `min_score`
    /// 3. Walk the ranking, accepting each chunk whose estimate still fits
    /// 4. Record one citation per accepted chunk, in window order
    ///
    /// An empty window is a valid result, not an error.
    pub fn select(
        &self,
        chunks: &[Chunk],
        query: &str,
        max_tokens: usize,
    ) -> Result<ContextWindow, AssemblyError> {
        if max_tokens == 0 {
            return Err(AssemblyError::InvalidConfiguration(
                "max_tokens must be > 0".into(),
            ));
        }

        let candidates: Vec<ScoredChunk> = self
            .rank(chunks, query)
            .into_iter()
            .filter(|sc| sc.score >= self.min_score)
            .collect();

        let mut window = ContextWindow::empty(max_tokens);
        window.stats.candidates = candidates.len();

        for sc in candidates {
            if window.total_tokens + sc.tokens <= max_tokens {
                window.total_tokens += sc.tokens;
                window.citations.push(sc.chunk.citation());
                window.chunks.push(sc);
            } else {
                window.stats.dropped += 1;
                window.stats.dropped_tokens += sc.tokens;
            }
        }
        window.stats.included = window.chunks.len();

        debug!(
            query_len = query.len(),
            candidates = window.stats.candidates,
            included = window.stats.included,
            dropped = window.stats.dropped,
            total_tokens = window.total_tokens,
            max_tokens,
            "context window assembled"
        );

        Ok(window)
    }
}
