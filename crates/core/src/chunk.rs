//! Chunks, scored chunks, citations, and the assembled context window.
//!
//! A `Chunk` is the unit of retrieval: a contiguous slice of a document
//! identified by character offsets. A `ContextWindow` is what one query
//! produces: the chunks that fit the token budget, in ranked order, plus
//! the citations that point back into the source document.

use serde::{Deserialize, Serialize};

use crate::document::DocumentId;

/// A contiguous slice of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Source document identifier.
    pub document_id: DocumentId,
    /// Character offset of the first character (inclusive).
    pub start_offset: usize,
    /// Character offset one past the last character (exclusive).
    pub end_offset: usize,
    /// The text between the two offsets.
    pub text: String,
    /// Position of this chunk in document order.
    pub sequence_index: usize,
}

impl Chunk {
    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn citation(&self) -> Citation {
        Citation {
            document_id: self.document_id.clone(),
            start_offset: self.start_offset,
            end_offset: self.end_offset,
        }
    }
}

/// A chunk paired with its relevance to one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
    /// Estimated tokens this chunk costs in the prompt.
    pub tokens: usize,
}

/// Where a piece of included context came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    pub document_id: DocumentId,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.document_id, self.start_offset, self.end_offset
        )
    }
}

/// Bookkeeping from one selection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    /// Chunks that were eligible for selection.
    pub candidates: usize,
    /// Chunks that made it into the window.
    pub included: usize,
    /// Chunks skipped because they did not fit the remaining budget.
    pub dropped: usize,
    /// Estimated tokens of the skipped chunks.
    pub dropped_tokens: usize,
}

/// The bounded set of chunks assembled for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextWindow {
    /// Included chunks, highest relevance first.
    pub chunks: Vec<ScoredChunk>,
    /// One citation per included chunk, in the same order.
    pub citations: Vec<Citation>,
    /// Sum of the included chunks' token estimates.
    pub total_tokens: usize,
    /// The budget the window was assembled against.
    pub max_tokens: usize,
    pub stats: SelectionStats,
}

impl ContextWindow {
    /// A window with nothing in it.
    pub fn empty(max_tokens: usize) -> Self {
        Self {
            chunks: Vec::new(),
            citations: Vec::new(),
            total_tokens: 0,
            max_tokens,
            stats: SelectionStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Budget utilization percentage (0.0–100.0).
    pub fn utilization_pct(&self) -> f32 {
        if self.max_tokens == 0 {
            return 0.0;
        }
        (self.total_tokens as f32 / self.max_tokens as f32) * 100.0
    }

    /// Render prompt-ready context text.
    ///
    /// Each chunk is prefixed with a `[n]` marker where `n` is its 1-based
    /// position in `citations`.
    pub fn render(&self) -> String {
        self.chunks
            .iter()
            .enumerate()
            .map(|(i, sc)| format!("[{}] {}", i + 1, sc.chunk.text.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
