//! Boundary-aware document chunking.
//!
//! Splits a document into chunks of roughly `chunk_size` characters. Each
//! chunk starts `overlap` characters before the previous chunk ended, so
//! consecutive chunks share exactly `overlap` characters and the sequence
//! covers the whole document.
//!
//! # End selection
//!
//! For a chunk starting at `start`, the target end is `start + chunk_size`.
//! The actual end is, in order of preference:
//!
//! 1. the nearest sentence or paragraph boundary at or before the target
//!    (within the lookback window), then after it (within the lookahead
//!    window);
//! 2. the nearest word boundary, searched the same way;
//! 3. the target itself (hard cut).
//!
//! A boundary is the position of the first character of the next word, so
//! whitespace after a sentence stays with the sentence. Every end is
//! strictly greater than `start + overlap`, which guarantees progress.

use serde::{Deserialize, Serialize};
use smartdoc_core::chunk::Chunk;
use smartdoc_core::document::Document;
use smartdoc_core::error::AssemblyError;
use tracing::debug;

/// Characters that close a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Characters allowed between a terminator and the following whitespace.
const CLOSING_MARKS: [char; 5] = ['"', '\'', ')', ']', '\u{201D}'];

/// Chunking parameters. All sizes are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkerConfig {
    pub chunk_size: usize,
    pub overlap: usize,
    /// Lookback window for boundary search; `None` means `chunk_size / 2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback: Option<usize>,
    /// Lookahead window for boundary search; `None` means `chunk_size / 10`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead: Option<usize>,
}

impl ChunkerConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            lookback: None,
            lookahead: None,
        }
    }

    pub fn with_windows(mut self, lookback: usize, lookahead: usize) -> Self {
        self.lookback = Some(lookback);
        self.lookahead = Some(lookahead);
        self
    }

    pub fn validate(&self) -> Result<(), AssemblyError> {
        if self.chunk_size == 0 {
            return Err(AssemblyError::InvalidConfiguration(
                "chunk_size must be > 0".into(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(AssemblyError::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    fn lookback_window(&self) -> usize {
        self.lookback.unwrap_or(self.chunk_size / 2)
    }

    fn lookahead_window(&self) -> usize {
        self.lookahead.unwrap_or(self.chunk_size / 10)
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self::new(1500, 150)
    }
}

/// Chunk `document` with default boundary windows.
pub fn chunk(
    document: &Document,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<Chunk>, AssemblyError> {
    Chunker::new(ChunkerConfig::new(chunk_size, overlap))?.chunk(document)
}

/// A validated chunking configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Result<Self, AssemblyError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split `document` into an ordered, fully covering chunk sequence.
    pub fn chunk(&self, document: &Document) -> Result<Vec<Chunk>, AssemblyError> {
        if document.is_empty() {
            return Err(AssemblyError::EmptyDocument {
                document_id: document.id().to_string(),
            });
        }

        let text = document.text();
        let chars: Vec<char> = text.chars().collect();
        let mut byte_at: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        byte_at.push(text.len());

        let n = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = self.find_end(&chars, start);
            chunks.push(Chunk {
                document_id: document.id().clone(),
                start_offset: start,
                end_offset: end,
                text: text[byte_at[start]..byte_at[end]].to_string(),
                sequence_index: chunks.len(),
            });
            if end >= n {
                break;
            }
            start = end - self.config.overlap;
        }

        debug!(
            document_id = %document.id(),
            chars = n,
            chunks = chunks.len(),
            chunk_size = self.config.chunk_size,
            overlap = self.config.overlap,
            "document chunked"
        );

        Ok(chunks)
    }

    fn find_end(&self, chars: &[char], start: usize) -> usize {
        let n = chars.len();
        let target = start + self.config.chunk_size;
        if target >= n {
            return n;
        }

        // overlap < chunk_size, so floor <= target
        let floor = start + self.config.overlap + 1;
        let back_limit = target
            .saturating_sub(self.config.lookback_window())
            .max(floor);
        let ahead_limit = (target + self.config.lookahead_window()).min(n);

        for tier in [Boundary::Sentence, Boundary::Word] {
            if let Some(p) = (back_limit..=target).rev().find(|&p| tier.at(chars, p)) {
                return p;
            }
            if let Some(p) = (target + 1..=ahead_limit).find(|&p| tier.at(chars, p)) {
                return p;
            }
        }

        target
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// End of a sentence or paragraph.
    Sentence,
    /// Any whitespace-to-word transition.
    Word,
}

impl Boundary {
    fn at(self, chars: &[char], p: usize) -> bool {
        if p == chars.len() {
            return true;
        }
        if p == 0 || !is_word_start(chars, p) {
            return false;
        }
        match self {
            Boundary::Word => true,
            Boundary::Sentence => ends_sentence_or_paragraph(chars, p),
        }
    }
}

fn is_word_start(chars: &[char], p: usize) -> bool {
    chars[p - 1].is_whitespace() && !chars[p].is_whitespace()
}

/// Whether the whitespace run ending at `p` closes a sentence or paragraph.
fn ends_sentence_or_paragraph(chars: &[char], p: usize) -> bool {
    let mut i = p;
    let mut newlines = 0;
    while i > 0 && chars[i - 1].is_whitespace() {
        if chars[i - 1] == '\n' {
            newlines += 1;
        }
        i -= 1;
    }
    if newlines >= 2 {
        return true;
    }
    while i > 0 && CLOSING_MARKS.contains(&chars[i - 1]) {
        i -= 1;
    }
    i > 0 && SENTENCE_TERMINATORS.contains(&chars[i - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartdoc_core::document::DocumentId;

    fn doc(text: &str) -> Document {
        Document::new(DocumentId::from("doc"), text)
    }

    fn stitch(chunks: &[Chunk]) -> String {
        let mut out = String::new();
        let mut covered = 0;
        for c in chunks {
            let skip = covered - c.start_offset;
            out.extend(c.text.chars().skip(skip));
            covered = c.end_offset;
        }
        out
    }

    #[test]
    fn splits_three_sentences_at_boundaries() {
        let d = doc("Sentence one. Sentence two. Sentence three.");
        let chunks = chunk(&d, 20, 0).unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Sentence one. ", "Sentence two. ", "Sentence three."]);
        assert_eq!(chunks[1].start_offset, 14);
        assert_eq!(chunks[1].end_offset, 28);
        assert_eq!(chunks[2].sequence_index, 2);
    }

    #[test]
    fn zero_chunk_size_is_invalid() {
        let d = doc("anything");
        assert!(matches!(
            chunk(&d, 0, 0),
            Err(AssemblyError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn overlap_not_smaller_than_chunk_size_is_invalid() {
        let d = doc("anything");
        assert!(matches!(
            chunk(&d, 10, 10),
            Err(AssemblyError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn empty_document_is_rejected() {
        let d = doc("");
        assert_eq!(
            chunk(&d, 10, 0),
            Err(AssemblyError::EmptyDocument {
                document_id: "doc".into()
            })
        );
    }

    #[test]
    fn configuration_checked_before_document() {
        let d = doc("");
        assert!(matches!(
            chunk(&d, 0, 0),
            Err(AssemblyError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn short_document_is_single_chunk() {
        let d = doc("Tiny.");
        let chunks = chunk(&d, 100, 10).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[0].end_offset, 5);
    }

    #[test]
    fn hard_cut_without_boundaries() {
        let d = doc(&"x".repeat(25));
        let chunks = chunk(&d, 10, 0).unwrap();
        let spans: Vec<(usize, usize)> =
            chunks.iter().map(|c| (c.start_offset, c.end_offset)).collect();
        assert_eq!(spans, vec![(0, 10), (10, 20), (20, 25)]);
    }

    #[test]
    fn starts_advance_by_stride_on_hard_cuts() {
        let d = doc(&"y".repeat(40));
        let chunks = chunk(&d, 10, 3).unwrap();
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].start_offset - pair[0].start_offset, 7);
            assert_eq!(pair[0].end_offset - pair[1].start_offset, 3);
        }
        assert_eq!(stitch(&chunks), d.text());
    }

    #[test]
    fn falls_back_to_word_boundary() {
        // No sentence punctuation anywhere
        let d = doc("alpha beta gamma delta epsilon zeta eta theta");
        let chunks = chunk(&d, 12, 0).unwrap();
        for c in &chunks[..chunks.len() - 1] {
            assert!(c.text.ends_with(' '), "chunk {:?} cut mid-word", c.text);
        }
        assert_eq!(stitch(&chunks), d.text());
    }

    #[test]
    fn prefers_paragraph_break() {
        let d = doc("First paragraph words\n\nSecond paragraph continues here");
        let chunks = Chunker::new(ChunkerConfig::new(26, 0).with_windows(10, 0))
            .unwrap()
            .chunk(&d)
            .unwrap();
        assert_eq!(chunks[0].text, "First paragraph words\n\n");
    }

    #[test]
    fn lookahead_extends_to_nearby_sentence_end() {
        let d = doc("The quick brown fox jumps. Over the lazy dog again and again");
        let chunks = Chunker::new(ChunkerConfig::new(24, 0).with_windows(0, 5))
            .unwrap()
            .chunk(&d)
            .unwrap();
        assert_eq!(chunks[0].text, "The quick brown fox jumps. ");
    }

    #[test]
    fn sentence_with_closing_quote() {
        let d = doc("He said \"stop.\" Then he left the room quietly.");
        let chunks = chunk(&d, 20, 0).unwrap();
        assert_eq!(chunks[0].text, "He said \"stop.\" ");
    }

    #[test]
    fn overlapping_chunks_share_exact_text() {
        let d = doc("One sentence here. Another sentence there. A third one follows. And a fourth.");
        let chunks = chunk(&d, 30, 8).unwrap();
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end_offset - pair[1].start_offset, 8);
            let tail: String = pair[0].text.chars().skip(pair[0].char_len() - 8).collect();
            let head: String = pair[1].text.chars().take(8).collect();
            assert_eq!(tail, head);
        }
        assert_eq!(stitch(&chunks), d.text());
    }

    #[test]
    fn unicode_offsets_are_characters() {
        let d = doc("Ünïcödé wörds. Mòre tëxt hérè. Ënd.");
        let chunks = chunk(&d, 15, 0).unwrap();
        for c in &chunks {
            assert_eq!(d.slice(c.start_offset, c.end_offset), Some(c.text.as_str()));
        }
        assert_eq!(stitch(&chunks), d.text());
    }

    #[test]
    fn chunking_is_deterministic() {
        let d = doc("Alpha. Beta gamma. Delta epsilon zeta. Eta theta iota kappa.");
        let a = chunk(&d, 16, 4).unwrap();
        let b = chunk(&d, 16, 4).unwrap();
        assert_eq!(a, b);
    }
}
