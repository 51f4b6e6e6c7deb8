//! Lexical relevance scoring.
//!
//! A chunk's score is the number of query-term occurrences in it, scaled by
//! the configured term weight and normalized by chunk length:
//!
//! ```text
//! score = term_weight * occurrences / max(chars / 100, 1)
//! ```
//!
//! For two chunks of equal length the denominator is identical, so more
//! occurrences can never produce a lower score.

use std::collections::BTreeSet;

use smartdoc_core::chunk::Chunk;
use smartdoc_core::error::AssemblyError;

/// Words ignored in queries unless the query contains nothing else.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "did", "do", "does", "for", "from",
    "how", "i", "in", "is", "it", "me", "of", "on", "or", "that", "the", "this", "to", "was",
    "were", "what", "when", "where", "which", "who", "why", "with",
];

/// Split text into lowercase alphanumeric terms.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// The distinct terms of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    terms: BTreeSet<String>,
}

impl QueryTerms {
    pub fn parse(query: &str) -> Self {
        let all: BTreeSet<String> = tokenize(query).collect();
        let content: BTreeSet<String> = all
            .iter()
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .cloned()
            .collect();
        Self {
            terms: if content.is_empty() { all } else { content },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Term-frequency scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermScorer {
    term_weight: f32,
}

impl TermScorer {
    pub fn new(term_weight: f32) -> Result<Self, AssemblyError> {
        if !term_weight.is_finite() || term_weight <= 0.0 {
            return Err(AssemblyError::InvalidConfiguration(format!(
                "term_weight must be a positive number, got {term_weight}"
            )));
        }
        Ok(Self { term_weight })
    }

    /// How many terms of `text` are query terms.
    pub fn occurrences(&self, terms: &QueryTerms, text: &str) -> usize {
        if terms.is_empty() {
            return 0;
        }
        tokenize(text).filter(|t| terms.contains(t)).count()
    }

    pub fn score(&self, terms: &QueryTerms, chunk: &Chunk) -> f32 {
        let occurrences = self.occurrences(terms, &chunk.text);
        let length_norm = (chunk.char_len() as f32 / 100.0).max(1.0);
        self.term_weight * occurrences as f32 / length_norm
    }
}

impl Default for TermScorer {
    fn default() -> Self {
        Self { term_weight: 1.0 }
    }
}
