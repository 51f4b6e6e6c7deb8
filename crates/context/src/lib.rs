//! Chunked context assembly.
//!
//! Turns extracted document text into retrievable chunks and, per query,
//! assembles a token-budgeted context window with citations.
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Chunk | [`chunker`] | `Vec<Chunk>` covering the document |
//! | Score | [`scoring`] | term-frequency relevance per chunk |
//! | Budget | [`token`] | character-based token estimates |
//! | Select | [`assembler`] | `ContextWindow` + citations |
//!
//! Everything here is synchronous, performs no I/O, and holds no shared
//! state; every call is a pure function of its inputs.

pub mod assembler;
pub mod chunker;
pub mod scoring;
pub mod token;

pub use assembler::{ContextAssembler, SelectionConfig, select};
pub use chunker::{Chunker, ChunkerConfig, chunk};
pub use scoring::{QueryTerms, TermScorer};
pub use token::{TokenEstimator, estimate_tokens};
