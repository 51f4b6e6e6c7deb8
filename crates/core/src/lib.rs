//! # SmartDoc Core
//!
//! Domain types, traits, and error definitions for the SmartDoc document
//! assistant. This crate has **zero framework dependencies**; it defines
//! the domain model that the other crates implement against.
//!
//! ## Design Philosophy
//!
//! - Documents, chunks and context windows are plain values.
//! - The model provider is a trait here; implementations live outside.
//! - Session state is an explicit value the caller owns and passes in.

pub mod chunk;
pub mod document;
pub mod error;
pub mod message;
pub mod provider;
pub mod quiz;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use chunk::{Chunk, Citation, ContextWindow, ScoredChunk, SelectionStats};
pub use document::{Document, DocumentId};
pub use error::{AssemblyError, Error, ExtractionError, ProviderError, Result, ValidationError};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use quiz::{ChallengeQuestion, Evaluation, QuestionKind};
pub use session::{ChallengeState, ChatTurn, Session, SessionId};
