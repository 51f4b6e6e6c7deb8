//! The Document value: extracted plain text of one upload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a document (one per upload).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable extracted text of an uploaded file.
///
/// Lengths and offsets are measured in characters (Unicode scalar values),
/// never bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: DocumentId,
    text: String,
    char_len: usize,
}

impl Document {
    pub fn new(id: DocumentId, text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { id, text, char_len }
    }

    /// Create a document with a freshly generated id.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(DocumentId::new(), text)
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// The text between two character offsets (end-exclusive).
    ///
    /// Returns `None` when the range is inverted or out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        if start > end || end > self.char_len {
            return None;
        }
        let byte_at = |pos: usize| {
            self.text
                .char_indices()
                .nth(pos)
                .map(|(b, _)| b)
                .unwrap_or(self.text.len())
        };
        Some(&self.text[byte_at(start)..byte_at(end)])
    }

    /// The first `max_chars` characters of the text.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((b, _)) => &self.text[..b],
            None => &self.text,
        }
    }
}
