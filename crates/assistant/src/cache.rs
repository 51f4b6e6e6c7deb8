//! Memoized chunking per document.

use std::collections::HashMap;

use smartdoc_context::{Chunker, ChunkerConfig};
use smartdoc_core::{AssemblyError, Chunk, Document, DocumentId};

/// Caller-owned cache of chunk lists keyed by document and chunker config.
///
/// Chunking is deterministic, so a hit is always identical to
/// re-chunking. Nothing is shared between caches.
#[derive(Debug, Default)]
pub struct ChunkCache {
    entries: HashMap<(DocumentId, ChunkerConfig), Vec<Chunk>>,
    hits: u64,
    misses: u64,
}

impl ChunkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks for `document`, computing them on first use.
    pub fn get_or_chunk(
        &mut self,
        document: &Document,
        chunker: &Chunker,
    ) -> Result<&[Chunk], AssemblyError> {
        let key = (document.id().clone(), *chunker.config());
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let chunks = chunker.chunk(document)?;
            tracing::debug!(
                document_id = %document.id(),
                chunks = chunks.len(),
                "chunk cache miss"
            );
            self.entries.insert(key.clone(), chunks);
        }
        Ok(self.entries.get(&key).map(Vec::as_slice).unwrap_or_default())
    }

    /// Drop every entry for one document.
    pub fn invalidate(&mut self, id: &DocumentId) {
        self.entries.retain(|(doc, _), _| doc != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
