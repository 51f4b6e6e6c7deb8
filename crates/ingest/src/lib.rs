//! Document ingestion for SmartDoc.
//!
//! Validates an upload against the [`UploadPolicy`], extracts its text
//! (UTF-8/Latin-1 for TXT, `pdf-extract` for PDF), normalizes it with
//! [`clean_text`], and hands back a [`Document`] ready for chunking.

pub mod format;
pub mod pdf;
pub mod text;

use std::path::Path;

use smartdoc_core::error::ExtractionError;
use smartdoc_core::{Document, DocumentId};

pub use format::{DEFAULT_MAX_FILE_SIZE, FileFormat, UploadPolicy};
pub use text::{MIN_CONTENT_CHARS, clean_text, decode_txt, is_too_short};

/// A successfully ingested upload.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub document: Document,
    /// Name the user uploaded the file under.
    pub file_name: String,
    pub format: FileFormat,
    /// Set when the text is below [`MIN_CONTENT_CHARS`].
    pub too_short: bool,
}

/// Turns uploaded files into cleaned [`Document`]s.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    policy: UploadPolicy,
}

impl DocumentExtractor {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Extract an in-memory upload.
    pub fn extract(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ExtractedDocument, ExtractionError> {
        let format = self.policy.validate_upload(file_name, bytes.len() as u64)?;

        let raw = match format {
            FileFormat::Txt => decode_txt(bytes),
            FileFormat::Pdf => pdf::extract_pdf(bytes)?,
        };

        let cleaned = clean_text(&raw);
        if cleaned.is_empty() {
            return Err(ExtractionError::NoReadableText);
        }

        let too_short = is_too_short(&cleaned);
        if too_short {
            tracing::warn!(
                file = %file_name,
                chars = cleaned.chars().count(),
                "document text is very short, analysis may be limited"
            );
        }

        let document = Document::new(DocumentId::new(), cleaned);
        tracing::info!(
            file = %file_name,
            format = %format,
            document_id = %document.id(),
            chars = document.char_len(),
            "ingested document"
        );

        Ok(ExtractedDocument {
            document,
            file_name: file_name.to_string(),
            format,
            too_short,
        })
    }

    /// Extract a file from disk.
    ///
    /// Name and size are checked from metadata before the file is read.
    pub fn extract_path(&self, path: &Path) -> Result<ExtractedDocument, ExtractionError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ExtractionError::UnsupportedFormat(path.display().to_string()))?;

        let size = std::fs::metadata(path)?.len();
        self.policy.validate_upload(file_name, size)?;

        let bytes = std::fs::read(path)?;
        self.extract(file_name, &bytes)
    }
}
