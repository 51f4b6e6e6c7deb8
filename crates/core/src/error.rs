//! Error types for the SmartDoc domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; `Error` wraps them all.

use thiserror::Error;

/// The top-level error type for all SmartDoc operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Chunking / selection ---
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    // --- Upload + text extraction ---
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    // --- User input ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Model provider ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of `chunk` and `select`. Both are local and non-retryable:
/// the caller must fix the configuration or the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Document {document_id} is empty")]
    EmptyDocument { document_id: String },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (maximum {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("No readable text found in the document")]
    NoReadableText,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a question")]
    EmptyQuestion,

    #[error("Question too short: at least {min} characters required")]
    QuestionTooShort { min: usize },

    #[error("Question too long: keep it under {max} characters")]
    QuestionTooLong { max: usize },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from provider")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn assembly_error_converts_into_top_level() {
        let err: Error = AssemblyError::InvalidConfiguration("chunk_size must be > 0".into()).into();
        assert!(matches!(err, Error::Assembly(_)));
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn every_subsystem_error_names_its_origin() {
        let cases: Vec<(Error, &str)> = vec![
            (AssemblyError::EmptyDocument { document_id: "d".into() }.into(), "Assembly"),
            (ExtractionError::NoReadableText.into(), "Extraction"),
            (ValidationError::EmptyQuestion.into(), "Validation"),
            (ProviderError::EmptyResponse.into(), "Provider"),
        ];
        for (err, prefix) in cases {
            match &err {
                Error::Assembly(_) | Error::Extraction(_) | Error::Validation(_) | Error::Provider(_) => {}
            }
            assert!(err.to_string().starts_with(prefix), "{err}");
        }
    }

    #[test]
    fn file_too_large_reports_sizes() {
        let err = ExtractionError::FileTooLarge {
            size: 20,
            max: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }
}
