use smartdoc_core::error::ExtractionError;

/// Extract text from PDF bytes.
///
/// Pages are separated by form feeds in pdf-extract's output; each page
/// becomes its own paragraph so chunk boundaries can snap to page breaks.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages: Vec<&str> = raw
        .split('\x0C')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    tracing::debug!(pages = pages.len(), "extracted PDF text");
    Ok(pages.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = extract_pdf(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
