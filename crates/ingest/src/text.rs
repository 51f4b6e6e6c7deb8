//! Plain-text decoding and normalization.

/// Below this many characters a document is accepted but flagged.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Punctuation kept by [`clean_text`].
const KEPT_PUNCTUATION: &str = ".,!?;:-()'";

/// Decode TXT bytes: UTF-8 first, Latin-1 as the fallback.
pub fn decode_txt(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.trim_start_matches('\u{feff}').to_string(),
        Err(_) => {
            tracing::debug!("TXT upload is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Normalize extracted text.
///
/// - runs of whitespace containing two or more line breaks become a
///   paragraph break (`\n\n`); any other run becomes one space
/// - leading and trailing whitespace is removed
/// - characters other than letters, digits, `_`, whitespace and
///   `. , ! ? ; : - ( ) '` are dropped
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    let mut newlines = 0;

    for c in text.chars() {
        if c.is_whitespace() {
            in_whitespace = true;
            if c == '\n' {
                newlines += 1;
            }
            continue;
        }
        if !(c.is_alphanumeric() || c == '_' || KEPT_PUNCTUATION.contains(c)) {
            continue;
        }
        if in_whitespace && !out.is_empty() {
            out.push_str(if newlines >= 2 { "\n\n" } else { " " });
        }
        in_whitespace = false;
        newlines = 0;
        out.push(c);
    }

    out
}

/// Whether `text` is too short for meaningful analysis.
pub fn is_too_short(text: &str) -> bool {
    text.trim().chars().count() < MIN_CONTENT_CHARS
}
