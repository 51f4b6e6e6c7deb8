//! Extractive pre-selection and post-truncation for summaries.

/// Words that mark a sentence as likely to carry a finding.
const IMPORTANT_WORDS: [&str; 7] = [
    "conclusion",
    "result",
    "finding",
    "important",
    "significant",
    "main",
    "key",
];

/// Sentences this short are ignored.
const MIN_SENTENCE_CHARS: usize = 20;

/// Pick up to `limit` sentences that look most informative.
///
/// Sentences are ranked by how many [`IMPORTANT_WORDS`] they mention, then
/// by length, both descending; equal sentences keep document order.
pub fn extract_key_sentences(text: &str, limit: usize) -> Vec<&str> {
    let mut scored: Vec<(usize, usize, &str)> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(|s| {
            let lower = s.to_lowercase();
            let hits = IMPORTANT_WORDS.iter().filter(|w| lower.contains(*w)).count();
            (hits, s.chars().count(), s)
        })
        .collect();

    scored.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
    scored.into_iter().take(limit).map(|(_, _, s)| s).collect()
}

/// Keep the first `max_words` words, appending `...` when anything was cut.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}...", words[..max_words].join(" "))
}
