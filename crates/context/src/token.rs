//! Token estimation utilities.
//!
//! Uses a character-based heuristic: ~4 characters per token by default.
//! This approximation is accurate within ~10% for BPE tokenizers on
//! English text. The divisor is configurable.

use smartdoc_core::error::AssemblyError;

/// Default characters per token.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count for a string with the default divisor.
///
/// Heuristic: 1 token ≈ 4 characters. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    TokenEstimator::default().estimate(text)
}

/// Character-count based token estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEstimator {
    chars_per_token: usize,
}

impl TokenEstimator {
    pub fn new(chars_per_token: usize) -> Result<Self, AssemblyError> {
        if chars_per_token == 0 {
            return Err(AssemblyError::InvalidConfiguration(
                "chars_per_token must be > 0".into(),
            ));
        }
        Ok(Self { chars_per_token })
    }

    pub fn chars_per_token(&self) -> usize {
        self.chars_per_token
    }

    /// Tokens for `text`, rounded up. Empty text costs nothing.
    pub fn estimate(&self, text: &str) -> usize {
        self.estimate_chars(text.chars().count())
    }

    /// Tokens for a span of `chars` characters, rounded up.
    pub fn estimate_chars(&self, chars: usize) -> usize {
        chars.div_ceil(self.chars_per_token)
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn four_chars_is_one_token() {
        assert_eq!(estimate_tokens("test"), 1);
    }

    #[test]
    fn five_chars_rounds_up() {
        assert_eq!(estimate_tokens("hello"), 2);
    }

    #[test]
    fn hundred_chars() {
        let text = "a".repeat(100);
        assert_eq!(estimate_tokens(&text), 25);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert_eq!(estimate_tokens("éééé"), 1);
    }

    #[test]
    fn custom_divisor() {
        let est = TokenEstimator::new(3).unwrap();
        assert_eq!(est.estimate("abcdefg"), 3);
        assert_eq!(est.chars_per_token(), 3);
    }

    #[test]
    fn zero_divisor_rejected() {
        assert!(matches!(
            TokenEstimator::new(0),
            Err(AssemblyError::InvalidConfiguration(_))
        ));
    }
}
