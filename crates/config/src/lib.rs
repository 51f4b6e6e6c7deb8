//! Configuration loading, validation, and management for SmartDoc.
//!
//! Loads configuration from `~/.smartdoc/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keys shorter than this are rejected by [`AppConfig::validate_api_key`].
pub const MIN_API_KEY_LEN: usize = 10;

/// The root configuration structure.
///
/// Maps directly to `~/.smartdoc/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model provider API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for answers, summaries and challenge questions
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for answers
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per model response
    #[serde(default = "default_max_response_tokens")]
    pub max_response_tokens: u32,

    /// How documents are split into chunks
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// How chunks are scored and packed into the context window
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Summary generation
    #[serde(default)]
    pub summary: SummaryConfig,
}

fn default_model() -> String {
    "gemini-1.5-flash".into()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_response_tokens() -> u32 {
    1000
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_response_tokens", &self.max_response_tokens)
            .field("chunking", &self.chunking)
            .field("retrieval", &self.retrieval)
            .field("upload", &self.upload)
            .field("summary", &self.summary)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub overlap: usize,

    /// How far back from the target end to look for a boundary.
    /// Defaults to half the chunk size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback: Option<usize>,

    /// How far past the target end to look for a boundary.
    /// Defaults to a tenth of the chunk size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead: Option<usize>,
}

fn default_chunk_size() -> usize {
    1500
}
fn default_chunk_overlap() -> usize {
    150
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_chunk_overlap(),
            lookback: None,
            lookahead: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Token budget for the assembled context window
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,

    /// Divisor for the character-based token estimate
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,

    /// Weight applied to each query-term occurrence
    #[serde(default = "default_term_weight")]
    pub term_weight: f32,

    /// Chunks scoring below this are never selected
    #[serde(default)]
    pub min_score: f32,

    /// Prior turns included in answer prompts
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
}

fn default_max_context_tokens() -> usize {
    2000
}
fn default_chars_per_token() -> usize {
    4
}
fn default_term_weight() -> f32 {
    1.0
}
fn default_history_turns() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_context_tokens: default_max_context_tokens(),
            chars_per_token: default_chars_per_token(),
            term_weight: default_term_weight(),
            min_score: 0.0,
            history_turns: default_history_turns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Accepted file extensions, lowercase, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}
fn default_allowed_extensions() -> Vec<String> {
    vec!["pdf".into(), "txt".into()]
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Key sentences fed into the summary prompt
    #[serde(default = "default_max_key_sentences")]
    pub max_key_sentences: usize,

    /// Word cap applied to the returned summary
    #[serde(default = "default_max_summary_words")]
    pub max_words: usize,
}

fn default_max_key_sentences() -> usize {
    8
}
fn default_max_summary_words() -> usize {
    150
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_key_sentences: default_max_key_sentences(),
            max_words: default_max_summary_words(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.smartdoc/config.toml).
    ///
    /// Also checks environment variables:
    /// - `SMARTDOC_API_KEY` (highest priority), then `GEMINI_API_KEY`
    /// - `SMARTDOC_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load from `path`, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("SMARTDOC_API_KEY")
                .ok()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("SMARTDOC_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".smartdoc")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.chunking.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "chunking.chunk_size must be > 0".into(),
            ));
        }

        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(ConfigError::ValidationError(
                "chunking.overlap must be smaller than chunking.chunk_size".into(),
            ));
        }

        if self.retrieval.max_context_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.max_context_tokens must be > 0".into(),
            ));
        }

        if self.retrieval.chars_per_token == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.chars_per_token must be > 0".into(),
            ));
        }

        if !self.retrieval.term_weight.is_finite() || self.retrieval.term_weight <= 0.0 {
            return Err(ConfigError::ValidationError(
                "retrieval.term_weight must be a positive number".into(),
            ));
        }

        if self.upload.max_file_size == 0 {
            return Err(ConfigError::ValidationError(
                "upload.max_file_size must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Check that the API key is present and plausibly well-formed.
    ///
    /// Kept apart from [`validate`](Self::validate): offline commands run
    /// without any key.
    pub fn validate_api_key(&self) -> Result<(), ConfigError> {
        let key = self.api_key.as_deref().map(str::trim).unwrap_or_default();
        if key.is_empty() {
            return Err(ConfigError::ValidationError("API key is required".into()));
        }
        if key.chars().count() < MIN_API_KEY_LEN {
            return Err(ConfigError::ValidationError(
                "API key appears to be invalid (too short)".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for `config --init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_response_tokens: default_max_response_tokens(),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            upload: UploadConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
