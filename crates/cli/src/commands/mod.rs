pub mod chunk;
pub mod config_cmd;
pub mod context;
pub mod prompt;

use std::path::Path;

use smartdoc_config::AppConfig;
use smartdoc_ingest::{DocumentExtractor, ExtractedDocument, UploadPolicy};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => AppConfig::load_with_env(p),
        None => AppConfig::load(),
    };
    Ok(config.map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Extract `file` under the configured upload policy.
pub fn load_document(
    config: &AppConfig,
    file: &Path,
) -> Result<ExtractedDocument, Box<dyn std::error::Error>> {
    let policy =
        UploadPolicy::from_extensions(config.upload.max_file_size, &config.upload.allowed_extensions);
    let extracted = DocumentExtractor::new(policy)
        .extract_path(file)
        .map_err(|e| format!("{}: {e}", file.display()))?;
    Ok(extracted)
}

/// First `max` characters of `text` on one line.
pub fn preview(text: &str, max: usize) -> String {
    let flat: String = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_flattens_and_cuts() {
        assert_eq!(preview("a\n\nb  c", 10), "a b c");
        assert_eq!(preview("abcdef", 3), "abc…");
    }
}
