//! Upload validation: accepted formats and size limits.

use smartdoc_core::error::ExtractionError;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Pdf,
    Txt,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of `file_name`, without the dot.
fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Which uploads are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    pub allowed: Vec<FileFormat>,
}

impl UploadPolicy {
    /// Build a policy from configured extension strings.
    ///
    /// Extensions SmartDoc cannot extract are ignored with a warning.
    pub fn from_extensions(max_file_size: u64, extensions: &[String]) -> Self {
        let mut allowed = Vec::new();
        for ext in extensions {
            match FileFormat::from_extension(ext) {
                Some(format) if !allowed.contains(&format) => allowed.push(format),
                Some(_) => {}
                None => tracing::warn!(extension = %ext, "ignoring unsupported upload extension"),
            }
        }
        Self {
            max_file_size,
            allowed,
        }
    }

    /// Check name and size of an upload, returning its format.
    pub fn validate_upload(&self, file_name: &str, size: u64) -> Result<FileFormat, ExtractionError> {
        let format = extension_of(file_name)
            .and_then(|ext| FileFormat::from_extension(&ext))
            .filter(|f| self.allowed.contains(f))
            .ok_or_else(|| {
                ExtractionError::UnsupportedFormat(format!(
                    "'{}'. Please upload {} files",
                    file_name,
                    self.allowed_list()
                ))
            })?;

        if size > self.max_file_size {
            return Err(ExtractionError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(format)
    }

    fn allowed_list(&self) -> String {
        self.allowed
            .iter()
            .map(|f| format!(".{f}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed: vec![FileFormat::Pdf, FileFormat::Txt],
        }
    }
}
