use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`Settings::temp_dir`]
pub const ENV_TEMP_DIR: &str = "PDFTOOL_TEMP_DIR";
/// Environment variable overriding [`Settings::max_file_size`]
pub const ENV_MAX_FILE_SIZE: &str = "PDFTOOL_MAX_FILE_SIZE";

/// File-handling configuration shared by every operation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Directory receiving outputs when an operation isn't given one
    pub temp_dir: PathBuf,
    /// Largest accepted source file, in bytes
    pub max_file_size: u64,
    /// Accepted source extensions, lowercase with leading dot
    pub allowed_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir().join("pdftool"),
            max_file_size: 100 * 1024 * 1024,
            allowed_extensions: vec![".pdf".to_string()],
        }
    }
}

impl Settings {
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Apply `PDFTOOL_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(ENV_TEMP_DIR) {
            self.temp_dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup(ENV_MAX_FILE_SIZE) {
            self.max_file_size = size.trim().parse().map_err(|_| {
                PdfToolError::validation(format!("{} must be a byte count, got '{}'", ENV_MAX_FILE_SIZE, size))
            })?;
        }
        Ok(self)
    }

    /// Whether `path` carries one of the allowed extensions
    pub fn is_allowed_extension(&self, path: &Path) -> bool {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!(".{}", ext.to_ascii_lowercase()),
            None => return false,
        };
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
    }

    /// Load settings from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let settings = serde_json::from_slice(&bytes)
            .map_err(|e| PdfToolError::validation(format!("Failed to parse settings: {}", e)))?;
        Ok(settings)
    }

    /// Save settings to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
