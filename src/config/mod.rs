//! User configuration loaded from a TOML file
//!
//! Everything here is an explicit value handed to the components that need
//! it (the thumbnail builder receives its cache directory at construction);
//! there is no process-wide mutable state. CLI flags override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BatchCutError, BatchCutResult};

/// Batch processing defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory batch outputs are written to
    pub output_directory: PathBuf,
    /// Directory thumbnail images are cached in
    pub thumbnail_directory: PathBuf,
    /// Default video codec for compression
    pub codec: Option<String>,
    /// Default target frame rate for compression
    pub frame_rate: Option<f64>,
    /// Strip audio streams by default
    pub audio_disabled: bool,
    /// Concurrent engine processes; defaults to the logical CPU count
    pub jobs: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            thumbnail_directory: std::env::temp_dir().join("batchcut").join("thumbnails"),
            codec: None,
            frame_rate: None,
            audio_disabled: false,
            jobs: None,
        }
    }
}

impl BatchConfig {
    /// Load configuration from `path` when given, else from the default
    /// location, else fall back to built-in defaults.
    pub fn load(path: Option<&Path>) -> BatchCutResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    debug!("no configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> BatchCutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BatchCutError::ConfigError {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        toml::from_str(&content).map_err(|e| BatchCutError::ConfigError {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Default configuration file location
    pub fn default_config_path() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("batchcut")
                .join("config.toml")
        } else {
            PathBuf::from("batchcut.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.output_directory, PathBuf::from("."));
        assert!(config.codec.is_none());
        assert!(!config.audio_disabled);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
output_directory = "/media/out"
codec = "libx265"
frame_rate = 24.0
audio_disabled = true
jobs = 2
"#,
        )
        .unwrap();

        let config = BatchConfig::from_file(&path).unwrap();
        assert_eq!(config.output_directory, PathBuf::from("/media/out"));
        assert_eq!(config.codec.as_deref(), Some("libx265"));
        assert_eq!(config.frame_rate, Some(24.0));
        assert!(config.audio_disabled);
        assert_eq!(config.jobs, Some(2));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "codec = \"libx264\"\n").unwrap();

        let config = BatchConfig::from_file(&path).unwrap();
        assert_eq!(config.codec.as_deref(), Some("libx264"));
        assert_eq!(config.output_directory, PathBuf::from("."));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = BatchConfig::load(Some(Path::new("/no/such/config.toml"))).unwrap_err();
        assert!(matches!(err, BatchCutError::ConfigError { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid toml [").unwrap();
        assert!(BatchConfig::from_file(&path).is_err());
    }
}
