//! Configuration - Fonts and Language
//!
//! Read from a JSON file. Every field has a default, and a missing file is
//! the same as an empty one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::print::Locale;
use crate::text::{default_font_dirs, FontBook};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories searched (recursively) for font files.
    #[serde(default = "default_font_dirs")]
    pub font_dirs: Vec<PathBuf>,
    /// Family used when a requested font is not installed.
    #[serde(default)]
    pub fallback_font: Option<String>,
    #[serde(default)]
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_dirs: default_font_dirs(),
            fallback_font: None,
            locale: Locale::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Indexes the configured font directories.
    pub fn font_book(&self) -> FontBook {
        FontBook::scan(&self.font_dirs, self.fallback_font.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphic.json");
        fs::write(&path, r#"{"locale": "it", "fallbackFont": "DejaVu Sans"}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.locale, Locale::It);
        assert_eq!(config.fallback_font.as_deref(), Some("DejaVu Sans"));
        assert_eq!(config.font_dirs, default_font_dirs());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphic.json");
        fs::write(&path, r#"{"locale": "klingon"}"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("graphic.json"));
    }

    #[test]
    fn test_font_book_from_empty_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            font_dirs: vec![dir.path().to_path_buf()],
            ..Config::default()
        };
        assert!(config.font_book().is_empty());
    }
}
