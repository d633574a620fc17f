use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::word::ExtractedWord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Controls which engine rows become words.
///
/// ```toml
/// min_confidence = 60.0
/// skip_empty_text = true
/// words_only = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Drop words below this confidence. Rows reporting a negative confidence
    /// are dropped whenever a threshold is set.
    pub min_confidence: Option<f64>,
    /// Drop words whose text is blank after trimming.
    pub skip_empty_text: bool,
    /// Keep only word-level rows when the source carries a `level` column.
    pub words_only: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            min_confidence: None,
            skip_empty_text: true,
            words_only: true,
        }
    }
}

impl ReaderConfig {
    /// Keep every row, blank and unconfident ones included.
    pub fn permissive() -> Self {
        Self {
            min_confidence: None,
            skip_empty_text: false,
            words_only: false,
        }
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn accepts(&self, word: &ExtractedWord) -> bool {
        if self.skip_empty_text && word.text().trim().is_empty() {
            return false;
        }
        match self.min_confidence {
            Some(min) => word.confidence() >= 0.0 && word.confidence() >= min,
            None => true,
        }
    }
}
