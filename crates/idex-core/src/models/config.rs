//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IdexError, Result};

/// Main configuration for the idex pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdexConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Try an empty password on encrypted PDFs before giving up.
    pub decrypt_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            decrypt_empty_password: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum rounded confidence a field needs for the document to count as extracted.
    pub min_confidence: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }
}

impl IdexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| IdexError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IdexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values outside their meaningful range.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.extraction.min_confidence;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(IdexError::Config(format!(
                "extraction.min_confidence must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(())
    }
}
