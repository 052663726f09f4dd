//! Plain-text documents.

use std::path::Path;

use tracing::{debug, warn};

use super::TextSource;
use crate::error::Result;

/// Reads a UTF-8 text file as-is. Invalid sequences are replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, path: &Path) -> Result<Option<String>> {
        let data = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&data).into_owned();

        if text.trim().is_empty() {
            warn!("No text found in {}", path.display());
            return Ok(None);
        }

        debug!("Read {} characters from {}", text.len(), path.display());
        Ok(Some(text))
    }
}
