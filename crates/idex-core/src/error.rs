//! Error types for the idex-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the idex library.
#[derive(Error, Debug)]
pub enum IdexError {
    /// Document loading or text acquisition error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading a source document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The source file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Text extraction failed for a single page.
    #[error("failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },

    /// No text source handles this kind of file.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for the idex library.
pub type Result<T> = std::result::Result<T, IdexError>;
