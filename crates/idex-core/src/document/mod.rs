//! Document text acquisition.

mod pdf;
mod plain;

pub use pdf::{PdfExtractor, PdfPage, PdfSource};
pub use plain::PlainTextSource;

#[cfg(test)]
pub(crate) use pdf::test_support;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{DocumentError, Result};
use crate::models::PdfConfig;

/// Turns a document on disk into plain text.
pub trait TextSource {
    /// Full document text, pages joined with newlines.
    ///
    /// Returns `Ok(None)` when no text could be recovered. Errors are reserved for
    /// failures to read the file at all.
    fn extract_text(&self, path: &Path) -> Result<Option<String>>;
}

/// Marker every PDF file carries near its start.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// How far into a file the PDF marker may appear.
const PDF_MAGIC_WINDOW: usize = 1024;

/// Pick a text source from the file extension, falling back to the file header when the
/// extension is missing or unknown.
pub fn source_for(path: &Path, config: &PdfConfig) -> Result<Box<dyn TextSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfSource::new(config.clone()))),
        "txt" | "text" => Ok(Box::new(PlainTextSource)),
        _ if has_pdf_header(path) => {
            debug!("{} has a PDF header, reading it as PDF", path.display());
            Ok(Box::new(PdfSource::new(config.clone())))
        }
        _ => Err(DocumentError::UnsupportedFormat(extension).into()),
    }
}

/// Whether a PDF header appears in the first kilobyte. Unreadable files are not PDFs.
fn has_pdf_header(path: &Path) -> bool {
    let mut head = Vec::with_capacity(PDF_MAGIC_WINDOW);
    let read = File::open(path)
        .and_then(|file| file.take(PDF_MAGIC_WINDOW as u64).read_to_end(&mut head));
    if read.is_err() {
        return false;
    }

    head.windows(PDF_MAGIC.len()).any(|window| window == PDF_MAGIC)
}
