//! PDF text extraction using lopdf.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, error, warn};

use super::TextSource;
use crate::error::{DocumentError, Result};
use crate::models::PdfConfig;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    config: PdfConfig,
}

/// Text from a single PDF page.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor with default settings.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create a new PDF extractor.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            config,
        }
    }

    /// Parse a PDF from bytes, decrypting with an empty password when allowed.
    pub fn load(&mut self, data: &[u8]) -> std::result::Result<(), DocumentError> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.config.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract text from a specific page.
    pub fn extract_page_text(&self, page: u32) -> std::result::Result<String, DocumentError> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| DocumentError::Parse("No document loaded".to_string()))?;

        doc.extract_text(&[page]).map_err(|e| DocumentError::Page {
            page,
            reason: e.to_string(),
        })
    }

    /// Extract every readable page, up to the configured page limit.
    ///
    /// A page that fails to extract is logged and left out.
    pub fn extract_pages(&self) -> Vec<PdfPage> {
        let doc = match self.document.as_ref() {
            Some(d) => d,
            None => return vec![],
        };

        let limit = match self.config.max_pages {
            0 => usize::MAX,
            n => n,
        };

        let numbers = doc.get_pages().into_keys().take(limit);
        collect_pages(numbers, |number| self.extract_page_text(number))
    }

    /// Text of all readable pages joined with newlines, or `None` when there is none.
    pub fn extract_text(&self) -> Option<String> {
        join_pages(self.extract_pages())
    }
}

fn collect_pages<F>(numbers: impl IntoIterator<Item = u32>, mut extract: F) -> Vec<PdfPage>
where
    F: FnMut(u32) -> std::result::Result<String, DocumentError>,
{
    let mut pages = Vec::new();
    for number in numbers {
        match extract(number) {
            Ok(text) if !text.is_empty() => {
                debug!("Extracted text from page {}", number);
                pages.push(PdfPage { number, text });
            }
            Ok(_) => debug!("Page {} has no text", number),
            Err(e) => error!("Error extracting text from page {}: {}", number, e),
        }
    }
    pages
}

fn join_pages(pages: Vec<PdfPage>) -> Option<String> {
    let text = pages
        .into_iter()
        .map(|page| page.text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        warn!("No text could be extracted from the PDF");
        return None;
    }
    Some(text)
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// [`TextSource`] for PDF files.
#[derive(Debug, Clone, Default)]
pub struct PdfSource {
    config: PdfConfig,
}

impl PdfSource {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }
}

impl TextSource for PdfSource {
    fn extract_text(&self, path: &Path) -> Result<Option<String>> {
        debug!("Processing PDF: {}", path.display());
        let data = std::fs::read(path)?;

        let mut extractor = PdfExtractor::with_config(self.config.clone());
        if let Err(e) = extractor.load(&data) {
            error!("Error in text extraction from {}: {}", path.display(), e);
            return Ok(None);
        }

        Ok(extractor.extract_text())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// Build a PDF with one page per entry, each showing its string on one line.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        build(pages, None)
    }

    /// Like [`build_pdf`], but page `broken` (0-indexed) uses a font whose text
    /// cannot be decoded, so extracting that page fails.
    pub(crate) fn build_pdf_with_broken_page(pages: &[&str], broken: usize) -> Vec<u8> {
        build(pages, Some(broken))
    }

    fn build(pages: &[&str], broken: Option<usize>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        // Identity-H needs a ToUnicode stream; an integer makes the font unreadable
        let broken_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "Courier",
            "Encoding" => "Identity-H",
            "ToUnicode" => 42,
        });
        let broken_resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => broken_font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for (index, text) in pages.iter().enumerate() {
            let operations = if text.is_empty() {
                vec![]
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let resources = if broken == Some(index) {
                broken_resources_id
            } else {
                resources_id
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{build_pdf, build_pdf_with_broken_page};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_pages().is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_extracts_pages_in_order() {
        let data = build_pdf(&["Name: John Smith", "Phone: 555-123-4567"]);
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        assert_eq!(extractor.page_count(), 2);

        let text = extractor.extract_text().unwrap();
        let name_at = text.find("John Smith").unwrap();
        let phone_at = text.find("555-123-4567").unwrap();
        assert!(name_at < phone_at);
    }

    #[test]
    fn test_page_limit() {
        let data = build_pdf(&["Name: John Smith", "Phone: 555-123-4567"]);
        let mut extractor = PdfExtractor::with_config(PdfConfig {
            max_pages: 1,
            ..PdfConfig::default()
        });
        extractor.load(&data).unwrap();

        let text = extractor.extract_text().unwrap();
        assert!(text.contains("John Smith"));
        assert!(!text.contains("555-123-4567"));
    }

    #[test]
    fn test_blank_pdf_has_no_text() {
        let data = build_pdf(&[""]);
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        assert_eq!(extractor.extract_text(), None);
    }

    #[test]
    fn test_source_treats_unparseable_pdf_as_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.5 truncated").unwrap();

        assert_eq!(PdfSource::default().extract_text(&path).unwrap(), None);
    }

    #[test]
    fn test_failing_page_is_skipped() {
        let data = build_pdf_with_broken_page(&["Name: John Smith", "Phone: 555-123-4567"], 1);
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        assert_eq!(extractor.page_count(), 2);
        assert!(extractor.extract_page_text(2).is_err());

        let pages = extractor.extract_pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);

        let text = extractor.extract_text().unwrap();
        assert!(text.contains("John Smith"));
        assert!(!text.contains("555-123-4567"));
    }

    #[test]
    fn test_collect_pages_keeps_pages_around_a_failure() {
        let pages = collect_pages([1, 2, 3], |number| match number {
            2 => Err(DocumentError::Page {
                page: 2,
                reason: "bad font".to_string(),
            }),
            n => Ok(format!("page {}", n)),
        });

        let numbers: Vec<u32> = pages.iter().map(|page| page.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(join_pages(pages), Some("page 1\npage 3".to_string()));
    }

    #[test]
    fn test_all_pages_failing_yields_no_text() {
        let pages = collect_pages([1, 2], |page| {
            Err(DocumentError::Page {
                page,
                reason: "unreadable".to_string(),
            })
        });
        assert!(pages.is_empty());
        assert_eq!(join_pages(pages), None);
    }
}
