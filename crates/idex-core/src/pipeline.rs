//! Per-document extraction pipeline: acquire text, match every field, report.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info};

use crate::document::{TextSource, source_for};
use crate::error::{DocumentError, IdexError, Result};
use crate::fields::FieldMatcher;
use crate::models::{
    ExtractionMetadata, ExtractionOutcome, ExtractionResult, FieldReport, FieldType, IdexConfig,
};

/// Error reported when a document yields no usable text.
pub const NO_TEXT_ERROR: &str = "Could not extract text from PDF";

/// Runs text acquisition and field matching for one document at a time.
pub struct ExtractionPipeline {
    config: IdexConfig,
    matcher: FieldMatcher,
    source: Option<Box<dyn TextSource>>,
    clock: fn() -> NaiveDateTime,
}

impl ExtractionPipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::with_config(IdexConfig::default())
    }

    /// Create a pipeline from a configuration.
    pub fn with_config(config: IdexConfig) -> Self {
        Self {
            config,
            matcher: FieldMatcher::new(),
            source: None,
            clock: local_now,
        }
    }

    /// Use `source` for every document instead of choosing one by file extension.
    pub fn with_source(mut self, source: Box<dyn TextSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the clock used for metadata timestamps.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Configured minimum confidence for a successful extraction.
    pub fn min_confidence(&self) -> f64 {
        self.config.extraction.min_confidence
    }

    /// Process a document with the configured minimum confidence.
    pub fn process(&self, path: &Path) -> ExtractionOutcome {
        self.process_with(path, self.min_confidence())
    }

    /// Process a document. Never fails: every error becomes a failure outcome.
    pub fn process_with(&self, path: &Path, min_confidence: f64) -> ExtractionOutcome {
        info!("Processing document: {}", path.display());

        match catch_unwind(AssertUnwindSafe(|| self.try_process(path, min_confidence))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!("Error processing {}: {:?}", path.display(), e);
                ExtractionOutcome::failure(failure_message(&e))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Panic while processing {}: {}", path.display(), message);
                ExtractionOutcome::failure(message)
            }
        }
    }

    /// Match every field in already-acquired text and assemble the result.
    pub fn process_text(
        &self,
        text: &str,
        file_name: impl Into<String>,
        file_size: u64,
        min_confidence: f64,
    ) -> ExtractionResult {
        debug!("Matching fields in {} characters of text", text.len());
        let fields = self.matcher.find_all(text);

        let name = FieldReport::from(&fields.name);
        let phone = FieldReport::from(&fields.phone);
        let address = FieldReport::from(&fields.address);

        let mut result = ExtractionResult {
            name,
            phone,
            address,
            metadata: ExtractionMetadata {
                timestamp: (self.clock)(),
                file_name: file_name.into(),
                file_size,
                extraction_successful: false,
            },
        };
        result.metadata.extraction_successful =
            !confident_fields(&result, min_confidence).is_empty();

        info!("Extraction completed with results:");
        for (field, report) in result.fields() {
            info!("{}: {} (confidence: {})", field, report.value, report.confidence);
        }

        result
    }

    fn try_process(&self, path: &Path, min_confidence: f64) -> Result<ExtractionOutcome> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()).into());
        }

        let default_source;
        let source: &dyn TextSource = match &self.source {
            Some(source) => source.as_ref(),
            None => {
                default_source = source_for(path, &self.config.pdf)?;
                default_source.as_ref()
            }
        };

        let text = match source.extract_text(path)? {
            Some(text) => text,
            None => {
                error!("No text could be extracted from {}", path.display());
                return Ok(ExtractionOutcome::failure(NO_TEXT_ERROR));
            }
        };

        let file_size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(ExtractionOutcome::Success(self.process_text(
            &text,
            file_name,
            file_size,
            min_confidence,
        )))
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Field types whose rounded confidence meets `min_confidence`.
pub fn confident_fields(result: &ExtractionResult, min_confidence: f64) -> Vec<FieldType> {
    result
        .fields()
        .filter(|(_, report)| report.confidence >= min_confidence)
        .map(|(field, _)| field)
        .collect()
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn failure_message(error: &IdexError) -> String {
    match error {
        IdexError::Document(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected internal failure".to_string()
    }
}
