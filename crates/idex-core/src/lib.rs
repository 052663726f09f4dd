//! Core library for identity field extraction.
//!
//! This crate provides:
//! - Document text acquisition (PDF via lopdf, plain text)
//! - Labeled and unlabeled pattern tiers for name, phone and address fields
//! - Per-field plausibility validators and confidence scoring
//! - A per-document pipeline producing a structured, serializable result

pub mod document;
pub mod error;
pub mod fields;
pub mod models;
pub mod pipeline;

pub use document::{PdfExtractor, PdfSource, PlainTextSource, TextSource};
pub use error::{DocumentError, IdexError, Result};
pub use fields::{FieldMatcher, FieldSet, PatternTier, validate};
pub use models::{
    ExtractedField, ExtractionMethod, ExtractionOutcome, ExtractionResult, FieldReport,
    FieldType, IdexConfig,
};
pub use pipeline::{ExtractionPipeline, NO_TEXT_ERROR, confident_fields};
