//! Data models shared across the pipeline.

pub mod config;
pub mod extraction;

pub use config::{ExtractionConfig, IdexConfig, PdfConfig};
pub use extraction::{
    ExtractedField, ExtractionMetadata, ExtractionMethod, ExtractionOutcome, ExtractionResult,
    FieldReport, FieldType, round_confidence,
};
