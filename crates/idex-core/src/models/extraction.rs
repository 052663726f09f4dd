//! Extraction data models: field types, per-field candidates and the document result.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identity field extracted from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Person name.
    Name,
    /// Phone number.
    Phone,
    /// Postal address.
    Address,
}

impl FieldType {
    /// All field types, in output order.
    pub const ALL: [FieldType; 3] = [FieldType::Name, FieldType::Phone, FieldType::Address];

    /// Lowercase key used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Name => "name",
            FieldType::Phone => "phone",
            FieldType::Address => "address",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pattern tier produced a field value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Nothing plausible was found.
    #[default]
    None,
    /// Value followed an explicit label such as `Phone:`.
    Labeled,
    /// Value was inferred from its shape alone.
    Unlabeled,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtractionMethod::None => "none",
            ExtractionMethod::Labeled => "labeled",
            ExtractionMethod::Unlabeled => "unlabeled",
        })
    }
}

/// Best candidate found for one field of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedField {
    /// Extracted value (empty when nothing was found).
    pub value: String,
    /// Combined confidence (0.0 - 1.0), unrounded.
    pub confidence: f64,
    /// Tier that produced the value.
    pub method: ExtractionMethod,
    /// Matched substrings backing the value.
    pub raw_matches: Vec<String>,
}

impl ExtractedField {
    /// The empty result: no value, zero confidence, method `none`.
    pub fn none() -> Self {
        Self {
            value: String::new(),
            confidence: 0.0,
            method: ExtractionMethod::None,
            raw_matches: Vec::new(),
        }
    }

    /// A found value. Confidence is clamped to [0, 1].
    pub fn new(value: impl Into<String>, confidence: f64, method: ExtractionMethod) -> Self {
        let value = value.into();
        Self {
            raw_matches: vec![value.clone()],
            value,
            confidence: confidence.clamp(0.0, 1.0),
            method,
        }
    }

    /// Whether nothing was found for this field.
    pub fn is_empty(&self) -> bool {
        self.method == ExtractionMethod::None
    }

    /// Confidence rounded to two decimals, as reported to callers.
    pub fn rounded_confidence(&self) -> f64 {
        round_confidence(self.confidence)
    }
}

impl Default for ExtractedField {
    fn default() -> Self {
        Self::none()
    }
}

/// Round a confidence to two decimals.
pub fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}

/// Reported form of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    /// Extracted value.
    pub value: String,
    /// Confidence rounded to two decimals.
    pub confidence: f64,
    /// Tier that produced the value.
    pub method: ExtractionMethod,
}

impl From<&ExtractedField> for FieldReport {
    fn from(field: &ExtractedField) -> Self {
        Self {
            value: field.value.clone(),
            confidence: field.rounded_confidence(),
            method: field.method,
        }
    }
}

/// Run metadata attached to every successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Local time the extraction finished.
    pub timestamp: NaiveDateTime,
    /// Base name of the source file.
    pub file_name: String,
    /// Size of the source file in bytes.
    pub file_size: u64,
    /// At least one field met the minimum confidence.
    pub extraction_successful: bool,
}

/// Structured fields extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub name: FieldReport,
    pub phone: FieldReport,
    pub address: FieldReport,
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Get the report for a field type.
    pub fn field(&self, field: FieldType) -> &FieldReport {
        match field {
            FieldType::Name => &self.name,
            FieldType::Phone => &self.phone,
            FieldType::Address => &self.address,
        }
    }

    /// Iterate over all field reports in output order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldType, &FieldReport)> {
        FieldType::ALL.into_iter().map(move |f| (f, self.field(f)))
    }
}

/// What the pipeline hands back for a document: a result, or an error message.
///
/// Serializes untagged, so a failure is exactly `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Success(ExtractionResult),
    Failure { error: String },
}

impl ExtractionOutcome {
    /// Build a failure outcome.
    pub fn failure(error: impl Into<String>) -> Self {
        ExtractionOutcome::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success(_))
    }

    /// The result, if extraction succeeded structurally.
    pub fn result(&self) -> Option<&ExtractionResult> {
        match self {
            ExtractionOutcome::Success(result) => Some(result),
            ExtractionOutcome::Failure { .. } => None,
        }
    }

    /// The error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Success(_) => None,
            ExtractionOutcome::Failure { error } => Some(error),
        }
    }
}
