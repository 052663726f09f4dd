//! Best-candidate selection across pattern tiers.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, trace, warn};

use super::rules::{PatternTier, rules_for, validate};
use crate::models::{ExtractedField, ExtractionMethod, FieldType};

/// Below this confidence after the labeled tier, unlabeled rules are consulted too.
pub const UNLABELED_FALLBACK_THRESHOLD: f64 = 0.6;

/// Best candidate for every field type of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    pub name: ExtractedField,
    pub phone: ExtractedField,
    pub address: ExtractedField,
}

impl FieldSet {
    pub fn get(&self, field: FieldType) -> &ExtractedField {
        match field {
            FieldType::Name => &self.name,
            FieldType::Phone => &self.phone,
            FieldType::Address => &self.address,
        }
    }

    fn set(&mut self, field: FieldType, value: ExtractedField) {
        match field {
            FieldType::Name => self.name = value,
            FieldType::Phone => self.phone = value,
            FieldType::Address => self.address = value,
        }
    }
}

/// Scans document text with the pattern tiers and keeps the best-scoring candidate.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatcher {
    fallback_threshold: f64,
}

impl FieldMatcher {
    /// Create a matcher with the default unlabeled fallback threshold.
    pub fn new() -> Self {
        Self {
            fallback_threshold: UNLABELED_FALLBACK_THRESHOLD,
        }
    }

    /// Set the confidence below which unlabeled rules are consulted.
    pub fn with_fallback_threshold(mut self, threshold: f64) -> Self {
        self.fallback_threshold = threshold;
        self
    }

    /// Best candidate for `field` in `text`, or [`ExtractedField::none`].
    ///
    /// Labeled rules are tried first. Unlabeled rules only run when the best labeled
    /// candidate scored below the fallback threshold, and they replace it only by
    /// scoring strictly higher.
    pub fn find_best(&self, field: FieldType, text: &str) -> ExtractedField {
        let mut best = ExtractedField::none();

        self.scan_tier(field, PatternTier::Labeled, text, &mut best);

        if best.confidence < self.fallback_threshold {
            trace!(
                "{}: labeled best {:.2} below {:.2}, trying unlabeled rules",
                field, best.confidence, self.fallback_threshold
            );
            self.scan_tier(field, PatternTier::Unlabeled, text, &mut best);
        }

        debug!(
            "{}: {:?} ({:.2}, {})",
            field, best.value, best.confidence, best.method
        );
        best
    }

    /// Best candidates for every field type.
    pub fn find_all(&self, text: &str) -> FieldSet {
        let mut fields = FieldSet::default();
        for field in FieldType::ALL {
            fields.set(field, self.find_best(field, text));
        }
        fields
    }

    fn scan_tier(
        &self,
        field: FieldType,
        tier: PatternTier,
        text: &str,
        best: &mut ExtractedField,
    ) {
        let method = match tier {
            PatternTier::Labeled => ExtractionMethod::Labeled,
            PatternTier::Unlabeled => ExtractionMethod::Unlabeled,
        };

        for rule in rules_for(field, tier) {
            for value in rule.candidates(text) {
                let confidence = (rule.base_confidence + plausibility(field, value)) / 2.0;

                if confidence > best.confidence {
                    trace!(
                        "{}: rule {} replaces best with {:?} ({:.2})",
                        field, rule.name, value, confidence
                    );
                    *best = ExtractedField::new(value, confidence, method);
                }
            }
        }
    }
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator score, with a panicking validator counted as 0.0.
fn plausibility(field: FieldType, value: &str) -> f64 {
    match catch_unwind(AssertUnwindSafe(|| validate(field, value))) {
        Ok(score) => score,
        Err(_) => {
            warn!("{} validator panicked on {:?}, scoring 0.0", field, value);
            0.0
        }
    }
}
