//! Identity field extraction: pattern tiers, validators and best-match selection.

mod matcher;
pub mod rules;

pub use matcher::{FieldMatcher, FieldSet, UNLABELED_FALLBACK_THRESHOLD};
pub use rules::{PatternRule, PatternTier, rules_for, validate};
