//! Pattern tiers and per-field plausibility validators.

pub mod address;
pub mod name;
pub mod patterns;
pub mod phone;

pub use address::validate_address;
pub use name::validate_name;
pub use patterns::{PatternRule, PatternTier, rules_for};
pub use phone::{digits_only, validate_phone};

use crate::models::FieldType;

/// Score every non-empty candidate starts from before shape bonuses.
const BASE_SCORE: f64 = 0.5;

fn finish(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// Plausibility of `candidate` as a value of `field` (0.0 - 1.0). Empty input scores 0.0.
pub fn validate(field: FieldType, candidate: &str) -> f64 {
    match field {
        FieldType::Name => validate_name(candidate),
        FieldType::Phone => validate_phone(candidate),
        FieldType::Address => validate_address(candidate),
    }
}
