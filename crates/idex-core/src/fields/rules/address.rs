//! Postal address plausibility scoring.

use super::patterns::{ADDRESS_CITY_STATE, ADDRESS_DIGIT, ADDRESS_STATE_ZIP, ADDRESS_STREET_TYPE};
use super::{BASE_SCORE, finish};

/// Score how much `address` looks like a US-style postal address (0.0 - 1.0).
pub fn validate_address(address: &str) -> f64 {
    if address.is_empty() {
        return 0.0;
    }

    let mut score = BASE_SCORE;

    // Street number
    if ADDRESS_DIGIT.is_match(address) {
        score += 0.1;
    }

    if ADDRESS_STREET_TYPE.is_match(address) {
        score += 0.1;
    }

    if ADDRESS_STATE_ZIP.is_match(address) {
        score += 0.2;
    }

    if ADDRESS_CITY_STATE.is_match(address) {
        score += 0.1;
    }

    if (10..=200).contains(&address.chars().count()) {
        score += 0.1;
    }

    finish(score)
}
