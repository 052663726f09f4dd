//! Phone number plausibility scoring.

use super::patterns::{PHONE_CANONICAL, PHONE_NON_DIGIT};
use super::{BASE_SCORE, finish};

/// Score how much `phone` looks like a North American phone number (0.0 - 1.0).
///
/// Starts at 0.5, adds 0.3 for exactly ten digits (or 0.2 for eleven digits with a
/// leading `1`), and 0.2 when the whole string has a canonical 3-3-4 shape.
pub fn validate_phone(phone: &str) -> f64 {
    if phone.is_empty() {
        return 0.0;
    }

    let digits = digits_only(phone);
    let digit_count = digits.chars().count();
    let mut score = BASE_SCORE;

    if digit_count == 10 {
        score += 0.3;
    } else if digit_count == 11 && digits.starts_with('1') {
        score += 0.2;
    }

    if PHONE_CANONICAL.is_match(phone) {
        score += 0.2;
    }

    finish(score)
}

/// Strip everything but decimal digits, in any script.
pub fn digits_only(phone: &str) -> String {
    PHONE_NON_DIGIT.replace_all(phone, "").into_owned()
}
