//! Person name plausibility scoring.

use super::patterns::NAME_DISALLOWED_CHAR;
use super::{BASE_SCORE, finish};

/// Score how much `name` looks like a person name (0.0 - 1.0).
///
/// Starts at 0.5 and adds:
/// - 0.2 for two to four words
/// - 0.2 when every word starts with an uppercase letter
/// - 0.1 when only letters, whitespace, apostrophes and hyphens appear
pub fn validate_name(name: &str) -> f64 {
    if name.is_empty() {
        return 0.0;
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    let mut score = BASE_SCORE;

    if (2..=4).contains(&words.len()) {
        score += 0.2;
    }

    if words
        .iter()
        .all(|word| word.chars().next().is_some_and(char::is_uppercase))
    {
        score += 0.2;
    }

    if !NAME_DISALLOWED_CHAR.is_match(name) {
        score += 0.1;
    }

    finish(score)
}
