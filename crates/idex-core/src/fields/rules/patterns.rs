//! Pattern registry: labeled and unlabeled matching rules per field, plus the
//! shape patterns the validators check.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::models::FieldType;

/// Matching tier a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTier {
    /// An explicit label precedes the value; the value is capture group 1.
    Labeled,
    /// The value is recognized by shape alone; the value is the whole match.
    Unlabeled,
}

/// A compiled pattern paired with the trust placed in its matches.
#[derive(Debug)]
pub struct PatternRule {
    /// Short identifier used in logs.
    pub name: &'static str,
    pub tier: PatternTier,
    pub regex: Regex,
    /// Base confidence (0.0 - 1.0) of a match from this rule.
    pub base_confidence: f64,
}

impl PatternRule {
    /// Compile a built-in rule. Patterns are matched case-insensitively, line by line.
    fn new(name: &'static str, tier: PatternTier, pattern: &str, base_confidence: f64) -> Self {
        let regex = Regex::new(&format!("(?im){}", pattern))
            .unwrap_or_else(|e| panic!("invalid built-in pattern {}: {}", name, e));
        Self {
            name,
            tier,
            regex,
            base_confidence,
        }
    }

    fn labeled(name: &'static str, pattern: &str, base_confidence: f64) -> Self {
        Self::new(name, PatternTier::Labeled, pattern, base_confidence)
    }

    fn unlabeled(name: &'static str, pattern: &str, base_confidence: f64) -> Self {
        Self::new(name, PatternTier::Unlabeled, pattern, base_confidence)
    }

    /// Trimmed candidate values in match order. Empty captures are skipped.
    pub fn candidates<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = &'t str> + 'r
    where
        't: 'r,
    {
        self.regex
            .captures_iter(text)
            .filter_map(move |caps| self.value_of(&caps))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn value_of<'t>(&self, caps: &Captures<'t>) -> Option<&'t str> {
        let group = match self.tier {
            PatternTier::Labeled => 1,
            PatternTier::Unlabeled => 0,
        };
        caps.get(group).map(|m| m.as_str())
    }
}

const STREET_TYPES: &str = "(?:Avenue|Lane|Road|Boulevard|Drive|Street|Ave|Ln|Rd|Blvd|Dr|St)";

lazy_static! {
    // Name rules
    static ref NAME_LABELED: Vec<PatternRule> = vec![
        PatternRule::labeled("name", r"Name\s*:\s*([^\n]+)", 0.9),
        PatternRule::labeled("full_name", r"Full Name\s*:\s*([^\n]+)", 0.9),
        PatternRule::labeled("customer_name", r"Customer Name\s*:\s*([^\n]+)", 0.8),
        PatternRule::labeled("client_name", r"Client Name\s*:\s*([^\n]+)", 0.8),
        PatternRule::labeled(
            "first_last_name",
            r"First Name\s*:\s*([^\n]+)(?:\s+Last Name\s*:\s*([^\n]+))?",
            0.7,
        ),
    ];

    static ref NAME_UNLABELED: Vec<PatternRule> = vec![
        PatternRule::unlabeled("capitalized_words", r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}\b", 0.4),
    ];

    // Phone rules
    static ref PHONE_LABELED: Vec<PatternRule> = vec![
        PatternRule::labeled("phone", r"Phone\s*:\s*([+\d\s()\-]+)", 0.9),
        PatternRule::labeled("contact", r"Contact\s*:\s*([+\d\s()\-]+)", 0.8),
        PatternRule::labeled("telephone", r"Tel(?:ephone)?\s*:\s*([+\d\s()\-]+)", 0.8),
        PatternRule::labeled("mobile", r"Mobile\s*:\s*([+\d\s()\-]+)", 0.8),
        PatternRule::labeled("phone_number", r"Phone Number\s*:\s*([+\d\s()\-]+)", 0.9),
    ];

    static ref PHONE_UNLABELED: Vec<PatternRule> = vec![
        PatternRule::unlabeled(
            "north_american",
            r"\b(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
            0.6,
        ),
        PatternRule::unlabeled("digit_groups", r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b", 0.5),
    ];

    // Address rules. A value ends at a following `Role:` label or at the end of the line.
    static ref ADDRESS_LABELED: Vec<PatternRule> = vec![
        PatternRule::labeled("address", r"Address\s*:\s*([^\n]+?)(?:\s*Role\s*:|$)", 0.9),
        PatternRule::labeled("location", r"Location\s*:\s*([^\n]+?)(?:\s*Role\s*:|$)", 0.8),
        PatternRule::labeled("residence", r"Residence\s*:\s*([^\n]+?)(?:\s*Role\s*:|$)", 0.8),
        PatternRule::labeled(
            "mailing_address",
            r"Mailing Address\s*:\s*([^\n]+?)(?:\s*Role\s*:|$)",
            0.9,
        ),
    ];

    static ref ADDRESS_UNLABELED: Vec<PatternRule> = vec![
        PatternRule::unlabeled(
            "street_city_state_zip",
            &format!(
                r"\b\d+\s+[A-Za-z0-9\s,.\-]+{}\.?\s*,\s*[A-Za-z\s]+,\s*[A-Z]{{2}}\s+\d{{5}}\b",
                STREET_TYPES
            ),
            0.7,
        ),
        PatternRule::unlabeled(
            "street",
            &format!(r"\b\d+\s+[A-Za-z0-9\s,.\-]+{}\.?", STREET_TYPES),
            0.5,
        ),
    ];

    // Validator shape checks (case-sensitive unless marked)
    pub static ref NAME_DISALLOWED_CHAR: Regex = Regex::new(r"[^A-Za-z\s'\-]").unwrap();

    pub static ref PHONE_CANONICAL: Regex = Regex::new(
        r"^\+?1?\s*\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$"
    ).unwrap();

    pub static ref PHONE_NON_DIGIT: Regex = Regex::new(r"\D").unwrap();

    pub static ref ADDRESS_DIGIT: Regex = Regex::new(r"\d+").unwrap();

    pub static ref ADDRESS_STREET_TYPE: Regex = Regex::new(
        r"(?i)(Street|Road|Avenue|Lane|Drive|Boulevard|St|Rd|Ave|Ln|Dr|Blvd)\b"
    ).unwrap();

    pub static ref ADDRESS_STATE_ZIP: Regex = Regex::new(r"\b[A-Z]{2}\s+\d{5}\b").unwrap();

    pub static ref ADDRESS_CITY_STATE: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2}\b"
    ).unwrap();
}

/// Rules for a field and tier, in declaration order.
pub fn rules_for(field: FieldType, tier: PatternTier) -> &'static [PatternRule] {
    match (field, tier) {
        (FieldType::Name, PatternTier::Labeled) => NAME_LABELED.as_slice(),
        (FieldType::Name, PatternTier::Unlabeled) => NAME_UNLABELED.as_slice(),
        (FieldType::Phone, PatternTier::Labeled) => PHONE_LABELED.as_slice(),
        (FieldType::Phone, PatternTier::Unlabeled) => PHONE_UNLABELED.as_slice(),
        (FieldType::Address, PatternTier::Labeled) => ADDRESS_LABELED.as_slice(),
        (FieldType::Address, PatternTier::Unlabeled) => ADDRESS_UNLABELED.as_slice(),
    }
}
