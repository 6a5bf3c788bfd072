//! Input masks and validators for the payment form fields.
//!
//! Masks run on every edit before the value is stored. Validators run when
//! the form is submitted.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s"));
static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| compile(r"[^0-9]"));
static DIGIT_QUAD: LazyLock<Regex> = LazyLock::new(|| compile(r"([0-9]{4})"));
static EXPIRY_GROUPS: LazyLock<Regex> = LazyLock::new(|| compile(r"([0-9]{2})([0-9]{0,2})"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static CARD_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{16}$"));
static EXPIRY: LazyLock<Regex> = LazyLock::new(|| compile(r"^([0-9]{2})/([0-9]{2})$"));
static CVC: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{3,4}$"));

/// Maximum length of a masked expiry (`MM/YY`).
const EXPIRY_LEN: usize = 5;

/// Maximum number of CVC digits.
const CVC_LEN: usize = 4;

/// Oldest accepted two-digit expiry year.
const MIN_EXPIRY_YEAR: u32 = 24;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid regex pattern")
}

/// Group card digits in fours: `4111111111111111` becomes
/// `4111 1111 1111 1111`.
#[must_use]
pub fn format_card_number(raw: &str) -> String {
    let compact = WHITESPACE.replace_all(raw, "");
    DIGIT_QUAD
        .replace_all(&compact, "${1} ")
        .trim()
        .to_string()
}

/// Keep digits only and shape them as `MM/YY`.
#[must_use]
pub fn format_expiry(raw: &str) -> String {
    let digits = NON_DIGIT.replace_all(raw, "");
    EXPIRY_GROUPS
        .replace(&digits, "${1}/${2}")
        .chars()
        .take(EXPIRY_LEN)
        .collect()
}

/// Keep at most four digits.
#[must_use]
pub fn format_cvc(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").chars().take(CVC_LEN).collect()
}

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Sixteen digits once whitespace is removed.
#[must_use]
pub fn is_valid_card_number(number: &str) -> bool {
    CARD_NUMBER.is_match(&WHITESPACE.replace_all(number, ""))
}

/// `MM/YY` with a month from 01 to 12 and a year of 24 or later.
#[must_use]
pub fn is_valid_expiry(expiry: &str) -> bool {
    let Some(caps) = EXPIRY.captures(expiry) else {
        return false;
    };
    let month: u32 = caps[1].parse().unwrap_or(0);
    let year: u32 = caps[2].parse().unwrap_or(0);
    (1..=12).contains(&month) && year >= MIN_EXPIRY_YEAR
}

/// Three or four digits.
#[must_use]
pub fn is_valid_cvc(cvc: &str) -> bool {
    CVC.is_match(cvc)
}
