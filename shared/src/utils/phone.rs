//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of digits accepted for a phone number
pub const MIN_PHONE_DIGITS: usize = 10;

/// Maximum number of digits accepted for a phone number (E.164 limit)
pub const MAX_PHONE_DIGITS: usize = 15;

// Digits plus the usual formatting characters
static PHONE_CHARSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9\s\-().]+$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Count the digits of a phone number, ignoring formatting
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Check if a phone number is acceptable for registration
///
/// Accepts digits with optional leading `+` and formatting characters
/// (spaces, dashes, dots, parentheses), with 10 to 15 digits in total.
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    if !PHONE_CHARSET_REGEX.is_match(trimmed) {
        return false;
    }
    let digits = phone_digit_count(trimmed);
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Mask a phone number for logs (e.g., 555****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
