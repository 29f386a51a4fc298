//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` shape: no whitespace, exactly one `@`, a dot after it
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Check if an email address has a standard `local@domain` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check if an optional field carries a non-blank value
pub fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}
