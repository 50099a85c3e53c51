//! Field validators for user-supplied input.
//!
//! Validators are pure and never fail: bad input yields `false` or an
//! invalid [`ValidationResult`] carrying a human-readable message.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MIN_PHONE_LENGTH: usize = 8;
pub const MAX_PHONE_LENGTH: usize = 20;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("phone pattern compiles"));

static COUPON_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{4,32}$").expect("coupon pattern compiles"));

/// Outcome of a field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Only set when `is_valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

pub fn validate_email(email: &str) -> bool {
    email.chars().count() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(email)
}

pub fn validate_password(password: &str) -> ValidationResult {
    let length = password.chars().count();
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(format!(
            "Password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        ))
    }
}

/// Phone numbers are optional: `None` and `""` are valid.
///
/// Length is measured on the whitespace-stripped form, so `+`, `-` and
/// parentheses count towards it.
pub fn validate_phone(phone: Option<&str>) -> ValidationResult {
    let Some(phone) = phone.filter(|p| !p.is_empty()) else {
        return ValidationResult::valid();
    };

    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if !PHONE_PATTERN.is_match(&compact) {
        return ValidationResult::invalid(
            "Phone number may only contain digits, spaces, hyphens, parentheses and a leading +",
        );
    }

    let length = compact.chars().count();
    if !(MIN_PHONE_LENGTH..=MAX_PHONE_LENGTH).contains(&length) {
        return ValidationResult::invalid(format!(
            "Phone number must be between {MIN_PHONE_LENGTH} and {MAX_PHONE_LENGTH} characters"
        ));
    }

    ValidationResult::valid()
}

/// True for absolute `http` or `https` URLs.
pub fn validate_url(input: &str) -> bool {
    Url::parse(input)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn validate_required(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::invalid(format!("{field} is required"))
    } else {
        ValidationResult::valid()
    }
}

pub fn validate_coupon_code(code: &str) -> ValidationResult {
    if COUPON_PATTERN.is_match(code) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(
            "Coupon code must be 4-32 letters, digits, hyphens or underscores",
        )
    }
}

pub fn validate_quantity(quantity: u32, max_per_order: u32) -> ValidationResult {
    if quantity == 0 {
        ValidationResult::invalid("Quantity must be at least 1")
    } else if quantity > max_per_order {
        ValidationResult::invalid(format!("Quantity cannot exceed {max_per_order}"))
    } else {
        ValidationResult::valid()
    }
}
