//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, timeouts > 0)
//! - Check the API base URL is an http(s) URL
//! - Detect colliding storage keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ClientConfig;
use crate::security::validation::validate_url;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `rate_limit.window_ms`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !validate_url(&config.api.base_url) {
        errors.push(ValidationError::new(
            "api.base_url",
            format!("'{}' is not an http(s) URL", config.api.base_url),
        ));
    }
    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::new("api.timeout_secs", "must be greater than 0"));
    }

    let limits = &config.rate_limit;
    if limits.max_requests == 0 {
        errors.push(ValidationError::new("rate_limit.max_requests", "must be greater than 0"));
    }
    if limits.window_ms == 0 {
        errors.push(ValidationError::new("rate_limit.window_ms", "must be greater than 0"));
    }
    if limits.max_consecutive_failures == 0 {
        errors.push(ValidationError::new(
            "rate_limit.max_consecutive_failures",
            "must be greater than 0",
        ));
    }

    let storage = &config.storage;
    if storage.token_key.trim().is_empty() {
        errors.push(ValidationError::new("storage.token_key", "must not be empty"));
    }
    if storage.user_key.trim().is_empty() {
        errors.push(ValidationError::new("storage.user_key", "must not be empty"));
    }
    if !storage.token_key.is_empty() && storage.token_key == storage.user_key {
        errors.push(ValidationError::new(
            "storage.user_key",
            "must differ from storage.token_key",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
