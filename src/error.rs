//! Error types for the fallible edges of the client and CLI.
//!
//! Validators, the limiter and JWT inspection never produce these; they fail
//! closed with `false` or an invalid `ValidationResult` instead.

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by the API client and CLI.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client-side limiter refused the call.
    #[error("Request blocked by client rate limiter{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    /// Input was rejected before any request was made.
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    /// The call needs a stored, unexpired token.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Opening or reading the storage file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) if !d.is_zero() => format!(", retry in {}ms", d.as_millis()),
        _ => String::new(),
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, ClientError>;
