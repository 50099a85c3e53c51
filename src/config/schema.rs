//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the ticketing client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Remote API settings.
    pub api: ApiConfig,

    /// Client-side request limiter settings.
    pub rate_limit: RateLimitConfig,

    /// Persistent key-value storage settings.
    pub storage: StorageConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against (e.g., "https://api.example.com/v1").
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            user_agent: concat!("ticketing-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client-side rate limiting configuration.
///
/// Immutable once a limiter has been built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests inside one sliding window.
    pub max_requests: u32,

    /// Sliding window length in milliseconds.
    pub window_ms: u64,

    /// Consecutive failures after which every request is refused.
    pub max_consecutive_failures: u32,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_ms: u64, max_consecutive_failures: u32) -> Self {
        Self {
            max_requests,
            window_ms,
            max_consecutive_failures,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_ms: 60_000,
            max_consecutive_failures: 5,
        }
    }
}

/// Persistent storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON file backing the CLI's key-value store.
    pub path: String,

    /// Key holding the bearer token.
    pub token_key: String,

    /// Key holding the serialized user profile.
    pub user_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "ticketing-storage.json".to_string(),
            token_key: "auth_token".to_string(),
            user_key: "user".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs without ANSI colours or targets (for piping into files).
    pub plain_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            plain_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://tickets.example.com/api"

            [rate_limit]
            max_requests = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://tickets.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.storage.token_key, "auth_token");
        assert_eq!(config.observability.log_level, "info");
    }
}
