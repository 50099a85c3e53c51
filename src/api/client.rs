//! HTTP client shared by every API call.
//!
//! # Request Path
//! ```text
//! call site
//!     → limiter.can_make_request()   (refuse with RateLimited)
//!     → limiter.record_request()
//!     → Authorization: Bearer <stored token>
//!     → reqwest send
//!     → 2xx with a decodable body: record_success
//!     → otherwise (transport error, non-2xx, bad body): record_failure
//! ```

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::TokenStore;
use crate::clock::{Clock, SystemClock};
use crate::config::{ApiConfig, RateLimitConfig};
use crate::error::{ClientError, Result};
use crate::observability::metrics;
use crate::security::rate_limit::ClientRateLimiter;
use crate::security::validation::ValidationResult;
use crate::storage::KeyValueStore;

/// Client for the ticketing REST API.
pub struct ApiClient<S: KeyValueStore, C: Clock + Clone = SystemClock> {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore<S, C>,
    limiter: Mutex<ClientRateLimiter<C>>,
}

impl<S: KeyValueStore> ApiClient<S, SystemClock> {
    pub fn new(api: &ApiConfig, limits: RateLimitConfig, tokens: TokenStore<S>) -> Result<Self> {
        Self::with_clock(api, limits, tokens, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock + Clone> ApiClient<S, C> {
    /// Build a client whose limiter and token checks run on `clock`.
    pub fn with_clock(
        api: &ApiConfig,
        limits: RateLimitConfig,
        tokens: TokenStore<S, C>,
        clock: C,
    ) -> Result<Self> {
        let parsed = Url::parse(&api.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidInput {
                field: "api.base_url",
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(api.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            tokens,
            limiter: Mutex::new(ClientRateLimiter::with_clock(limits, clock)),
        })
    }

    pub fn tokens(&self) -> &TokenStore<S, C> {
        &self.tokens
    }

    fn limiter(&self) -> MutexGuard<'_, ClientRateLimiter<C>> {
        self.limiter.lock().expect("rate limiter mutex poisoned")
    }

    /// Requests the limiter would still allow right now.
    pub fn remaining_requests(&self) -> u32 {
        self.limiter().remaining()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.limiter().consecutive_failures()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    pub(crate) fn require_auth(&self) -> Result<()> {
        if self.tokens.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Unauthenticated)
        }
    }

    /// Ask the limiter for permission and, if granted, count the request.
    fn acquire(&self, endpoint: &'static str) -> Result<()> {
        let mut limiter = self.limiter();
        if !limiter.can_make_request() {
            tracing::warn!(endpoint, "Request refused by client rate limiter");
            return Err(ClientError::RateLimited {
                retry_after: limiter.retry_after(),
            });
        }
        limiter.record_request();
        Ok(())
    }

    /// Send a request through the limiter. Transport errors and non-2xx
    /// statuses are recorded as failures; success is left to the caller.
    async fn dispatch(&self, endpoint: &'static str, request: RequestBuilder) -> Result<Response> {
        self.acquire(endpoint)?;

        let request = match self.tokens.get_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.record_failure(endpoint, "error");
                tracing::warn!(endpoint, error = %e, "API request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::debug!(endpoint, status = status.as_u16(), "API request succeeded");
            return Ok(response);
        }

        self.record_failure(endpoint, "failure");
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(endpoint, status = status.as_u16(), "API returned error status");
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    fn record_success(&self, endpoint: &'static str) {
        self.limiter().record_success();
        metrics::record_api_request(endpoint, "success");
    }

    fn record_failure(&self, endpoint: &'static str, outcome: &'static str) {
        self.limiter().record_failure();
        metrics::record_api_request(endpoint, outcome);
    }

    /// Send a request whose response body is not needed.
    pub(crate) async fn execute(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response> {
        let response = self.dispatch(endpoint, request).await?;
        self.record_success(endpoint);
        Ok(response)
    }

    /// Send a request and decode its JSON body.
    ///
    /// A 2xx whose body is unreadable or does not decode counts as a failure.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.dispatch(endpoint, request).await?;
        let decoded: Result<T> = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(ClientError::from),
            Err(e) => Err(ClientError::from(e)),
        };

        match decoded {
            Ok(value) => {
                self.record_success(endpoint);
                Ok(value)
            }
            Err(e) => {
                self.record_failure(endpoint, "invalid_body");
                tracing::warn!(endpoint, error = %e, "API response body could not be decoded");
                Err(e)
            }
        }
    }
}

/// Turn an invalid [`ValidationResult`] into [`ClientError::InvalidInput`].
pub(crate) fn ensure_valid(field: &'static str, result: ValidationResult) -> Result<()> {
    if result.is_valid {
        return Ok(());
    }
    metrics::record_validation_failure(field);
    Err(ClientError::InvalidInput {
        field,
        message: result.message.unwrap_or_else(|| "invalid value".to_string()),
    })
}

/// Accept ids that are safe to splice into a URL path.
pub(crate) fn path_segment<'a>(field: &'static str, id: &'a str) -> Result<&'a str> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        return Ok(id);
    }
    metrics::record_validation_failure(field);
    Err(ClientError::InvalidInput {
        field,
        message: "must be letters, digits, hyphens or underscores".to_string(),
    })
}
