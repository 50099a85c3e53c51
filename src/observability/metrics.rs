//! Metrics collection.
//!
//! # Metrics
//! - `ticketing_rate_limited_total` (counter): requests refused by the client limiter, by reason
//! - `ticketing_api_requests_total` (counter): API calls by endpoint and outcome
//! - `ticketing_validation_failures_total` (counter): rejected input, by field
//!
//! # Design Decisions
//! - Low-overhead metric updates through the `metrics` facade
//! - Labels are static strings to keep cardinality bounded

/// Record a request the limiter refused (`"window"` or `"breaker"`).
pub fn record_rate_limited(reason: &'static str) {
    metrics::counter!("ticketing_rate_limited_total", "reason" => reason).increment(1);
}

/// Record the outcome (`"success"`, `"failure"`, `"error"`, `"invalid_body"`) of an API call.
pub fn record_api_request(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!(
        "ticketing_api_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record input rejected before it reached the API.
pub fn record_validation_failure(field: &'static str) {
    metrics::counter!("ticketing_validation_failures_total", "field" => field).increment(1);
}
