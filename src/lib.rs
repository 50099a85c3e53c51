//! Client-side core of an event-ticketing application.
//!
//! Input validation and sanitization, an advisory request limiter, JWT
//! inspection, token and cookie storage, and a thin client for the ticketing
//! REST API built on top of them.

pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod observability;
pub mod security;
pub mod storage;

pub use api::ApiClient;
pub use auth::{CookieJar, CookieOptions, TokenStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use security::rate_limit::ClientRateLimiter;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
