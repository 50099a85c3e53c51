//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing request (see api/client.rs):
//!     → validation.rs (field validators, fail closed)
//!     → sanitize.rs (strip markup, escape for display)
//!     → rate_limit.rs (advisory go / no-go)
//!     → Pass to the HTTP client
//!
//! Stored credentials:
//!     → jwt.rs (structural checks, claim + expiry inspection)
//! ```
//!
//! # Design Decisions
//! - Fail closed: malformed input is invalid, never an error
//! - The modules share no state and do not call each other
//! - Heuristic XSS patterns are kept as-is, including their false positives

pub mod jwt;
pub mod rate_limit;
pub mod sanitize;
pub mod validation;

pub use jwt::{decode_claims, validate_jwt, Claims};
pub use rate_limit::ClientRateLimiter;
pub use sanitize::{detect_xss, escape_html, sanitize_input};
pub use validation::{
    validate_email, validate_password, validate_phone, validate_url, ValidationResult,
};
