//! Authentication state held on the client.
//!
//! # Data Flow
//! ```text
//! login response
//!     → token.rs (bearer token + user profile into KeyValueStore)
//!     → security/jwt.rs (exp claim → is_authenticated)
//!     → api/client.rs (Authorization: Bearer <token>)
//!
//! cookie.rs: name/value pairs with optional expiry and path
//! ```
//!
//! # Design Decisions
//! - The token store owns its storage keys; nothing else writes them
//! - Expiry checks use an injected clock
//! - Options bags are passed through without validation

pub mod cookie;
pub mod token;

pub use cookie::{Cookie, CookieJar, CookieOptions};
pub use token::TokenStore;
