//! Remote API glue.
//!
//! # Data Flow
//! ```text
//! auth.rs, coupons.rs, notifications.rs, payments.rs
//!     → validate / sanitize fields (security)
//!     → client.rs (limiter gate, bearer header, JSON)
//!     → REST API at api.base_url
//! ```
//!
//! # Design Decisions
//! - One `ApiClient` owns one limiter; nothing is global
//! - Input is rejected locally before it costs a request
//! - Any non-2xx response or transport error counts as a failure for the breaker

pub mod auth;
pub mod client;
pub mod coupons;
pub mod notifications;
pub mod payments;

pub use auth::LoginResponse;
pub use client::ApiClient;
pub use coupons::{Coupon, CouponValidation, DiscountType};
pub use notifications::Notification;
pub use payments::{Payment, PaymentRequest, PaymentStatus, MAX_TICKETS_PER_ORDER};
