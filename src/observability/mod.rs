//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Limiter, validators, storage, API client produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters via the `metrics` facade)
//!
//! Consumers:
//!     → stderr (CLI) or whatever subscriber the host installs
//!     → any `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; the binary decides where output goes
//! - Metrics are cheap no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
