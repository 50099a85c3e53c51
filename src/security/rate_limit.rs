//! Client-side request limiter with a consecutive-failure breaker.
//!
//! The limiter is advisory: it never blocks or rejects anything itself.
//! Callers ask [`ClientRateLimiter::can_make_request`] before issuing a call,
//! then report what happened through the `record_*` methods.

use std::collections::VecDeque;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// Sliding-window request limiter for one logical client.
#[derive(Debug)]
pub struct ClientRateLimiter<C: Clock = SystemClock> {
    config: RateLimitConfig,
    clock: C,
    /// Request timestamps (ms since epoch), oldest first.
    requests: VecDeque<u64>,
    consecutive_failures: u32,
}

impl ClientRateLimiter<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ClientRateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            requests: VecDeque::new(),
            consecutive_failures: 0,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Drop every timestamp at or before the start of the current window.
    fn prune(&mut self, now: u64) {
        let window_start = now.saturating_sub(self.config.window_ms);
        while let Some(&oldest) = self.requests.front() {
            if oldest > window_start {
                break;
            }
            self.requests.pop_front();
        }
    }

    fn window_exhausted(&self) -> bool {
        self.requests.len() >= self.config.max_requests as usize
    }

    fn breaker_open(&self) -> bool {
        self.consecutive_failures >= self.config.max_consecutive_failures
    }

    /// Whether another request may be issued now. Records nothing.
    pub fn can_make_request(&mut self) -> bool {
        let now = self.clock.now_millis();
        self.prune(now);

        if self.window_exhausted() {
            tracing::warn!(
                recorded = self.requests.len(),
                max_requests = self.config.max_requests,
                window_ms = self.config.window_ms,
                "Client rate limit reached"
            );
            metrics::record_rate_limited("window");
            return false;
        }
        if self.breaker_open() {
            tracing::warn!(
                consecutive_failures = self.consecutive_failures,
                "Too many consecutive failures, refusing request"
            );
            metrics::record_rate_limited("breaker");
            return false;
        }
        true
    }

    /// Note that a request is about to be issued.
    pub fn record_request(&mut self) {
        let now = self.clock.now_millis();
        self.requests.push_back(now);
    }

    pub fn record_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Requests still allowed in the current window; zero while the breaker is open.
    pub fn remaining(&mut self) -> u32 {
        let now = self.clock.now_millis();
        self.prune(now);
        if self.breaker_open() {
            return 0;
        }
        self.config.max_requests.saturating_sub(self.requests.len() as u32)
    }

    /// How long until the window frees a slot.
    ///
    /// `Some(Duration::ZERO)` when a request is allowed now. `None` when only the
    /// failure breaker is blocking, since waiting alone never closes it.
    pub fn retry_after(&mut self) -> Option<Duration> {
        let now = self.clock.now_millis();
        self.prune(now);
        if self.breaker_open() {
            return None;
        }
        if !self.window_exhausted() {
            return Some(Duration::ZERO);
        }

        // The slot frees once the entry that must leave is outside the window.
        let excess = self.requests.len() - self.config.max_requests as usize;
        let blocking = self.requests.get(excess).copied().unwrap_or(now);
        let frees_at = blocking + self.config.window_ms;
        Some(Duration::from_millis(frees_at.saturating_sub(now)))
    }
}
