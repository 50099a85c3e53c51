//! Cookie read/write helpers.
//!
//! A small cookie jar with document-cookie semantics: writing a name replaces
//! the previous value, expired cookies are invisible, and deleting is writing
//! an already-expired cookie.

use std::collections::BTreeMap;

use crate::clock::{Clock, SystemClock};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Caller-supplied options. Contents are not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    /// Lifetime in days from now. Zero or negative expires immediately.
    /// `None` makes a session cookie.
    pub expires_days: Option<i64>,
    pub path: Option<String>,
}

impl CookieOptions {
    pub fn expires_in_days(days: i64) -> Self {
        Self {
            expires_days: Some(days),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Expiry in ms since the epoch; `None` for session cookies.
    pub expires_at: Option<u64>,
    pub path: Option<String>,
}

impl Cookie {
    fn is_live_at(&self, now_millis: u64) -> bool {
        self.expires_at.map_or(true, |at| at > now_millis)
    }
}

/// Render a `Set-Cookie` style string: `name=value; Max-Age=N; Path=/p`.
pub fn set_cookie_string(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut out = format!("{name}={value}");
    if let Some(days) = options.expires_days {
        let max_age = days.max(0).saturating_mul(MILLIS_PER_DAY / 1000);
        out.push_str(&format!("; Max-Age={max_age}"));
    }
    if let Some(path) = &options.path {
        out.push_str(&format!("; Path={path}"));
    }
    out
}

/// In-memory cookie store keyed by name.
#[derive(Debug, Clone, Default)]
pub struct CookieJar<C: Clock = SystemClock> {
    cookies: BTreeMap<String, Cookie>,
    clock: C,
}

impl CookieJar<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> CookieJar<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            cookies: BTreeMap::new(),
            clock,
        }
    }

    /// Load session cookies from a `Cookie` request header (`a=1; b=2`).
    ///
    /// Pairs without `=` are skipped; values may themselves contain `=`.
    pub fn parse_header(&mut self, header: &str) {
        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            self.cookies.insert(
                name.to_string(),
                Cookie {
                    name: name.to_string(),
                    value: value.trim().to_string(),
                    expires_at: None,
                    path: None,
                },
            );
        }
    }

    /// Write a cookie and return the equivalent `Set-Cookie` string.
    pub fn set(&mut self, name: &str, value: &str, options: &CookieOptions) -> String {
        let now = self.clock.now_millis() as i64;
        let expires_at = options
            .expires_days
            .map(|days| now.saturating_add(days.saturating_mul(MILLIS_PER_DAY)).max(0) as u64);

        self.cookies.insert(
            name.to_string(),
            Cookie {
                name: name.to_string(),
                value: value.to_string(),
                expires_at,
                path: options.path.clone(),
            },
        );
        set_cookie_string(name, value, options)
    }

    /// Value of an unexpired cookie.
    pub fn get(&self, name: &str) -> Option<&str> {
        let now = self.clock.now_millis();
        self.cookies
            .get(name)
            .filter(|c| c.is_live_at(now))
            .map(|c| c.value.as_str())
    }

    pub fn get_cookie(&self, name: &str) -> Option<&Cookie> {
        let now = self.clock.now_millis();
        self.cookies.get(name).filter(|c| c.is_live_at(now))
    }

    /// Expire a cookie, keeping the caller's path. Returns the `Set-Cookie` string.
    pub fn remove(&mut self, name: &str, options: &CookieOptions) -> String {
        let expired = CookieOptions {
            expires_days: Some(-1),
            path: options.path.clone(),
        };
        let rendered = self.set(name, "", &expired);
        self.purge_expired();
        rendered
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) {
        let now = self.clock.now_millis();
        self.cookies.retain(|_, c| c.is_live_at(now));
    }

    /// `Cookie` header for the live cookies, in name order.
    pub fn header(&self) -> String {
        let now = self.clock.now_millis();
        self.cookies
            .values()
            .filter(|c| c.is_live_at(now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
