//! Structural JWT inspection.
//!
//! Tokens are split and their header and payload decoded so the client can
//! read claims and check expiry. Signatures are never verified; that is the
//! server's job.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};

/// Decoded JWT payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.0.get(claim)
    }

    fn get_str(&self, claim: &str) -> Option<&str> {
        self.0.get(claim).and_then(Value::as_str)
    }

    /// `sub`, accepting numeric user ids as well as strings.
    pub fn subject(&self) -> Option<String> {
        match self.0.get("sub")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn role(&self) -> Option<&str> {
        self.get_str("role")
    }

    /// Raw `exp` claim in seconds since the epoch, if present and numeric.
    pub fn expires_at(&self) -> Option<f64> {
        self.0.get("exp").and_then(Value::as_f64)
    }

    /// True only when `exp` is present, numeric and strictly after `now_millis`.
    pub fn is_unexpired_at(&self, now_millis: u64) -> bool {
        self.expires_at()
            .map(|exp| exp * 1000.0 > now_millis as f64)
            .unwrap_or(false)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Decode one base64 segment (URL-safe or standard alphabet, padding optional) as JSON.
fn decode_segment(segment: &str) -> Option<Value> {
    let trimmed = segment.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Split into exactly three segments.
fn segments(token: &str) -> Option<[&str; 3]> {
    let mut parts = token.split('.');
    let header = parts.next()?;
    let payload = parts.next()?;
    let signature = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([header, payload, signature])
}

/// Decode the header and payload of a three-segment token.
fn decode_parts(token: &str) -> Option<(Value, Value)> {
    let [header, payload, _signature] = segments(token)?;
    Some((decode_segment(header)?, decode_segment(payload)?))
}

/// Payload claims of a well-formed token. Non-object payloads yield `None`.
pub fn decode_claims(token: &str) -> Option<Claims> {
    match decode_parts(token)?.1 {
        Value::Object(map) => Some(Claims(map)),
        _ => None,
    }
}

/// Structural validity against a given clock.
pub fn validate_jwt_at<C: Clock + ?Sized>(token: &str, clock: &C) -> bool {
    let Some((_header, payload)) = decode_parts(token) else {
        return false;
    };

    match payload.get("exp") {
        None => true,
        Some(exp) => exp
            .as_f64()
            .map(|exp| exp * 1000.0 > clock.now_millis() as f64)
            .unwrap_or(false),
    }
}

/// Three segments, header and payload decode to JSON, and `exp` (when present)
/// is in the future. Does not verify the signature.
pub fn validate_jwt(token: &str) -> bool {
    validate_jwt_at(token, &SystemClock)
}
