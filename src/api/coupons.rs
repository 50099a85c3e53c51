//! Coupon lookup.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{ensure_valid, path_segment, ApiClient};
use crate::clock::Clock;
use crate::error::Result;
use crate::security::sanitize::sanitize_input;
use crate::security::validation::{validate_coupon_code, validate_required};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    #[serde(default)]
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

/// Body returned by `POST /coupons/validate`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    pub valid: bool,
    #[serde(default)]
    pub coupon: Option<Coupon>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateCouponRequest<'a> {
    code: &'a str,
    event_id: &'a str,
}

impl<S: KeyValueStore, C: Clock + Clone> ApiClient<S, C> {
    /// Check a coupon code against an event. Does not require login.
    pub async fn validate_coupon(&self, code: &str, event_id: &str) -> Result<CouponValidation> {
        let code = sanitize_input(code).to_uppercase();
        ensure_valid("coupon_code", validate_coupon_code(&code))?;
        ensure_valid("event_id", validate_required("Event", event_id))?;
        let event_id = path_segment("event_id", event_id)?;

        let request = self
            .request(Method::POST, "/coupons/validate")
            .json(&ValidateCouponRequest {
                code: &code,
                event_id,
            });
        self.execute_json("coupons.validate", request).await
    }

    /// Coupons configured for an event (organizer view).
    pub async fn list_coupons(&self, event_id: &str) -> Result<Vec<Coupon>> {
        self.require_auth()?;
        ensure_valid("event_id", validate_required("Event", event_id))?;
        let event_id = path_segment("event_id", event_id)?;

        let request = self.request(Method::GET, &format!("/events/{event_id}/coupons"));
        self.execute_json("coupons.list", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let validation: CouponValidation = serde_json::from_str(
            r#"{"valid":true,"discountAmount":12.5,"coupon":{"code":"VIP","discountType":"fixed","discountValue":12.5}}"#,
        )
        .unwrap();
        let coupon = validation.coupon.unwrap();
        assert_eq!(coupon.discount_type, DiscountType::Fixed);
        assert_eq!(coupon.used_count, 0);
        assert_eq!(validation.discount_amount, Some(12.5));
    }
}
