//! Ticket payments.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{ensure_valid, path_segment, ApiClient};
use crate::clock::Clock;
use crate::error::Result;
use crate::security::validation::{
    validate_coupon_code, validate_phone, validate_quantity, validate_required,
};
use crate::storage::KeyValueStore;

pub const MAX_TICKETS_PER_ORDER: u32 = 10;

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub event_id: String,
    pub ticket_type_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl PaymentRequest {
    /// Check every field, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        ensure_valid("event_id", validate_required("Event", &self.event_id))?;
        path_segment("event_id", &self.event_id)?;
        ensure_valid("ticket_type_id", validate_required("Ticket type", &self.ticket_type_id))?;
        path_segment("ticket_type_id", &self.ticket_type_id)?;
        ensure_valid("quantity", validate_quantity(self.quantity, MAX_TICKETS_PER_ORDER))?;
        if let Some(code) = &self.coupon_code {
            ensure_valid("coupon_code", validate_coupon_code(code))?;
        }
        ensure_valid("contact_phone", validate_phone(self.contact_phone.as_deref()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn is_final(self) -> bool {
        !matches!(self, PaymentStatus::Pending | PaymentStatus::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub status: PaymentStatus,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub event_id: Option<String>,
    /// Secret handed to the payment provider's widget; only present while pending.
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl<S: KeyValueStore, C: Clock + Clone> ApiClient<S, C> {
    pub async fn create_payment(&self, payment: &PaymentRequest) -> Result<Payment> {
        self.require_auth()?;
        payment.validate()?;

        let request = self.request(Method::POST, "/payments").json(payment);
        let created: Payment = self.execute_json("payments.create", request).await?;
        tracing::info!(payment_id = %created.id, status = ?created.status, "Payment created");
        Ok(created)
    }

    pub async fn get_payment(&self, id: &str) -> Result<Payment> {
        self.require_auth()?;
        let id = path_segment("payment_id", id)?;
        let request = self.request(Method::GET, &format!("/payments/{id}"));
        self.execute_json("payments.get", request).await
    }

    pub async fn confirm_payment(&self, id: &str) -> Result<Payment> {
        self.require_auth()?;
        let id = path_segment("payment_id", id)?;
        let request = self.request(Method::POST, &format!("/payments/{id}/confirm"));
        self.execute_json("payments.confirm", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn request() -> PaymentRequest {
        PaymentRequest {
            event_id: "evt_1".into(),
            ticket_type_id: "ga".into(),
            quantity: 2,
            coupon_code: None,
            contact_phone: None,
        }
    }

    #[test]
    fn test_validate() {
        assert!(request().validate().is_ok());

        let field_of = |r: PaymentRequest| match r.validate() {
            Err(ClientError::InvalidInput { field, .. }) => field,
            other => panic!("expected invalid input, got {other:?}"),
        };

        assert_eq!(field_of(PaymentRequest { quantity: 0, ..request() }), "quantity");
        assert_eq!(field_of(PaymentRequest { quantity: 11, ..request() }), "quantity");
        assert_eq!(field_of(PaymentRequest { event_id: "a/b".into(), ..request() }), "event_id");
        assert_eq!(
            field_of(PaymentRequest { coupon_code: Some("x".into()), ..request() }),
            "coupon_code"
        );
        assert_eq!(
            field_of(PaymentRequest { contact_phone: Some("123".into()), ..request() }),
            "contact_phone"
        );
    }

    #[test]
    fn test_blank_ids_are_reported_as_missing() {
        match (PaymentRequest { ticket_type_id: "  ".into(), ..request() }).validate() {
            Err(ClientError::InvalidInput { field, message }) => {
                assert_eq!(field, "ticket_type_id");
                assert_eq!(message, "Ticket type is required");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "eventId": "evt_1", "ticketTypeId": "ga", "quantity": 2 })
        );
    }

    #[test]
    fn test_unknown_status() {
        let p: Payment = serde_json::from_str(
            r#"{"id":"pay_1","status":"requires_action","amount":40.0,"currency":"EUR"}"#,
        )
        .unwrap();
        assert_eq!(p.status, PaymentStatus::Unknown);
        assert!(!p.status.is_final());
        assert!(PaymentStatus::Refunded.is_final());
    }
}
