//! Login and logout.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{ensure_valid, ApiClient};
use crate::clock::Clock;
use crate::error::Result;
use crate::security::jwt::Claims;
use crate::security::validation::{validate_email, validate_password, ValidationResult};
use crate::storage::KeyValueStore;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<Value>,
}

impl<S: KeyValueStore, C: Clock + Clone> ApiClient<S, C> {
    /// Validate credentials locally, log in, and store the returned token and user.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let email = email.trim();
        let email_check = if validate_email(email) {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid("Please enter a valid email address")
        };
        ensure_valid("email", email_check)?;
        ensure_valid("password", validate_password(password))?;

        let request = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        let response: LoginResponse = self.execute_json("auth.login", request).await?;

        self.tokens().set_token(&response.token);
        if let Some(user) = &response.user {
            self.tokens().set_user(user)?;
        }
        tracing::info!("Logged in");
        Ok(response)
    }

    /// Drop the stored token and user profile. No request is made.
    pub fn logout(&self) {
        self.tokens().remove_token();
        tracing::info!("Logged out");
    }

    /// Claims of the stored token while it is still valid.
    pub fn current_user(&self) -> Option<Claims> {
        if self.tokens().is_authenticated() {
            self.tokens().get_user_from_token()
        } else {
            None
        }
    }
}
