//! Bearer token and user profile storage.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::config::StorageConfig;
use crate::security::jwt::{decode_claims, Claims};
use crate::storage::KeyValueStore;

/// Holds the auth token and cached user profile in a [`KeyValueStore`].
#[derive(Debug)]
pub struct TokenStore<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    token_key: String,
    user_key: String,
}

impl<S: KeyValueStore> TokenStore<S, SystemClock> {
    /// Store using the default `auth_token` / `user` keys.
    pub fn new(store: S) -> Self {
        Self::from_config(store, &StorageConfig::default())
    }

    pub fn from_config(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            clock: SystemClock,
            token_key: config.token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }
}

impl<S: KeyValueStore, C: Clock> TokenStore<S, C> {
    /// Swap the clock used for expiry checks.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> TokenStore<S, C2> {
        TokenStore {
            store: self.store,
            clock,
            token_key: self.token_key,
            user_key: self.user_key,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(&self.token_key, token);
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.get(&self.token_key)
    }

    /// Forget the token and the cached user profile.
    pub fn remove_token(&self) {
        self.store.remove(&self.token_key);
        self.store.remove(&self.user_key);
    }

    /// A token is stored and its `exp` claim is in the future.
    ///
    /// Tokens without `exp`, or that fail to decode, are not authenticated.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.get_token() else {
            return false;
        };
        match decode_claims(&token) {
            Some(claims) => claims.is_unexpired_at(self.clock.now_millis()),
            None => {
                tracing::debug!("Stored token could not be decoded");
                false
            }
        }
    }

    /// Claims of the stored token, whether or not it has expired.
    pub fn get_user_from_token(&self) -> Option<Claims> {
        decode_claims(&self.get_token()?)
    }

    pub fn set_user<T: Serialize>(&self, user: &T) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(user)?;
        self.store.set(&self.user_key, &json);
        Ok(())
    }

    /// Cached profile; a malformed entry reads as absent.
    pub fn get_user<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = self.store.get(&self.user_key)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed cached user profile");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn token(payload: Value) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    fn store_at(millis: u64) -> (TokenStore<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(millis);
        (TokenStore::new(MemoryStore::new()).with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_token_lifecycle() {
        let (tokens, _) = store_at(0);
        assert!(tokens.get_token().is_none());
        assert!(!tokens.is_authenticated());

        tokens.set_token("first");
        tokens.set_token("second");
        assert_eq!(tokens.get_token().as_deref(), Some("second"));

        tokens.set_user(&json!({ "id": 7 })).unwrap();
        tokens.remove_token();
        assert!(tokens.get_token().is_none());
        assert!(tokens.get_user::<Value>().is_none());
    }

    #[test]
    fn test_is_authenticated_follows_exp() {
        let (tokens, clock) = store_at(1_000_000_000_000);
        tokens.set_token(&token(json!({ "sub": "u1", "exp": 1_000_003_600u64 })));
        assert!(tokens.is_authenticated());

        clock.advance(Duration::from_secs(3_600));
        assert!(!tokens.is_authenticated());
        assert_eq!(
            tokens.get_user_from_token().and_then(|c| c.subject()),
            Some("u1".to_string())
        );
    }

    #[test]
    fn test_token_without_exp_or_garbage() {
        let (tokens, _) = store_at(0);
        tokens.set_token(&token(json!({ "sub": "u1" })));
        assert!(!tokens.is_authenticated());

        tokens.set_token("garbage");
        assert!(!tokens.is_authenticated());
        assert!(tokens.get_user_from_token().is_none());
    }

    #[test]
    fn test_custom_keys() {
        let store = MemoryStore::new();
        let config = StorageConfig {
            token_key: "jwt".into(),
            user_key: "profile".into(),
            ..StorageConfig::default()
        };
        let tokens = TokenStore::from_config(store.clone(), &config);

        tokens.set_token("t");
        tokens.set_user(&json!({ "name": "Fan" })).unwrap();

        assert_eq!(store.get("jwt").as_deref(), Some("t"));
        assert_eq!(store.get("profile").as_deref(), Some(r#"{"name":"Fan"}"#));
        assert!(store.get("auth_token").is_none());
    }

    #[test]
    fn test_malformed_user_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("user", "{broken");
        let tokens = TokenStore::new(store);
        assert!(tokens.get_user::<Value>().is_none());
    }
}
