//! User notifications.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{path_segment, ApiClient};
use crate::clock::Clock;
use crate::error::Result;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnreadCount {
    count: u64,
}

impl<S: KeyValueStore, C: Clock + Clone> ApiClient<S, C> {
    pub async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.require_auth()?;
        let request = self.request(Method::GET, "/notifications");
        self.execute_json("notifications.list", request).await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<()> {
        self.require_auth()?;
        let id = path_segment("notification_id", id)?;
        let request = self.request(Method::PATCH, &format!("/notifications/{id}/read"));
        self.execute("notifications.mark_read", request).await?;
        Ok(())
    }

    pub async fn unread_count(&self) -> Result<u64> {
        self.require_auth()?;
        let request = self.request(Method::GET, "/notifications/unread-count");
        let body: UnreadCount = self.execute_json("notifications.unread_count", request).await?;
        Ok(body.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let n: Notification = serde_json::from_str(
            r#"{"id":"n1","title":"<b>Sold out</b>","message":"Tom & Jerry","type":"event","createdAt":"2026-10-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(n.kind.as_deref(), Some("event"));
        assert!(!n.read);
        assert_eq!(n.title, "<b>Sold out</b>");
        assert_eq!(n.created_at.as_deref(), Some("2026-10-01T12:00:00Z"));
    }
}
