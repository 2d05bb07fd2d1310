//! In-app notifications the backend keeps for the signed-in account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ride::lenient_timestamp;
use crate::domain::serde_utils::id_string;

/// One entry of the account's notification inbox, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxNotification {
    #[serde(with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_read: Option<bool>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl InboxNotification {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            is_read: Some(false),
            created_at: None,
        }
    }

    #[must_use]
    pub fn read(mut self) -> Self {
        self.is_read = Some(true);
        self
    }

    /// Rows written before the read flag existed count as unread.
    #[must_use]
    pub fn is_unread(&self) -> bool {
        !self.is_read.unwrap_or(false)
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Notification"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_row() {
        let json = r#"{
            "id": "5b8c",
            "user_id": "d-1",
            "user_type": "driver",
            "title": "Document approved",
            "body": "Your license was approved.",
            "is_read": false,
            "created_at": "2026-03-01T14:05:09.123456"
        }"#;
        let notification: InboxNotification = serde_json::from_str(json).unwrap();

        assert_eq!(notification.id, "5b8c");
        assert!(notification.is_unread());
        assert_eq!(
            notification.created_at.map(|at| at.format("%Y-%m-%d %H:%M").to_string()),
            Some("2026-03-01 14:05".to_string())
        );
    }

    #[test]
    fn test_sparse_row_is_unread_with_fallback_title() {
        let notification: InboxNotification =
            serde_json::from_str(r#"{"id": 7, "is_read": null}"#).unwrap();

        assert_eq!(notification.id, "7");
        assert!(notification.is_unread());
        assert_eq!(notification.display_title(), "Notification");
        assert!(notification.body.is_empty());
    }
}
