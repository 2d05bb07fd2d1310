//! Notification inbox port definition.

use async_trait::async_trait;

use crate::domain::entities::InboxNotification;
use crate::domain::errors::ApiError;

/// Port for the signed-in account's notification inbox.
#[async_trait]
pub trait InboxPort: Send + Sync {
    /// Lists notifications, newest first.
    async fn list_notifications(&self) -> Result<Vec<InboxNotification>, ApiError>;

    /// Marks every notification of the account as read.
    async fn mark_all_read(&self) -> Result<(), ApiError>;
}
