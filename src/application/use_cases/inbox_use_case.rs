//! Notification inbox: list, then mark everything read.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::InboxNotification;
use crate::domain::errors::ApiError;
use crate::domain::ports::InboxPort;

/// What the driver saw when opening the inbox.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxView {
    pub notifications: Vec<InboxNotification>,
    /// Unread entries at the time of listing, before any marking.
    pub unread: usize,
    /// Whether the backend confirmed the read marking.
    pub marked_read: bool,
}

pub struct InboxUseCase {
    inbox: Arc<dyn InboxPort>,
}

impl InboxUseCase {
    #[must_use]
    pub const fn new(inbox: Arc<dyn InboxPort>) -> Self {
        Self { inbox }
    }

    /// Lists the inbox and, when `mark_read` is set and something is
    /// unread, marks it all read.
    ///
    /// A failed marking is logged and reported through
    /// [`InboxView::marked_read`]; the listing is still returned.
    ///
    /// # Errors
    /// Returns the backend error when listing fails.
    pub async fn open(&self, mark_read: bool) -> Result<InboxView, ApiError> {
        let notifications = self.inbox.list_notifications().await?;
        let unread = notifications.iter().filter(|n| n.is_unread()).count();

        let marked_read = if mark_read && unread > 0 {
            match self.inbox.mark_all_read().await {
                Ok(()) => {
                    info!(unread, "Inbox marked read");
                    true
                }
                Err(e) => {
                    warn!(error = %e, "Failed to mark inbox read");
                    false
                }
            }
        } else {
            unread == 0
        };

        Ok(InboxView {
            notifications,
            unread,
            marked_read,
        })
    }

    /// Counts unread notifications without changing them.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn unread_count(&self) -> Result<usize, ApiError> {
        let notifications = self.inbox.list_notifications().await?;
        Ok(notifications.iter().filter(|n| n.is_unread()).count())
    }
}
