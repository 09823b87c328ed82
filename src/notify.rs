//! Fire-and-forget push notifications addressed to subscriber groups.
//!
//! A group is either a vendor's business email or [`ADMINS_GROUP`]. Services publish only after
//! their transaction commits and never propagate a publish failure to the caller.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::state::AppState;

pub const ADMINS_GROUP: &str = "Admins";
pub const EVENT_NAME: &str = "ReceiveNotification";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(skip)]
    pub group: String,
    pub event: &'static str,
    /// Audience label shown by clients ("Vendor" or "Admin").
    pub source: &'static str,
    pub message: String,
}

impl Notification {
    pub fn vendor(group: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            event: EVENT_NAME,
            source: "Vendor",
            message: message.into(),
        }
    }

    pub fn admins(message: impl Into<String>) -> Self {
        Self {
            group: ADMINS_GROUP.to_string(),
            event: EVENT_NAME,
            source: "Admin",
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification channel closed")]
    Closed,

    #[error("notification rejected: {0}")]
    Rejected(String),
}

pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// In-process hub; WebSocket connections subscribe and filter by group.
#[derive(Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl NotificationSink for NotificationHub {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        // No connected subscriber is not a failure: delivery is at-most-once.
        let delivered = self.sender.send(notification).unwrap_or(0);
        tracing::debug!(delivered, "notification published");
        Ok(())
    }
}

/// Publish and log on failure.
pub fn notify(state: &AppState, notification: Notification) {
    let group = notification.group.clone();
    if let Err(err) = state.notifier.publish(notification) {
        tracing::warn!(error = %err, group = %group, "notification failed");
    }
}
