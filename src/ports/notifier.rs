//! User notification port. Best-effort; failures are logged, never fatal.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Errors from the notification channel.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Port for best-effort user messaging.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a direct message to one user.
    async fn notify_user(&self, user_id: &UserId, message: &str) -> Result<(), NotifyError>;

    /// Posts an announcement visible to all members.
    async fn broadcast(&self, message: &str) -> Result<(), NotifyError>;
}
