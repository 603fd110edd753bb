//! Error types for the notification system

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    #[error("{} of {} listeners failed: {:?}", failed_listeners.len(), attempted, failed_listeners)]
    DeliveryFailed {
        attempted: usize,
        failed_listeners: Vec<String>,
    },
}

pub type NotificationResult<T> = Result<T, NotificationError>;

impl crate::core::error_handling::ContextualError for NotificationError {
    fn is_user_actionable(&self) -> bool {
        false // Listener failures are integration bugs, not user errors
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}
