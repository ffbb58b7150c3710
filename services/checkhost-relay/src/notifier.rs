//! Notifier trait for delivering result messages

use async_trait::async_trait;

/// Trait for sending notifications
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a plain-text message
    async fn notify(&self, message: &str) -> crate::Result<()>;
}
