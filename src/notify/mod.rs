//! Off-thread delivery of focus reminders.
//!
//! The event loop hands an owned [`Notice`] to the [`Dispatcher`], which
//! forwards it to a worker thread. Backend failures stop at the worker.

pub mod desktop;
pub mod dispatcher;

use std::time::Duration;
use thiserror::Error;

pub use desktop::DesktopNotifier;
pub use dispatcher::Dispatcher;

/// A single reminder, copied across the thread boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    /// Auto-dismiss hint. Advisory only.
    pub timeout: Duration,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>, timeout: Duration) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            timeout,
        }
    }
}

/// Anything able to show a transient system notification.
pub trait NotificationBackend: Send + 'static {
    fn show(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Notification error types.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification backend failed: {0}")]
    Backend(String),

    #[error("Notification worker is no longer running")]
    WorkerGone,

    #[error("Failed to spawn notification worker: {0}")]
    Spawn(#[source] std::io::Error),
}
