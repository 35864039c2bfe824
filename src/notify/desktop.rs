//! OS notifications through notify-rust.

use super::{Notice, NotificationBackend, NotifyError};
use notify_rust::{Notification, Timeout};

/// Shows notices as native desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new("Focus Overlay")
    }
}

impl NotificationBackend for DesktopNotifier {
    fn show(&self, notice: &Notice) -> Result<(), NotifyError> {
        let millis = u32::try_from(notice.timeout.as_millis()).unwrap_or(u32::MAX);
        Notification::new()
            .appname(&self.app_name)
            .summary(&notice.title)
            .body(&notice.message)
            .timeout(Timeout::Milliseconds(millis))
            .show()
            .map(drop)
            .map_err(|e| NotifyError::Backend(e.to_string()))
    }
}
