//! Platform window integration.
//!
//! Color-key transparency and whole-window opacity both use layered-window
//! attributes, which only Windows provides. Everywhere else the overlay
//! uses compositor alpha on a transparent viewport.

#[cfg(windows)]
mod layered;

use eframe::egui::Color32;
use raw_window_handle::{HandleError, HasWindowHandle};
use thiserror::Error;

/// Platform error types.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Layered window attributes are not supported on this platform")]
    Unsupported,

    #[error("Window handle unavailable: {0}")]
    Handle(#[from] HandleError),

    #[error("Unexpected window handle type")]
    ForeignHandle,

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsError(#[source] windows::core::Error),
}

/// Whether this platform can key out a single color.
pub fn supports_color_key() -> bool {
    cfg!(windows)
}

/// Whether the compositor can apply one opacity to the whole window.
pub fn supports_window_alpha() -> bool {
    cfg!(windows)
}

/// Make `key` invisible and apply `opacity` to the rest of the window.
pub fn apply_color_key(
    window: &impl HasWindowHandle,
    key: Color32,
    opacity: f32,
) -> Result<(), PlatformError> {
    #[cfg(windows)]
    {
        layered::apply_color_key(window, key, opacity)
    }

    #[cfg(not(windows))]
    {
        let _ = (window, key, opacity);
        Err(PlatformError::Unsupported)
    }
}

/// Render the whole window, every painted pixel alike, at `opacity`.
pub fn apply_alpha(window: &impl HasWindowHandle, opacity: f32) -> Result<(), PlatformError> {
    #[cfg(windows)]
    {
        layered::apply_alpha(window, opacity)
    }

    #[cfg(not(windows))]
    {
        let _ = (window, opacity);
        Err(PlatformError::Unsupported)
    }
}

/// Opacity as the 0..=255 byte the compositor expects.
pub fn opacity_byte(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `0x00BBGGRR` as used by GDI.
pub fn colorref(color: Color32) -> u32 {
    u32::from(color.r()) | (u32::from(color.g()) << 8) | (u32::from(color.b()) << 16)
}
