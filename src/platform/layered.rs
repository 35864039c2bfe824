//! Layered-window attributes through the Win32 API.

use super::{colorref, opacity_byte, PlatformError};
use eframe::egui::Color32;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::{COLORREF, HWND};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongPtrW, SetLayeredWindowAttributes, SetWindowLongPtrW, GWL_EXSTYLE, LWA_ALPHA,
    LWA_COLORKEY, LAYERED_WINDOW_ATTRIBUTES_FLAGS, WS_EX_LAYERED,
};

pub fn apply_color_key(
    window: &impl HasWindowHandle,
    key: Color32,
    opacity: f32,
) -> Result<(), PlatformError> {
    set_layered(
        window,
        COLORREF(colorref(key)),
        opacity_byte(opacity),
        LWA_COLORKEY | LWA_ALPHA,
    )
}

pub fn apply_alpha(window: &impl HasWindowHandle, opacity: f32) -> Result<(), PlatformError> {
    set_layered(window, COLORREF(0), opacity_byte(opacity), LWA_ALPHA)
}

fn set_layered(
    window: &impl HasWindowHandle,
    key: COLORREF,
    alpha: u8,
    flags: LAYERED_WINDOW_ATTRIBUTES_FLAGS,
) -> Result<(), PlatformError> {
    let hwnd = match window.window_handle()?.as_raw() {
        RawWindowHandle::Win32(handle) => HWND(handle.hwnd.get() as *mut _),
        _ => return Err(PlatformError::ForeignHandle),
    };

    unsafe {
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style | WS_EX_LAYERED.0 as isize);

        SetLayeredWindowAttributes(hwnd, key, alpha, flags).map_err(PlatformError::WindowsError)?;
    }

    Ok(())
}
