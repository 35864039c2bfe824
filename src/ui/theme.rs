//! Overlay styling.
//!
//! The overlay paints its own background, so panels stay transparent and
//! only the text color is forced.

use crate::config::OverlayConfig;
use eframe::egui;

/// Overlay colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Clock digits
    pub text: egui::Color32,

    /// Label background or pill body
    pub fill: egui::Color32,
}

impl Theme {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            text: config.text_color,
            fill: config.fill_color,
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Background is painted by the render surface
        style.visuals.panel_fill = egui::Color32::TRANSPARENT;
        style.visuals.window_fill = self.fill;
        style.visuals.override_text_color = Some(self.text);

        // Dragging the clock must not start a text selection
        style.interaction.selectable_labels = false;

        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}
