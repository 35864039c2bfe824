//! Compiled-in overlay configuration.
//!
//! Holds the two presentation presets (plain label and rounded dock) and
//! the validation that runs once before the window is created.

use eframe::egui::{self, Color32};
use std::time::Duration;
use thiserror::Error;

/// Seconds between focus reminders (8 minutes).
pub const NOTIFY_INTERVAL_SECS: u64 = 480;

/// Clock refresh cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Title shown on every reminder.
pub const NOTIFICATION_TITLE: &str = "FOCUS TRIGGER";

/// Auto-dismiss hint passed to the notification backend.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable selecting the presentation variant at startup.
pub const VARIANT_ENV: &str = "FOCUS_OVERLAY_VARIANT";

pub const QUOTES: &[&str] = &[
    "Stay hard. Stay focused.",
    "Time is passing. Are you?",
    "Deep work creates value.",
    "One task at a time.",
    "Discipline equals freedom.",
    "Don't stop when you're tired, stop when you're done.",
    "Focus on the process, not the outcome.",
    "What is the most important thing right now?",
];

/// Presentation variant, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Opaque label filling the window, whole-window translucency
    #[default]
    Label,

    /// Rounded pill drawn over a color-keyed background
    Dock,
}

impl Variant {
    /// Parse a variant name as accepted in [`VARIANT_ENV`].
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "label" | "a" => Ok(Variant::Label),
            "dock" | "b" => Ok(Variant::Dock),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }

    /// Read the variant from the environment, defaulting to [`Variant::Label`].
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(VARIANT_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value),
            _ => Ok(Variant::default()),
        }
    }
}

/// How the window background becomes see-through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransparencyMode {
    /// Entire window rendered at this opacity (0.0 to 1.0). Square corners.
    WholeWindowAlpha(f32),

    /// This exact RGB value is made invisible by the compositor.
    ColorKey(Color32),
}

impl TransparencyMode {
    /// Resolve against platform capabilities. Without color-key support the
    /// window degrades to whole-window alpha.
    pub fn resolve(self, color_key_supported: bool, opacity: f32) -> Self {
        match self {
            TransparencyMode::ColorKey(_) if !color_key_supported => {
                TransparencyMode::WholeWindowAlpha(opacity)
            }
            mode => mode,
        }
    }

    pub fn is_color_key(&self) -> bool {
        matches!(self, TransparencyMode::ColorKey(_))
    }
}

/// Configuration error types. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Quote list is empty")]
    NoQuotes,

    #[error("Quote #{index} is blank")]
    BlankQuote { index: usize },

    #[error("Notify interval must be greater than zero")]
    ZeroInterval,

    #[error("Opacity {0} is outside 0.0..=1.0")]
    InvalidOpacity(f32),

    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(f32),

    #[error("Window size must be positive, got {width}x{height}")]
    InvalidWindowSize { width: f32, height: f32 },

    #[error("Color key {key:?} would punch holes into the foreground art")]
    ColorKeyCollision { key: Color32 },

    #[error("Unknown presentation variant: {0:?}")]
    UnknownVariant(String),
}

/// Full overlay configuration.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub variant: Variant,
    pub text_color: Color32,
    /// Background for the label, pill color for the dock
    pub fill_color: Color32,
    pub transparency: TransparencyMode,
    /// Window opacity, also used when color key falls back to alpha
    pub opacity: f32,
    pub font_size: f32,
    pub window_size: egui::Vec2,
    /// Top-left corner on the primary screen
    pub position: egui::Pos2,
    pub tick_interval: Duration,
    pub notify_interval: Duration,
    pub notification_title: String,
    pub notification_timeout: Duration,
    pub quotes: Vec<String>,
}

impl OverlayConfig {
    /// Variant A: opaque black label at 60% window opacity.
    pub fn label() -> Self {
        const OPACITY: f32 = 0.60;
        Self {
            variant: Variant::Label,
            text_color: Color32::WHITE,
            fill_color: Color32::BLACK,
            transparency: TransparencyMode::WholeWindowAlpha(OPACITY),
            opacity: OPACITY,
            font_size: 18.0,
            window_size: egui::vec2(90.0, 30.0),
            position: egui::pos2(683.0, 0.0),
            tick_interval: TICK_INTERVAL,
            notify_interval: Duration::from_secs(NOTIFY_INTERVAL_SECS),
            notification_title: NOTIFICATION_TITLE.to_string(),
            notification_timeout: NOTIFICATION_TIMEOUT,
            quotes: QUOTES.iter().map(|q| q.to_string()).collect(),
        }
    }

    /// Variant B: black pill on a near-black color key.
    pub fn dock() -> Self {
        Self {
            variant: Variant::Dock,
            transparency: TransparencyMode::ColorKey(Color32::from_rgb(0, 0, 1)),
            opacity: 0.85,
            window_size: egui::vec2(120.0, 34.0),
            position: egui::pos2(668.0, 0.0),
            ..Self::label()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Label => Self::label(),
            Variant::Dock => Self::dock(),
        }
    }

    /// Check every startup invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quotes.is_empty() {
            return Err(ConfigError::NoQuotes);
        }
        if let Some(index) = self.quotes.iter().position(|q| q.trim().is_empty()) {
            return Err(ConfigError::BlankQuote { index });
        }
        if self.notify_interval.is_zero() || self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        if let TransparencyMode::WholeWindowAlpha(opacity) = self.transparency {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ConfigError::InvalidOpacity(opacity));
            }
        }
        if self.font_size.is_nan() || self.font_size <= 0.0 {
            return Err(ConfigError::InvalidFontSize(self.font_size));
        }
        let (width, height) = (self.window_size.x, self.window_size.y);
        if width.is_nan() || height.is_nan() || width < 1.0 || height < 1.0 {
            return Err(ConfigError::InvalidWindowSize { width, height });
        }
        if let TransparencyMode::ColorKey(key) = self.transparency {
            if key_collides(key, self.fill_color, self.text_color) {
                return Err(ConfigError::ColorKeyCollision { key });
            }
        }
        Ok(())
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::label()
    }
}

/// True if `key` equals either foreground color or any 8-bit blend between
/// them (anti-aliased glyph edges over the fill).
pub fn key_collides(key: Color32, fill: Color32, text: Color32) -> bool {
    let key = [key.r(), key.g(), key.b()];
    let fill = [fill.r(), fill.g(), fill.b()];
    let text = [text.r(), text.g(), text.b()];

    (0..=255u32).any(|t| {
        let blend = |a: u8, b: u8| ((a as u32 * (255 - t) + b as u32 * t + 127) / 255) as u8;
        [
            blend(fill[0], text[0]),
            blend(fill[1], text[1]),
            blend(fill[2], text[2]),
        ] == key
    })
}
