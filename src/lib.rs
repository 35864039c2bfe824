//! Focus Overlay - Library
//!
//! A borderless, always-on-top desktop clock that periodically fires a
//! focus reminder with a random motivational quote.
//!
//! ## Features
//!
//! - Live `HH:MM:SS` clock refreshed every second
//! - Desktop notification every few minutes, delivered off the UI thread
//! - Plain translucent label or rounded color-keyed dock
//! - Drag anywhere to move, double-click to close

pub mod app;
pub mod config;
pub mod focus;
pub mod logging;
pub mod notify;
pub mod platform;
pub mod ui;

pub use app::{Overlay, OverlayApp, StartupError};
pub use config::{ConfigError, OverlayConfig, TransparencyMode, Variant};
pub use focus::{ClockSource, QuoteStore, Scheduler, TaskKind};
pub use notify::{DesktopNotifier, Dispatcher, Notice, NotificationBackend, NotifyError};
pub use ui::{DragController, PressOutcome, RenderSurface};
