//! UI module for the overlay window.
//!
//! This module provides the render surface, the dock artwork, pointer
//! handling, and styling.

pub mod dock;
pub mod drag;
pub mod surface;
pub mod theme;

pub use drag::{DragController, PressOutcome};
pub use surface::{Layers, RenderError, RenderSurface};
pub use theme::Theme;
