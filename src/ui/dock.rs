//! Software rasterizer for the pill-shaped dock.
//!
//! The pill is a horizontal round-capped line as thick as the canvas is
//! tall. It is rasterized once per size and uploaded as a texture.

use super::surface::RenderError;
use eframe::egui::Color32;
use image::{Rgba, RgbaImage};

/// How pixels straddling the pill outline are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Coverage goes into alpha. Only valid over a per-pixel-alpha window.
    Smooth,

    /// Every pixel is either the fill or this opaque corner color. Required
    /// under color-key transparency, where blends would be visible fringes.
    Hard { corner: Color32 },
}

impl Edge {
    /// Opaque corner colors need hard edges, translucent ones allow blending.
    pub fn for_corner(corner: Color32) -> Self {
        if corner.a() == u8::MAX {
            Edge::Hard { corner }
        } else {
            Edge::Smooth
        }
    }
}

/// Rasterize a `width` x `height` pill in `fill`.
pub fn rasterize_pill(
    width: u32,
    height: u32,
    fill: Color32,
    edge: Edge,
) -> Result<RgbaImage, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }

    let radius = height as f32 / 2.0;
    let (left, right) = (radius, (width as f32 - radius).max(radius));
    let mut art = RgbaImage::new(width, height);

    for (x, y, pixel) in art.enumerate_pixels_mut() {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let dx = px - px.clamp(left, right);
        let dy = py - radius;
        let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);

        *pixel = match edge {
            Edge::Smooth => Rgba([
                fill.r(),
                fill.g(),
                fill.b(),
                (coverage * 255.0).round() as u8,
            ]),
            Edge::Hard { corner } if coverage < 0.5 => {
                Rgba([corner.r(), corner.g(), corner.b(), u8::MAX])
            }
            Edge::Hard { .. } => Rgba([fill.r(), fill.g(), fill.b(), u8::MAX]),
        };
    }

    Ok(art)
}
