//! Render surface for the clock overlay.
//!
//! Holds the current text and the dock texture. Painting happens once per
//! frame; the text only changes through [`RenderSurface::set_text`].

use super::dock::{self, Edge};
use crate::config::{OverlayConfig, TransparencyMode, Variant};
use eframe::egui::{self, Color32, ColorImage, FontId, TextureHandle, TextureOptions};
use thiserror::Error;

/// Render error types. A failed draw costs one frame, nothing more.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot draw on an empty {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },
}

/// The overlay's drawing state.
pub struct RenderSurface {
    variant: Variant,
    transparency: TransparencyMode,
    text: String,
    font: FontId,
    text_color: Color32,
    fill_color: Color32,
    /// The compositor applies whole-window opacity, so layers stay opaque
    native_alpha: bool,
    /// Pill artwork, uploaded once and redrawn in place
    dock: Option<TextureHandle>,
}

impl RenderSurface {
    /// Create the surface for an already resolved transparency mode.
    pub fn new(config: &OverlayConfig, transparency: TransparencyMode) -> Self {
        Self {
            variant: config.variant,
            transparency,
            text: String::new(),
            font: FontId::monospace(config.font_size),
            text_color: config.text_color,
            fill_color: config.fill_color,
            native_alpha: false,
            dock: None,
        }
    }

    /// Declare whether the window itself is rendered at the configured
    /// opacity. Without it, alpha is baked into the painted colors.
    pub fn with_native_alpha(mut self, native_alpha: bool) -> Self {
        self.native_alpha = native_alpha;
        self
    }

    /// Replace the displayed text. Returns true if it changed and a repaint
    /// is needed.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn transparency(&self) -> TransparencyMode {
        self.transparency
    }

    pub fn has_dock(&self) -> bool {
        self.dock.is_some()
    }

    /// Rasterize the pill at `size_px` physical pixels. Reuses the existing
    /// texture when called again.
    pub fn draw_dock(
        &mut self,
        ctx: &egui::Context,
        size_px: [u32; 2],
        corner: Color32,
        fill: Color32,
    ) -> Result<(), RenderError> {
        let edge = Edge::for_corner(corner);
        let art = dock::rasterize_pill(size_px[0], size_px[1], fill, edge)?;
        let image = ColorImage::from_rgba_unmultiplied(
            [size_px[0] as usize, size_px[1] as usize],
            art.as_raw(),
        );

        // Filtering would blend the corner key into the pill outline
        let options = match edge {
            Edge::Hard { .. } => TextureOptions::NEAREST,
            Edge::Smooth => TextureOptions::LINEAR,
        };

        match &mut self.dock {
            Some(texture) => texture.set(image, options),
            None => self.dock = Some(ctx.load_texture("dock", image, options)),
        }
        Ok(())
    }

    /// Draw the dock if this variant has one and it is still missing.
    /// Called every frame so a failed draw is retried on the next one.
    pub fn ensure_dock(
        &mut self,
        ctx: &egui::Context,
        size: egui::Vec2,
    ) -> Result<(), RenderError> {
        if self.variant != Variant::Dock || self.dock.is_some() {
            return Ok(());
        }
        self.draw_dock_for(ctx, size)
    }

    /// Draw the dock for this surface's window size.
    pub fn draw_dock_for(
        &mut self,
        ctx: &egui::Context,
        size: egui::Vec2,
    ) -> Result<(), RenderError> {
        let scale = ctx.pixels_per_point();
        let size_px = [
            (size.x * scale).round() as u32,
            (size.y * scale).round() as u32,
        ];
        let corner = match self.transparency {
            TransparencyMode::ColorKey(key) => key,
            TransparencyMode::WholeWindowAlpha(_) => Color32::TRANSPARENT,
        };
        self.draw_dock(ctx, size_px, corner, self.fill_color)
    }

    /// Color the window is cleared to before painting.
    pub fn clear_color(&self) -> [f32; 4] {
        match self.transparency {
            TransparencyMode::ColorKey(key) => key.to_normalized_gamma_f32(),
            TransparencyMode::WholeWindowAlpha(_) if self.native_alpha => {
                self.fill_color.to_normalized_gamma_f32()
            }
            TransparencyMode::WholeWindowAlpha(_) => [0.0; 4],
        }
    }

    /// Colors handed to the painter for the background and the text.
    ///
    /// When the opacity has to be baked in, only the fill carries alpha.
    /// The text is an additive color (alpha 0) holding the difference
    /// between the dimmed text and the dimmed fill, so a glyph pixel over
    /// the fill composites to the dimmed text color at the same alpha as
    /// the background. Channels where the text is darker than the fill
    /// saturate at the fill.
    pub fn layers(&self) -> Layers {
        match self.transparency {
            TransparencyMode::WholeWindowAlpha(opacity) if !self.native_alpha => {
                let fill = self.fill_color.gamma_multiply(opacity);
                let text = self.text_color.gamma_multiply(opacity);
                Layers {
                    fill,
                    text: Color32::from_rgb_additive(
                        text.r().saturating_sub(fill.r()),
                        text.g().saturating_sub(fill.g()),
                        text.b().saturating_sub(fill.b()),
                    ),
                }
            }
            _ => Layers {
                fill: self.fill_color,
                text: self.text_color,
            },
        }
    }

    /// Paint one frame into `ui`.
    pub fn paint(&self, ui: &egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        let layers = self.layers();

        // Without a color key there is no way to hide the window corners
        let square = self.variant == Variant::Label
            || matches!(self.transparency, TransparencyMode::WholeWindowAlpha(_));
        if square {
            painter.rect_filled(rect, 0.0, layers.fill);
        } else if let Some(texture) = &self.dock {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }

        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            &self.text,
            self.font.clone(),
            layers.text,
        );
    }
}

/// Painted colors for one frame, bottom layer first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layers {
    pub fill: Color32,
    pub text: Color32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform;

    fn dock_surface() -> RenderSurface {
        let config = OverlayConfig::dock();
        RenderSurface::new(&config, config.transparency)
    }

    #[test]
    fn test_set_text_is_idempotent() {
        let mut surface = RenderSurface::new(&OverlayConfig::label(), TransparencyMode::WholeWindowAlpha(0.6));
        assert!(surface.set_text("09:05:03"));
        assert!(!surface.set_text("09:05:03"));
        assert!(surface.set_text("09:05:04"));
        assert_eq!(surface.text(), "09:05:04");
    }

    #[test]
    fn test_redraw_reuses_dock_texture() {
        let ctx = egui::Context::default();
        let mut surface = dock_surface();
        assert!(!surface.has_dock());

        surface.draw_dock_for(&ctx, egui::vec2(120.0, 34.0)).unwrap();
        let first = surface.dock.as_ref().map(|t| t.id());

        surface.draw_dock_for(&ctx, egui::vec2(120.0, 34.0)).unwrap();
        let second = surface.dock.as_ref().map(|t| t.id());

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_dock_is_an_error() {
        let ctx = egui::Context::default();
        let mut surface = dock_surface();
        let result = surface.draw_dock(&ctx, [0, 0], Color32::BLACK, Color32::BLACK);
        assert!(result.is_err());
        assert!(!surface.has_dock());
    }

    #[test]
    fn test_clear_color_matches_mode() {
        assert_eq!(dock_surface().clear_color(), [0.0, 0.0, 1.0 / 255.0, 1.0]);

        let label = RenderSurface::new(&OverlayConfig::label(), TransparencyMode::WholeWindowAlpha(0.6));
        assert_eq!(label.clear_color(), [0.0; 4]);
        assert_eq!(label.with_native_alpha(true).clear_color(), [0.0, 0.0, 0.0, 1.0]);
    }

    /// Premultiplied source-over, as the GPU blends each painted layer.
    fn over(dst: Color32, src: Color32) -> Color32 {
        let keep = 255 - u32::from(src.a());
        let blend = |s: u8, d: u8| (u32::from(s) + (u32::from(d) * keep + 127) / 255).min(255) as u8;
        Color32::from_rgba_premultiplied(
            blend(src.r(), dst.r()),
            blend(src.g(), dst.g()),
            blend(src.b(), dst.b()),
            blend(src.a(), dst.a()),
        )
    }

    #[test]
    fn test_glyph_over_fill_keeps_window_opacity() {
        let label = RenderSurface::new(&OverlayConfig::label(), TransparencyMode::WholeWindowAlpha(0.6));
        let layers = label.layers();
        let opacity = platform::opacity_byte(0.6);

        let background = over(Color32::TRANSPARENT, layers.fill);
        let glyph = over(background, layers.text);
        assert_eq!(background.a(), opacity);
        assert_eq!(glyph.a(), opacity);
        assert_eq!(glyph, Color32::WHITE.gamma_multiply(0.6));

        // Anti-aliased glyph edge: text drawn at half coverage
        let edge = over(background, layers.text.gamma_multiply(0.5));
        assert_eq!(edge.a(), opacity);
        assert!(edge.r() > background.r() && edge.r() < glyph.r());
    }

    #[test]
    fn test_colored_text_over_colored_fill() {
        let config = OverlayConfig {
            text_color: Color32::from_rgb(250, 200, 40),
            fill_color: Color32::from_rgb(20, 40, 60),
            ..OverlayConfig::label()
        };
        let label = RenderSurface::new(&config, TransparencyMode::WholeWindowAlpha(0.6));
        let layers = label.layers();

        let glyph = over(over(Color32::TRANSPARENT, layers.fill), layers.text);
        assert_eq!(glyph.a(), platform::opacity_byte(0.6));
        assert_eq!(glyph.r(), config.text_color.gamma_multiply(0.6).r());
        assert_eq!(glyph.g(), config.text_color.gamma_multiply(0.6).g());
        // Darker than the fill: the blue channel stays at the fill
        assert_eq!(glyph.b(), config.fill_color.gamma_multiply(0.6).b());
    }

    #[test]
    fn test_native_alpha_paints_opaque_layers() {
        let label = RenderSurface::new(&OverlayConfig::label(), TransparencyMode::WholeWindowAlpha(0.6))
            .with_native_alpha(true);
        let layers = label.layers();
        assert_eq!(layers.fill, Color32::BLACK);
        assert_eq!(layers.text, Color32::WHITE);

        let dock = dock_surface().layers();
        assert_eq!(dock.text, Color32::WHITE);
    }

    #[test]
    fn test_dock_retried_until_drawn() {
        let ctx = egui::Context::default();
        let mut surface = dock_surface();

        assert!(surface.ensure_dock(&ctx, egui::vec2(0.0, 0.0)).is_err());
        assert!(!surface.has_dock());

        surface.ensure_dock(&ctx, egui::vec2(120.0, 34.0)).unwrap();
        let drawn = surface.dock.as_ref().map(|t| t.id());
        assert!(drawn.is_some());

        surface.ensure_dock(&ctx, egui::vec2(120.0, 34.0)).unwrap();
        assert_eq!(surface.dock.as_ref().map(|t| t.id()), drawn);
    }

    #[test]
    fn test_label_never_draws_dock() {
        let ctx = egui::Context::default();
        let mut label = RenderSurface::new(&OverlayConfig::label(), TransparencyMode::WholeWindowAlpha(0.6));
        label.ensure_dock(&ctx, egui::vec2(90.0, 30.0)).unwrap();
        assert!(!label.has_dock());
    }
}
