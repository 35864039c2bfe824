//! Application state and lifecycle management.
//!
//! Owns the overlay window state and wires the scheduler, clock, quotes,
//! dispatcher, and pointer handling into the eframe event loop.

use crate::config::{ConfigError, OverlayConfig, TransparencyMode};
use crate::focus::{ClockSource, QuoteStore, Scheduler, TaskKind};
use crate::notify::{DesktopNotifier, Dispatcher, Notice, NotifyError};
use crate::platform;
use crate::ui::{DragController, RenderSurface, Theme};
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const WINDOW_TITLE: &str = "Focus Clock";

/// Errors that prevent the overlay from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Notification dispatcher unavailable: {0}")]
    Notify(#[from] NotifyError),
}

/// Geometry of the single overlay window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Top-left corner in screen points
    pub position: egui::Pos2,

    /// Fixed after creation
    pub size: egui::Vec2,
}

impl Overlay {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            position: config.position,
            size: config.window_size,
        }
    }

    /// Borderless, fixed-size, always-on-top viewport.
    pub fn viewport(&self, transparent: bool) -> egui::ViewportBuilder {
        egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(self.size)
            .with_position(self.position)
            .with_decorations(false)
            .with_resizable(false)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_transparent(transparent)
    }

    /// Keep the window fully on a screen of `screen` size. Returns true if
    /// the position changed.
    pub fn clamp_to_screen(&mut self, screen: egui::Vec2) -> bool {
        let max = (screen - self.size).max(egui::Vec2::ZERO);
        let clamped = egui::pos2(
            self.position.x.clamp(0.0, max.x),
            self.position.y.clamp(0.0, max.y),
        );
        let changed = clamped != self.position;
        self.position = clamped;
        changed
    }
}

/// Main application state.
pub struct OverlayApp {
    config: OverlayConfig,
    overlay: Overlay,
    surface: RenderSurface,
    scheduler: Scheduler,
    clock: ClockSource,
    quotes: QuoteStore,
    dispatcher: Dispatcher,
    drag: DragController,
    rng: StdRng,
    initialized: bool,
}

impl OverlayApp {
    /// Create the overlay for a window whose transparency was already
    /// resolved against the platform.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: OverlayConfig,
        transparency: TransparencyMode,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let quotes = QuoteStore::new(config.quotes.iter().cloned())?;
        let dispatcher = Dispatcher::spawn(DesktopNotifier::default())?;

        Theme::from_config(&config).apply(&cc.egui_ctx);

        let native_alpha = platform::supports_window_alpha();
        match transparency {
            TransparencyMode::ColorKey(key) => {
                if let Err(e) = platform::apply_color_key(cc, key, config.opacity) {
                    warn!("Color key not applied, background stays visible: {}", e);
                }
            }
            TransparencyMode::WholeWindowAlpha(opacity) if native_alpha => {
                if let Err(e) = platform::apply_alpha(cc, opacity) {
                    warn!("Window opacity not applied, overlay stays opaque: {}", e);
                }
            }
            TransparencyMode::WholeWindowAlpha(_) => {}
        }

        let surface = RenderSurface::new(&config, transparency).with_native_alpha(native_alpha);
        let scheduler = Scheduler::start(config.tick_interval, config.notify_interval, Instant::now());

        Ok(Self {
            overlay: Overlay::from_config(&config),
            config,
            surface,
            scheduler,
            clock: ClockSource::default(),
            quotes,
            dispatcher,
            drag: DragController::new(),
            rng: StdRng::from_entropy(),
            initialized: false,
        })
    }

    /// First-frame setup that needs live viewport information.
    fn initialize(&mut self, ctx: &egui::Context) {
        self.initialized = true;

        if let Some(screen) = ctx.input(|i| i.viewport().monitor_size) {
            debug!(width = screen.x, height = screen.y, "Primary screen");
            if self.overlay.clamp_to_screen(screen) {
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(self.overlay.position));
            }
        }
    }

    /// Feed pointer input to the drag controller and forward the resulting
    /// window commands. Returns true once the overlay has been asked to close.
    fn handle_pointer(&mut self, ctx: &egui::Context) -> bool {
        let fallback = self.overlay.position;
        let now = Instant::now();
        let commands = ctx.input(|i| self.drag.commands_for(i, fallback, now));

        let mut closing = false;
        for command in commands {
            match command {
                egui::ViewportCommand::Close => {
                    info!("Double-click, closing overlay");
                    closing = true;
                }
                egui::ViewportCommand::OuterPosition(target) => self.overlay.position = target,
                _ => {}
            }
            ctx.send_viewport_cmd(command);
        }
        closing
    }

    /// Run due timers: refresh the clock, dispatch reminders.
    fn run_schedule(&mut self, now: Instant) {
        let Self {
            config,
            surface,
            scheduler,
            clock,
            quotes,
            dispatcher,
            rng,
            ..
        } = self;

        scheduler.poll(now, |kind| match kind {
            TaskKind::Tick => {
                surface.set_text(&clock.now());
                Ok(())
            }
            TaskKind::Notify => {
                let quote = quotes.pick(&mut *rng);
                dispatcher.notify(Notice::new(
                    config.notification_title.as_str(),
                    quote,
                    config.notification_timeout,
                ))
            }
        });
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.initialized {
            self.initialize(ctx);
        }

        if self.handle_pointer(ctx) {
            return;
        }

        self.run_schedule(Instant::now());

        if let Err(e) = self.surface.ensure_dock(ctx, self.overlay.size) {
            warn!("Dock not drawn this frame: {}", e);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.surface.paint(ui));

        ctx.request_repaint_after(self.scheduler.time_until_next(Instant::now()));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.surface.clear_color()
    }
}

/// Open the overlay and block until it is closed.
pub fn run(config: OverlayConfig) -> anyhow::Result<()> {
    config.validate()?;

    let transparency = config
        .transparency
        .resolve(platform::supports_color_key(), config.opacity);
    if transparency != config.transparency {
        warn!("Color key unsupported here, using whole-window alpha");
    }

    info!(
        variant = ?config.variant,
        interval_secs = config.notify_interval.as_secs(),
        quotes = config.quotes.len(),
        "Starting focus overlay"
    );

    // Layered windows take their opacity from the compositor; elsewhere the
    // alpha is painted into a transparent framebuffer
    let transparent = !transparency.is_color_key() && !platform::supports_window_alpha();
    let overlay = Overlay::from_config(&config);
    let options = eframe::NativeOptions {
        viewport: overlay.viewport(transparent),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| match OverlayApp::new(cc, config, transparency) {
            Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
            Err(e) => Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }),
    )
    .map_err(|e| anyhow::anyhow!("Overlay window failed: {e}"))
}
