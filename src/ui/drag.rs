//! Pointer handling for the overlay: drag to move, double-press to close.

use eframe::egui::{InputState, Pos2, Vec2, ViewportCommand};
use std::time::{Duration, Instant};

/// Two presses closer than this count as a double-click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Outcome of a primary-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Anchor captured, a drag may follow
    Anchored,

    /// Clean double-press, the overlay should close
    Close,
}

/// State for the current drag. All positions are in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    /// Pointer position relative to the window origin at press time
    anchor: Vec2,
    pressed_at: Pos2,
}

/// Tracks press/drag input and turns it into window moves.
#[derive(Debug, Clone)]
pub struct DragController {
    session: Option<DragSession>,
    last_press: Option<Instant>,
    moved: bool,
    double_click_interval: Duration,
}

impl DragController {
    pub fn new() -> Self {
        Self::with_interval(DOUBLE_CLICK_INTERVAL)
    }

    pub fn with_interval(double_click_interval: Duration) -> Self {
        Self {
            session: None,
            last_press: None,
            moved: false,
            double_click_interval,
        }
    }

    /// Handle a press at `pointer` while the window sits at `window_origin`.
    pub fn press(&mut self, now: Instant, pointer: Pos2, window_origin: Pos2) -> PressOutcome {
        let within_interval = self
            .last_press
            .is_some_and(|last| now.saturating_duration_since(last) <= self.double_click_interval);

        if within_interval && !self.moved {
            self.session = None;
            self.last_press = None;
            return PressOutcome::Close;
        }

        self.session = Some(DragSession {
            anchor: pointer - window_origin,
            pressed_at: pointer,
        });
        self.last_press = Some(now);
        self.moved = false;
        PressOutcome::Anchored
    }

    /// New window origin for a drag to `pointer`, if a drag is under way.
    ///
    /// Always derived from the anchor, never accumulated.
    pub fn drag_to(&mut self, pointer: Pos2) -> Option<Pos2> {
        let session = self.session?;
        if pointer != session.pressed_at {
            self.moved = true;
        }
        self.moved.then(|| pointer - session.anchor)
    }

    /// Forget the current drag. The double-click window stays open.
    pub fn release(&mut self) {
        self.session = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Translate one frame of pointer input into window commands.
    ///
    /// egui reports the pointer relative to the window, so it is lifted to
    /// screen coordinates through the window's outer rect. `fallback_origin`
    /// stands in when the backend does not report that rect. A move is
    /// only emitted when the target differs from the current origin.
    pub fn commands_for(
        &mut self,
        input: &InputState,
        fallback_origin: Pos2,
        now: Instant,
    ) -> Vec<ViewportCommand> {
        let pointer = &input.pointer;
        let mut commands = Vec::new();

        if let Some(local) = pointer.latest_pos() {
            let origin = input
                .viewport()
                .outer_rect
                .map_or(fallback_origin, |rect| rect.min);
            let screen = origin + local.to_vec2();

            if pointer.primary_pressed() {
                if self.press(now, screen, origin) == PressOutcome::Close {
                    commands.push(ViewportCommand::Close);
                    return commands;
                }
            } else if pointer.primary_down() {
                if let Some(target) = self.drag_to(screen) {
                    if target != origin {
                        commands.push(ViewportCommand::OuterPosition(target));
                    }
                }
            }
        }

        if pointer.primary_released() {
            self.release();
        }
        commands
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{self, pos2, Event, PointerButton, RawInput, Rect, ViewportId, ViewportInfo};

    const WINDOW: Pos2 = pos2(683.0, 0.0);

    /// Feeds raw input frames through an egui context.
    struct Frames {
        ctx: egui::Context,
        drag: DragController,
        window: Pos2,
    }

    impl Frames {
        fn new() -> Self {
            Self {
                ctx: egui::Context::default(),
                drag: DragController::new(),
                window: WINDOW,
            }
        }

        /// Run one frame with `events` given in screen coordinates. Moves
        /// the window like the backend would.
        fn run(&mut self, now: Instant, events: &[(Pos2, Option<bool>)]) -> Vec<ViewportCommand> {
            let mut raw = RawInput::default();
            raw.viewports.insert(
                ViewportId::ROOT,
                ViewportInfo {
                    outer_rect: Some(Rect::from_min_size(self.window, egui::vec2(90.0, 30.0))),
                    ..Default::default()
                },
            );
            for &(screen, button) in events {
                let pos = screen - self.window.to_vec2();
                raw.events.push(Event::PointerMoved(pos));
                if let Some(pressed) = button {
                    raw.events.push(Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed,
                        modifiers: egui::Modifiers::NONE,
                    });
                }
            }

            let mut commands = Vec::new();
            let Self { ctx, drag, window } = self;
            let _ = ctx.run(raw, |ctx| {
                commands = ctx.input(|i| drag.commands_for(i, *window, now));
            });

            for command in &commands {
                if let ViewportCommand::OuterPosition(target) = command {
                    self.window = *target;
                }
            }
            commands
        }
    }

    fn closes(commands: &[ViewportCommand]) -> bool {
        commands.iter().any(|c| matches!(c, ViewportCommand::Close))
    }

    #[test]
    fn test_drag_follows_pointer_from_anchor() {
        let mut drag = DragController::new();
        let now = Instant::now();
        let (px0, py0) = (700.0, 12.0);
        let (wx0, wy0) = (683.0, 0.0);

        drag.press(now, pos2(px0, py0), pos2(wx0, wy0));

        let (px1, py1) = (910.0, 340.0);
        let origin = drag.drag_to(pos2(px1, py1));
        assert_eq!(origin, Some(pos2(wx0 + px1 - px0, wy0 + py1 - py0)));
    }

    #[test]
    fn test_repeated_moves_do_not_accumulate() {
        let mut drag = DragController::new();
        drag.press(Instant::now(), pos2(10.0, 10.0), pos2(0.0, 0.0));

        for _ in 0..50 {
            drag.drag_to(pos2(40.0, 25.0));
        }
        assert_eq!(drag.drag_to(pos2(40.0, 25.0)), Some(pos2(30.0, 15.0)));
        assert_eq!(drag.drag_to(pos2(10.0, 10.0)), Some(pos2(0.0, 0.0)));
    }

    #[test]
    fn test_no_move_without_press() {
        let mut drag = DragController::new();
        assert_eq!(drag.drag_to(pos2(5.0, 5.0)), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_stationary_pointer_does_not_move_window() {
        let mut drag = DragController::new();
        drag.press(Instant::now(), pos2(5.0, 5.0), pos2(0.0, 0.0));
        assert_eq!(drag.drag_to(pos2(5.0, 5.0)), None);
    }

    #[test]
    fn test_clean_double_press_closes() {
        let mut drag = DragController::new();
        let now = Instant::now();
        assert_eq!(
            drag.press(now, pos2(5.0, 5.0), pos2(0.0, 0.0)),
            PressOutcome::Anchored
        );
        drag.release();
        assert_eq!(
            drag.press(now + Duration::from_millis(200), pos2(5.0, 5.0), pos2(0.0, 0.0)),
            PressOutcome::Close
        );
    }

    #[test]
    fn test_drag_between_presses_prevents_close() {
        let mut drag = DragController::new();
        let now = Instant::now();
        drag.press(now, pos2(5.0, 5.0), pos2(0.0, 0.0));
        drag.drag_to(pos2(6.0, 5.0));
        drag.release();

        let outcome = drag.press(now + Duration::from_millis(200), pos2(6.0, 5.0), pos2(1.0, 0.0));
        assert_eq!(outcome, PressOutcome::Anchored);
    }

    #[test]
    fn test_slow_presses_do_not_close() {
        let mut drag = DragController::new();
        let now = Instant::now();
        drag.press(now, pos2(5.0, 5.0), pos2(0.0, 0.0));
        let outcome = drag.press(now + Duration::from_millis(800), pos2(5.0, 5.0), pos2(0.0, 0.0));
        assert_eq!(outcome, PressOutcome::Anchored);
    }

    #[test]
    fn test_triple_press_closes_once() {
        let mut drag = DragController::new();
        let now = Instant::now();
        let step = Duration::from_millis(100);
        drag.press(now, pos2(5.0, 5.0), pos2(0.0, 0.0));
        assert_eq!(
            drag.press(now + step, pos2(5.0, 5.0), pos2(0.0, 0.0)),
            PressOutcome::Close
        );
        assert_eq!(
            drag.press(now + step * 2, pos2(5.0, 5.0), pos2(0.0, 0.0)),
            PressOutcome::Anchored
        );
    }

    #[test]
    fn test_input_press_then_move_positions_window() {
        let mut frames = Frames::new();
        let now = Instant::now();
        let (px0, py0) = (700.0, 12.0);
        let (px1, py1) = (910.0, 340.0);

        assert!(frames.run(now, &[(pos2(px0, py0), Some(true))]).is_empty());

        let commands = frames.run(now + Duration::from_millis(16), &[(pos2(px1, py1), None)]);
        assert_eq!(
            commands,
            vec![ViewportCommand::OuterPosition(pos2(
                WINDOW.x + px1 - px0,
                WINDOW.y + py1 - py0
            ))]
        );

        // Pointer stays put relative to the moved window: no further move
        let commands = frames.run(now + Duration::from_millis(32), &[(pos2(px1, py1), None)]);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_input_press_drag_press_does_not_close() {
        let mut frames = Frames::new();
        let now = Instant::now();
        let step = Duration::from_millis(50);

        frames.run(now, &[(pos2(700.0, 12.0), Some(true))]);
        let moved = frames.run(now + step, &[(pos2(720.0, 20.0), None)]);
        assert!(matches!(moved.as_slice(), [ViewportCommand::OuterPosition(_)]));
        frames.run(now + step * 2, &[(pos2(720.0, 20.0), Some(false))]);

        let commands = frames.run(now + step * 3, &[(pos2(720.0, 20.0), Some(true))]);
        assert!(!closes(&commands));
    }

    #[test]
    fn test_input_double_press_closes() {
        let mut frames = Frames::new();
        let now = Instant::now();
        let step = Duration::from_millis(50);
        let at = pos2(700.0, 12.0);

        assert!(!closes(&frames.run(now, &[(at, Some(true))])));
        frames.run(now + step, &[(at, Some(false))]);

        let commands = frames.run(now + step * 2, &[(at, Some(true))]);
        assert_eq!(commands, vec![ViewportCommand::Close]);
    }
}
