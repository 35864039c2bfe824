//! Wall-clock readings formatted for the overlay.

use chrono::{Local, NaiveTime};

/// Source of the current local time of day.
pub trait WallClock {
    fn local_time(&self) -> NaiveTime;
}

/// Host clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Produces `HH:MM:SS` readings from a [`WallClock`].
#[derive(Debug, Clone, Default)]
pub struct ClockSource<C = LocalClock> {
    clock: C,
}

impl<C: WallClock> ClockSource<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Current reading, 24-hour and zero-padded.
    pub fn now(&self) -> String {
        format_reading(self.clock.local_time())
    }
}

pub fn format_reading(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
