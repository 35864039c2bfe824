//! Two self-renewing timers polled from the UI event loop.
//!
//! Each task re-arms relative to the moment it fired, before its action
//! runs, so a failing action never stops later firings. There is no
//! catch-up: a poll that arrives late fires a task once.

use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::warn;

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Clock refresh
    Tick,

    /// Focus reminder
    Notify,
}

/// A (delay, task) pair that schedules its own successor.
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    kind: TaskKind,
    period: Duration,
    next_due: Instant,
}

impl PeriodicTask {
    /// First firing one period after `now`.
    pub fn delayed(kind: TaskKind, period: Duration, now: Instant) -> Self {
        Self {
            kind,
            period,
            next_due: now + period,
        }
    }

    /// First firing on the next poll.
    pub fn immediate(kind: TaskKind, period: Duration, now: Instant) -> Self {
        Self {
            kind,
            period,
            next_due: now,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    fn rearm(&mut self, now: Instant) {
        self.next_due = now + self.period;
    }
}

/// Holds the tick and notify tasks for the lifetime of the overlay.
#[derive(Debug, Clone)]
pub struct Scheduler {
    tasks: [PeriodicTask; 2],
}

impl Scheduler {
    /// Start both timers. The clock renders on the first poll, the first
    /// reminder arrives one notify interval later.
    pub fn start(tick_period: Duration, notify_period: Duration, now: Instant) -> Self {
        Self {
            tasks: [
                PeriodicTask::immediate(TaskKind::Tick, tick_period, now),
                PeriodicTask::delayed(TaskKind::Notify, notify_period, now),
            ],
        }
    }

    /// Fire every due task. Returns the number of tasks fired.
    ///
    /// Errors from `on_fire` are logged and do not affect re-arming.
    pub fn poll<F, E>(&mut self, now: Instant, mut on_fire: F) -> usize
    where
        F: FnMut(TaskKind) -> Result<(), E>,
        E: Display,
    {
        let mut fired = 0;
        for task in &mut self.tasks {
            if !task.is_due(now) {
                continue;
            }
            task.rearm(now);
            fired += 1;
            if let Err(e) = on_fire(task.kind) {
                warn!(task = ?task.kind, "Scheduled task failed: {}", e);
            }
        }
        fired
    }

    /// How long the event loop may sleep before the next deadline.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.tasks
            .iter()
            .map(|t| t.next_due.saturating_duration_since(now))
            .min()
            .unwrap_or_default()
    }

    pub fn task(&self, kind: TaskKind) -> Option<&PeriodicTask> {
        self.tasks.iter().find(|t| t.kind == kind)
    }
}
