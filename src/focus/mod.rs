//! Focus logic: quotes, the wall clock, and the reminder schedule.
//!
//! Nothing in here touches the window; the UI layer polls the scheduler
//! and reacts to the tasks it reports.

pub mod clock;
pub mod quotes;
pub mod scheduler;

pub use clock::{ClockSource, LocalClock, WallClock};
pub use quotes::QuoteStore;
pub use scheduler::{PeriodicTask, Scheduler, TaskKind};
