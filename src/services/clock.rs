use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::time::Instant;

/// Source of the local wall-clock time, swappable for tests and `--at`.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Starts at a chosen instant and advances with the Tokio clock, so paused
/// test time and `--at` both move forward naturally.
pub struct OffsetClock {
    start: NaiveDateTime,
    reference: Instant,
}

impl OffsetClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            reference: Instant::now(),
        }
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = TimeDelta::from_std(self.reference.elapsed()).unwrap_or(TimeDelta::zero());
        self.start + elapsed
    }
}
