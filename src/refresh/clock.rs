//! Injectable wall-clock source.

use chrono::{DateTime, Utc};

/// A source of the current instant.
///
/// The refresh coordinator takes its notion of "now" through this trait so
/// staleness behaviour is testable without waiting on a real clock.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
