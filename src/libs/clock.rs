//! Time source used by the cycle engine.
//!
//! Every timestamp stored on a cycle and every elapsed-time computation goes
//! through a [`Clock`], so the engine can run against the real wall clock or
//! against a [`ManualClock`] that tests move forward explicitly.
//!
//! ## Usage
//!
//! ```rust
//! use pomo::libs::clock::{Clock, ManualClock};
//! use chrono::{Duration, Local};
//!
//! let clock = ManualClock::new(Local::now());
//! let start = clock.now();
//! clock.advance(Duration::seconds(42));
//! assert_eq!((clock.now() - start).num_seconds(), 42);
//! ```

use chrono::{DateTime, Duration, Local};
use parking_lot::Mutex;

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock backed by [`Local::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to.
///
/// Shared between a test and the store through an `Arc`, so advancing it in
/// the test is immediately visible to the engine.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self { current: Mutex::new(start) }
    }

    /// Moves the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    pub fn set(&self, instant: DateTime<Local>) {
        *self.current.lock() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock()
    }
}
