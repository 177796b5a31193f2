//! Injected time source for the search budget.
//!
//! Engines call [`Clock::restart`] at the top of a search and poll
//! [`Clock::elapsed`] at every node. `WallClock` reads `Instant`;
//! `ManualClock` lets tests decide exactly when the budget runs out.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Elapsed-time source polled by the search.
pub trait Clock {
    /// Mark the start of a new search.
    fn restart(&mut self);

    /// Time since the last restart.
    fn elapsed(&self) -> Duration;
}

/// Real monotonic clock.
#[derive(Clone, Debug)]
pub struct WallClock {
    started: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Deterministic clock that advances by a fixed step on every read.
///
/// With a zero step it stays at whatever was last set, so
/// `ManualClock::frozen_at(d)` behaves like a search that already used `d`.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    start_at: Duration,
    step: Duration,
}

impl ManualClock {
    /// Clock that never moves from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock pinned at `elapsed` after every restart.
    #[must_use]
    pub fn frozen_at(elapsed: Duration) -> Self {
        Self {
            now: Cell::new(elapsed),
            start_at: elapsed,
            step: Duration::ZERO,
        }
    }

    /// Clock that advances by `step` each time it is read.
    #[must_use]
    pub fn ticking(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            start_at: Duration::ZERO,
            step,
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn restart(&mut self) {
        self.now.set(self.start_at);
    }

    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
