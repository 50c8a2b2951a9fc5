//! Simulated clock for deterministic retry timing tests.
//!
//! Sleeping advances the clock instantly; a `ClockDeadline` fires once the
//! simulated time reaches its instant.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use retrier_core::retry::{Cancellation, Sleeper};

#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<Duration>,
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    pub fn deadline_at(&self, at: Duration) -> ClockDeadline<'_> {
        ClockDeadline { clock: self, at }
    }
}

impl Sleeper for FakeClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.now.set(self.now.get() + duration);
    }
}

pub struct ClockDeadline<'a> {
    clock: &'a FakeClock,
    at: Duration,
}

impl Cancellation for ClockDeadline<'_> {
    fn is_cancelled(&self) -> bool {
        self.clock.now() >= self.at
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
