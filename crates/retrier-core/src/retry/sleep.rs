//! Sleep capability used between attempts.

use std::time::Duration;

/// Blocks the calling thread for at least the given duration.
///
/// Inject a fake implementation to drive the executor from a simulated clock.
/// Any `Fn(Duration)` closure is a `Sleeper`.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<F> Sleeper for F
where
    F: Fn(Duration),
{
    fn sleep(&self, duration: Duration) {
        self(duration)
    }
}
