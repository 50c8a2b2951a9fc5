//! Cancellation signals polled before every attempt.
//!
//! The executor never owns or creates a signal; it only asks whether it has
//! fired. Cancellation is level-triggered and observed at the top of the retry
//! loop, so an in-flight attempt or sleep is never interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Read-only "has this been cancelled" capability.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// Shared abort flag. Clones observe the same flag.
///
/// Hand one clone to the retry loop and keep another to call
/// [`cancel`](Self::cancel) from any thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl Cancellation for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Fires once the wall clock reaches a fixed instant.
///
/// A deadline too far out to represent as an [`Instant`] never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self { at: Some(at) }
    }

    /// Deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(timeout),
        }
    }

    /// Time left before the deadline fires (zero once it has).
    pub fn remaining(&self) -> Duration {
        match self.at {
            Some(at) => at.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}

impl Cancellation for Deadline {
    fn is_cancelled(&self) -> bool {
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}

/// Signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancellation for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: Cancellation + ?Sized> Cancellation for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<C: Cancellation + ?Sized> Cancellation for Arc<C> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
