//! Retry policy model.
//!
//! Two policy shapes are supported: a fixed delay between attempts and an
//! exponential backoff whose interval grows by a coefficient up to an
//! optional cap. Both are built through value builders that never fail:
//! every override, however out of range, is normalized to a defined value
//! at `build()` time. The executor only ever sees the normalized view exposed
//! by [`RetryPolicy`].

mod backoff;
mod builder;
mod fixed_delay;
mod intervals;
mod limit;

pub use backoff::{BackoffPolicy, BackoffPolicyBuilder};
pub use builder::{policy, PolicyBuilder};
pub use fixed_delay::{FixedDelayPolicy, FixedDelayPolicyBuilder};
pub use intervals::Intervals;
pub use limit::Limit;

use std::fmt;
use std::time::Duration;

/// Interval used when none (or a zero interval) is supplied.
pub const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_secs(1);
/// Backoff cap used when none (or a zero cap) is supplied.
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);
/// Attempt budget used when none (or zero) is supplied.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 3;
/// Growth factor used when the supplied coefficient is not positive.
pub const DEFAULT_COEFFICIENT: f64 = 2.0;
/// Fixed delay policies never grow.
pub const FIXED_DELAY_COEFFICIENT: f64 = 1.0;

/// A normalized retry policy, either fixed delay or exponential backoff.
///
/// The four accessors are the only thing the executor reads; for fixed delay
/// the max interval equals the interval and the coefficient is `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryPolicy {
    FixedDelay(FixedDelayPolicy),
    Backoff(BackoffPolicy),
}

impl RetryPolicy {
    /// Delay slept after the first failed attempt.
    pub fn initial_interval(&self) -> Duration {
        match self {
            RetryPolicy::FixedDelay(p) => p.interval(),
            RetryPolicy::Backoff(p) => p.initial_interval(),
        }
    }

    pub fn max_interval(&self) -> Limit<Duration> {
        match self {
            RetryPolicy::FixedDelay(p) => Limit::Bounded(p.interval()),
            RetryPolicy::Backoff(p) => p.max_interval(),
        }
    }

    pub fn max_attempts(&self) -> Limit<u64> {
        match self {
            RetryPolicy::FixedDelay(p) => p.max_attempts(),
            RetryPolicy::Backoff(p) => p.max_attempts(),
        }
    }

    pub fn coefficient(&self) -> f64 {
        match self {
            RetryPolicy::FixedDelay(_) => FIXED_DELAY_COEFFICIENT,
            RetryPolicy::Backoff(p) => p.coefficient(),
        }
    }

    /// Iterator over the delays this policy inserts between attempts.
    pub fn intervals(&self) -> Intervals {
        Intervals::new(self.initial_interval(), self.max_interval(), self.coefficient())
    }
}

impl From<FixedDelayPolicy> for RetryPolicy {
    fn from(p: FixedDelayPolicy) -> Self {
        RetryPolicy::FixedDelay(p)
    }
}

impl From<BackoffPolicy> for RetryPolicy {
    fn from(p: BackoffPolicy) -> Self {
        RetryPolicy::Backoff(p)
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryPolicy::FixedDelay(p) => write!(
                f,
                "fixed delay: interval={:?} max_attempts={}",
                p.interval(),
                p.max_attempts()
            ),
            RetryPolicy::Backoff(p) => write!(
                f,
                "backoff: initial_interval={:?} max_interval={} max_attempts={} coefficient={}",
                p.initial_interval(),
                p.max_interval(),
                p.max_attempts(),
                p.coefficient()
            ),
        }
    }
}

// Normalization shared by both builders.

fn resolve_interval(raw: Duration) -> Duration {
    if raw.is_zero() {
        DEFAULT_INITIAL_INTERVAL
    } else {
        raw
    }
}

fn resolve_max_interval(raw: Limit<Duration>) -> Limit<Duration> {
    match raw {
        Limit::Bounded(d) if d.is_zero() => Limit::Bounded(DEFAULT_MAX_INTERVAL),
        other => other,
    }
}

fn resolve_max_attempts(raw: i64) -> Limit<u64> {
    match raw {
        n if n < 0 => Limit::Unbounded,
        0 => Limit::Bounded(DEFAULT_MAX_ATTEMPTS),
        n => Limit::Bounded(n as u64),
    }
}

fn resolve_coefficient(raw: f64) -> f64 {
    // NaN fails the comparison and falls back too.
    if raw > 0.0 && raw.is_finite() {
        raw
    } else {
        DEFAULT_COEFFICIENT
    }
}
