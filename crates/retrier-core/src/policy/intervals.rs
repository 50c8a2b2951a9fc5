//! Interval progression between attempts.
//!
//! Each step multiplies the previous interval by the policy coefficient. When
//! the policy has a cap, a step that would overshoot is clamped to the cap and
//! an interval already at the cap stays there. The cap is reapplied on every
//! step from the previous actual interval.

use std::time::Duration;

use super::Limit;

/// Endless iterator over the delays a policy inserts between attempts.
///
/// The first item is the policy's initial interval.
#[derive(Debug, Clone)]
pub struct Intervals {
    next: Duration,
    max_interval: Limit<Duration>,
    coefficient: f64,
}

impl Intervals {
    pub fn new(initial: Duration, max_interval: Limit<Duration>, coefficient: f64) -> Self {
        Self {
            next: initial,
            max_interval,
            coefficient,
        }
    }

    /// Returns the current interval and steps to the next one.
    pub fn advance(&mut self) -> Duration {
        let current = self.next;
        self.next = next_interval(current, self.max_interval, self.coefficient);
        current
    }
}

impl Iterator for Intervals {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.advance())
    }
}

fn next_interval(current: Duration, max_interval: Limit<Duration>, coefficient: f64) -> Duration {
    let max = match max_interval {
        Limit::Unbounded => return scale(current, coefficient),
        Limit::Bounded(max) => max,
    };
    if current == max {
        return current;
    }
    scale(current, coefficient).min(max)
}

/// `current * coefficient` on whole nanoseconds; saturates at `Duration::MAX`.
fn scale(current: Duration, coefficient: f64) -> Duration {
    let nanos = current.as_nanos() as f64 * coefficient;
    if nanos >= u64::MAX as f64 {
        // f64 seconds lose sub-microsecond precision out here; growth must not round down.
        let scaled = Duration::try_from_secs_f64(current.as_secs_f64() * coefficient)
            .unwrap_or(Duration::MAX);
        return if coefficient >= 1.0 { scaled.max(current) } else { scaled };
    }
    // NaN maps to 0.
    Duration::from_nanos(nanos as u64)
}
