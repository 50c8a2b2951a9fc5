//! Fixed delay policy and its builder.

use std::time::Duration;

use super::{resolve_interval, resolve_max_attempts, Limit};

/// Constant interval between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelayPolicy {
    interval: Duration,
    max_attempts: Limit<u64>,
}

impl FixedDelayPolicy {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> Limit<u64> {
        self.max_attempts
    }

    pub fn is_attempting_indefinitely(&self) -> bool {
        self.max_attempts.is_unbounded()
    }
}

/// Value builder for [`FixedDelayPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct FixedDelayPolicyBuilder {
    interval: Duration,
    max_attempts: i64,
}

impl FixedDelayPolicyBuilder {
    /// Zero falls back to 1s.
    pub fn with_interval(self, interval: Duration) -> Self {
        Self { interval, ..self }
    }

    /// `0` falls back to 3; any negative value means attempt indefinitely.
    pub fn with_max_attempts(self, max_attempts: i64) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    pub fn with_max_attempts_indefinite(self) -> Self {
        Self {
            max_attempts: -1,
            ..self
        }
    }

    pub fn build(&self) -> FixedDelayPolicy {
        FixedDelayPolicy {
            interval: resolve_interval(self.interval),
            max_attempts: resolve_max_attempts(self.max_attempts),
        }
    }
}
