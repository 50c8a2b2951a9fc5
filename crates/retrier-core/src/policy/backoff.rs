//! Exponential backoff policy and its builder.

use std::time::Duration;

use super::{
    resolve_coefficient, resolve_interval, resolve_max_attempts, resolve_max_interval, Limit,
};

/// Exponential backoff: after each failed attempt the interval is multiplied
/// by `coefficient`, capped at `max_interval` unless that is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    initial_interval: Duration,
    max_interval: Limit<Duration>,
    max_attempts: Limit<u64>,
    coefficient: f64,
}

impl BackoffPolicy {
    pub fn initial_interval(&self) -> Duration {
        self.initial_interval
    }

    pub fn max_interval(&self) -> Limit<Duration> {
        self.max_interval
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> Limit<u64> {
        self.max_attempts
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn has_unlimited_max_interval(&self) -> bool {
        self.max_interval.is_unbounded()
    }

    pub fn is_attempting_indefinitely(&self) -> bool {
        self.max_attempts.is_unbounded()
    }
}

/// Value builder for [`BackoffPolicy`].
///
/// Every `with_*` call returns a new builder; copies held elsewhere are
/// unaffected. Unset fields resolve to their defaults in [`build`](Self::build).
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct BackoffPolicyBuilder {
    initial_interval: Duration,
    max_interval: Limit<Duration>,
    max_attempts: i64,
    coefficient: f64,
}

impl Default for BackoffPolicyBuilder {
    fn default() -> Self {
        Self {
            initial_interval: Duration::ZERO,
            max_interval: Limit::Bounded(Duration::ZERO),
            max_attempts: 0,
            coefficient: 0.0,
        }
    }
}

impl BackoffPolicyBuilder {
    /// Zero falls back to 1s.
    pub fn with_initial_interval(self, initial_interval: Duration) -> Self {
        Self {
            initial_interval,
            ..self
        }
    }

    /// Zero falls back to 30s.
    pub fn with_max_interval(self, max_interval: Duration) -> Self {
        Self {
            max_interval: Limit::Bounded(max_interval),
            ..self
        }
    }

    pub fn with_max_interval_unlimited(self) -> Self {
        Self {
            max_interval: Limit::Unbounded,
            ..self
        }
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

    /// Non-positive (or non-finite) values fall back to 2.0.
    pub fn with_coefficient(self, coefficient: f64) -> Self {
        Self {
            coefficient,
            ..self
        }
    }

    pub fn build(&self) -> BackoffPolicy {
        BackoffPolicy {
            initial_interval: resolve_interval(self.initial_interval),
            max_interval: resolve_max_interval(self.max_interval),
            max_attempts: resolve_max_attempts(self.max_attempts),
            coefficient: resolve_coefficient(self.coefficient),
        }
    }
}
