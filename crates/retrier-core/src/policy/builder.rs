//! Builder entry point: pick a policy shape, then configure it.

use super::backoff::BackoffPolicyBuilder;
use super::fixed_delay::FixedDelayPolicyBuilder;

/// Entry point returned by [`policy`]. Selecting a shape consumes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyBuilder {
    _private: (),
}

/// Start building a retry policy.
///
/// ```
/// use std::time::Duration;
/// use retrier_core::policy;
///
/// let p = policy()
///     .backoff()
///     .with_initial_interval(Duration::from_millis(100))
///     .with_max_attempts(5)
///     .build();
/// assert_eq!(p.initial_interval(), Duration::from_millis(100));
/// ```
pub fn policy() -> PolicyBuilder {
    PolicyBuilder::default()
}

impl PolicyBuilder {
    /// Exponential backoff: the interval is multiplied by a coefficient after each failure.
    pub fn backoff(self) -> BackoffPolicyBuilder {
        BackoffPolicyBuilder::default()
    }

    /// Constant interval between attempts.
    pub fn fixed_delay(self) -> FixedDelayPolicyBuilder {
        FixedDelayPolicyBuilder::default()
    }
}
