//! Retry loop: invoke an operation until it succeeds, the attempt budget runs
//! out, or the cancellation signal fires.

use super::cancel::Cancellation;
use super::error::RetryError;
use super::sleep::Sleeper;
use crate::policy::{Limit, RetryPolicy};

/// Runs `operation` until it returns `Ok`, retrying per `policy`.
///
/// Before each attempt the cancellation signal is polled; if it has fired the
/// loop stops with [`RetryError::DeadlineExceeded`] carrying the last error
/// seen (if any). After a failed attempt the loop sleeps for the current
/// interval. Once a bounded attempt budget is used up, the last error is
/// returned as [`RetryError::Exhausted`]. An unbounded budget retries until
/// success or cancellation.
pub fn supply<T, E, C, S, F>(
    cancel: &C,
    sleeper: &S,
    mut operation: F,
    policy: impl Into<RetryPolicy>,
) -> Result<T, RetryError<E>>
where
    C: Cancellation + ?Sized,
    S: Sleeper + ?Sized,
    F: FnMut() -> Result<T, E>,
{
    let policy = policy.into();
    let max_attempts = policy.max_attempts();
    let mut intervals = policy.intervals();
    let mut last_error = None;
    let mut attempt = 0u64;

    loop {
        if cancel.is_cancelled() {
            tracing::debug!(attempts = attempt, "retry cancelled");
            return Err(RetryError::DeadlineExceeded { last_error });
        }

        let err = match operation() {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        attempt = attempt.saturating_add(1);

        let delay = intervals.advance();
        tracing::debug!(attempt, sleep = ?delay, max_attempts = %max_attempts, "attempt failed");
        sleeper.sleep(delay);

        if let Limit::Bounded(max) = max_attempts {
            if attempt >= max {
                tracing::debug!(attempts = attempt, "retry attempts exhausted");
                return Err(RetryError::Exhausted(err));
            }
        }
        last_error = Some(err);
    }
}

/// Error-only form of [`supply`] for operations that produce no value.
pub fn run<E, C, S, F>(
    cancel: &C,
    sleeper: &S,
    operation: F,
    policy: impl Into<RetryPolicy>,
) -> Result<(), RetryError<E>>
where
    C: Cancellation + ?Sized,
    S: Sleeper + ?Sized,
    F: FnMut() -> Result<(), E>,
{
    supply(cancel, sleeper, operation, policy)
}
