//! Terminal failures of the retry loop.

use thiserror::Error;

/// Why the executor gave up.
///
/// Callers can branch on "stopped by cancellation" versus "the operation kept
/// failing". In both cases the operation's own last error is kept intact.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The cancellation signal fired before an attempt succeeded.
    /// `last_error` is `None` if it fired before the first attempt ran.
    #[error("deadline exceeded")]
    DeadlineExceeded {
        #[source]
        last_error: Option<E>,
    },
    /// The attempt budget ran out; holds the last operation error unchanged.
    #[error(transparent)]
    Exhausted(E),
}

impl<E> RetryError<E> {
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, RetryError::DeadlineExceeded { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted(_))
    }

    /// The last error returned by the operation, if any attempt ran.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            RetryError::DeadlineExceeded { last_error } => last_error.as_ref(),
            RetryError::Exhausted(e) => Some(e),
        }
    }

    pub fn into_last_error(self) -> Option<E> {
        match self {
            RetryError::DeadlineExceeded { last_error } => last_error,
            RetryError::Exhausted(e) => Some(e),
        }
    }
}
