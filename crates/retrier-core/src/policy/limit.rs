//! Upper bound that may be absent (unlimited attempts, uncapped interval).

use std::fmt;

/// An upper bound on a policy field.
///
/// `Unbounded` replaces the "negative means unlimited" convention: attempts
/// that never run out, or an interval that is never capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit<T> {
    /// Bounded by the given value.
    Bounded(T),
    /// No upper bound.
    Unbounded,
}

impl<T> Limit<T> {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }

    /// The bound, or `None` when unbounded.
    pub fn bound(&self) -> Option<&T> {
        match self {
            Limit::Bounded(v) => Some(v),
            Limit::Unbounded => None,
        }
    }
}

impl<T: Copy> Limit<T> {
    pub fn get(&self) -> Option<T> {
        self.bound().copied()
    }
}

impl<T: fmt::Debug> fmt::Display for Limit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bounded(v) => write!(f, "{:?}", v),
            Limit::Unbounded => write!(f, "unlimited"),
        }
    }
}
