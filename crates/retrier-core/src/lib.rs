//! Retry policy engine.
//!
//! Build a [`RetryPolicy`] with [`policy()`], then hand it to
//! [`retry::supply`] or [`retry::run`] together with a cancellation signal
//! and a sleeper.

pub mod config;
pub mod logging;
pub mod policy;
pub mod retry;

pub use policy::{policy, Limit, RetryPolicy};
pub use retry::{run, supply, RetryError};
