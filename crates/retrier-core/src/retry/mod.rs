//! Retry executor.
//!
//! [`supply`] and [`run`] re-invoke a fallible operation under a
//! [`RetryPolicy`](crate::policy::RetryPolicy), sleeping between attempts
//! through an injected [`Sleeper`] and polling a [`Cancellation`] signal
//! before every attempt. Everything runs on the caller's thread.

mod cancel;
mod error;
mod run;
mod sleep;

pub use cancel::{CancelToken, Cancellation, Deadline, Never};
pub use error::RetryError;
pub use run::{run, supply};
pub use sleep::{Sleeper, ThreadSleeper};
