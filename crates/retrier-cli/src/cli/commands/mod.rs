//! CLI command handlers.

mod run;
mod schedule;

pub use run::run_command;
pub use schedule::run_schedule;

#[cfg(test)]
pub(crate) use run::{exit_code, AttemptError, EXIT_DEADLINE};
#[cfg(test)]
pub(crate) use schedule::write_schedule;
