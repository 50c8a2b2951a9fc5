//! Run command: execute a child process under the retry policy.

use anyhow::{bail, Result};
use retrier_core::retry::{Cancellation, Deadline, Never, ThreadSleeper};
use retrier_core::{run, RetryError, RetryPolicy};
use std::fmt;
use std::io;
use std::process::{Command, ExitStatus};
use std::time::Duration;

/// Exit code when the deadline fires, as coreutils `timeout` does.
pub const EXIT_DEADLINE: i32 = 124;

/// Why a single run of the child command failed.
#[derive(Debug)]
pub enum AttemptError {
    /// The command could not be started.
    Spawn(io::Error),
    /// The command ran and exited unsuccessfully.
    Exit(ExitStatus),
}

impl AttemptError {
    /// Exit code to report if this is the final failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AttemptError::Spawn(e) if e.kind() == io::ErrorKind::NotFound => 127,
            AttemptError::Spawn(_) => 126,
            AttemptError::Exit(status) => status.code().unwrap_or(1),
        }
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Spawn(e) => write!(f, "failed to start: {}", e),
            AttemptError::Exit(status) => write!(f, "command {}", status),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Spawn(e) => Some(e),
            AttemptError::Exit(_) => None,
        }
    }
}

/// Run `command` until it exits successfully or the policy gives up.
/// Returns the exit code for the process.
pub fn run_command(policy: RetryPolicy, timeout: Option<Duration>, command: &[String]) -> Result<i32> {
    let (program, args) = match command.split_first() {
        Some(split) => split,
        None => bail!("no command given"),
    };

    let deadline = timeout.map(Deadline::after);
    tracing::info!(
        %policy,
        remaining = ?deadline.map(|d| d.remaining()),
        "running {}",
        program
    );
    let cancel: Box<dyn Cancellation> = match deadline {
        Some(d) => Box::new(d),
        None => Box::new(Never),
    };

    let mut attempt = 0u64;
    let res = run(
        &*cancel,
        &ThreadSleeper,
        || {
            attempt += 1;
            attempt_once(program, args, attempt)
        },
        policy,
    );
    Ok(exit_code(res))
}

fn attempt_once(program: &str, args: &[String], attempt: u64) -> Result<(), AttemptError> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(AttemptError::Spawn)?;
    if status.success() {
        tracing::info!(attempt, "command succeeded");
        Ok(())
    } else {
        tracing::warn!(attempt, %status, "command failed");
        Err(AttemptError::Exit(status))
    }
}

/// Map the retry outcome to a process exit code, reporting failures on stderr.
pub fn exit_code(res: Result<(), RetryError<AttemptError>>) -> i32 {
    match res {
        Ok(()) => 0,
        Err(RetryError::Exhausted(e)) => {
            eprintln!("retrier: giving up: {}", e);
            e.exit_code()
        }
        Err(RetryError::DeadlineExceeded { last_error }) => {
            match last_error {
                Some(e) => eprintln!("retrier: deadline exceeded, last failure: {}", e),
                None => eprintln!("retrier: deadline exceeded before the first attempt"),
            }
            EXIT_DEADLINE
        }
    }
}
