//! Schedule command: show when each attempt would start.

use anyhow::Result;
use retrier_core::{Limit, RetryPolicy};
use std::io::{self, Write};
use std::time::Duration;

/// Print the policy and the start offset of its first `count` attempts.
pub fn run_schedule(policy: &RetryPolicy, count: usize) -> Result<()> {
    let mut out = io::stdout().lock();
    write_schedule(&mut out, policy, count)?;
    Ok(())
}

pub fn write_schedule<W: Write>(out: &mut W, policy: &RetryPolicy, count: usize) -> io::Result<()> {
    writeln!(out, "{}", policy)?;
    let count = match policy.max_attempts() {
        Limit::Bounded(n) => count.min(usize::try_from(n).unwrap_or(usize::MAX)),
        Limit::Unbounded => count,
    };
    let mut offset = Duration::ZERO;
    for (i, delay) in policy.intervals().take(count).enumerate() {
        writeln!(out, "attempt {:>3} at {:?}", i + 1, offset)?;
        offset = offset.saturating_add(delay);
    }
    Ok(())
}
