//! CLI for the retrier retry policy engine.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use retrier_core::config::{self, PolicyConfig, RetrierConfig};
use std::path::PathBuf;

use commands::{run_command, run_schedule};

/// Top-level CLI for retrier.
#[derive(Debug, Parser)]
#[command(name = "retrier")]
#[command(about = "retrier: run a command again until it succeeds, with fixed delay or exponential backoff", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a command, retrying while it exits non-zero.
    Run {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Stop retrying after this many milliseconds (overrides config timeout_ms).
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Command and arguments to run.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print the effective policy and its first intervals.
    Schedule {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Number of attempts to show.
        #[arg(long, default_value = "10", value_name = "N")]
        count: usize,
    },
}

/// Policy selection shared by all commands. Flags override the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// Config file to load instead of ~/.config/retrier/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a fixed delay between attempts.
    #[arg(long, conflicts_with = "backoff")]
    pub fixed_delay: bool,

    /// Use exponential backoff between attempts.
    #[arg(long)]
    pub backoff: bool,

    /// Interval after the first failure (fixed delay: every interval). 0 = default.
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub interval_ms: Option<i64>,

    /// Backoff cap. 0 = default, negative = unlimited.
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub max_interval_ms: Option<i64>,

    /// Attempt budget including the first. 0 = default, negative = retry indefinitely.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_attempts: Option<i64>,

    /// Backoff growth factor. Non-positive = default.
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    pub coefficient: Option<f64>,
}

impl PolicyArgs {
    fn load_config(&self) -> Result<RetrierConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_init(),
        }
    }

    /// Apply flag overrides on top of the configured policy section.
    pub fn apply(&self, base: PolicyConfig) -> PolicyConfig {
        let (interval, mut max_attempts) = match base {
            PolicyConfig::Backoff {
                initial_interval_ms,
                max_attempts,
                ..
            } => (initial_interval_ms, max_attempts),
            PolicyConfig::FixedDelay {
                interval_ms,
                max_attempts,
            } => (interval_ms, max_attempts),
        };
        let interval = self.interval_ms.unwrap_or(interval);
        if let Some(n) = self.max_attempts {
            max_attempts = n;
        }

        let as_fixed = match base {
            PolicyConfig::FixedDelay { .. } => !self.backoff,
            PolicyConfig::Backoff { .. } => self.fixed_delay,
        };
        if as_fixed {
            return PolicyConfig::FixedDelay {
                interval_ms: interval,
                max_attempts,
            };
        }

        let (max_interval, coefficient) = match base {
            PolicyConfig::Backoff {
                max_interval_ms,
                coefficient,
                ..
            } => (max_interval_ms, coefficient),
            // Switching from fixed delay: unset fields resolve to backoff defaults.
            PolicyConfig::FixedDelay { .. } => (0, 0.0),
        };
        PolicyConfig::Backoff {
            initial_interval_ms: interval,
            max_interval_ms: self.max_interval_ms.unwrap_or(max_interval),
            max_attempts,
            coefficient: self.coefficient.unwrap_or(coefficient),
        }
    }
}

impl CliCommand {
    /// Parse args, dispatch, and return the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                policy,
                timeout_ms,
                command,
            } => {
                let cfg = policy.load_config()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let effective = policy.apply(cfg.policy).to_policy();
                let timeout = timeout_ms
                    .map(std::time::Duration::from_millis)
                    .or_else(|| cfg.timeout());
                run_command(effective, timeout, &command)
            }
            CliCommand::Schedule { policy, count } => {
                let cfg = policy.load_config()?;
                let effective = policy.apply(cfg.policy).to_policy();
                run_schedule(&effective, count)?;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
