use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_run_with_trailing_command() {
    match parse(&["retrier", "run", "--max-attempts", "5", "--", "curl", "-fsS", "http://x"]) {
        CliCommand::Run {
            policy,
            timeout_ms,
            command,
        } => {
            assert_eq!(policy.max_attempts, Some(5));
            assert!(timeout_ms.is_none());
            assert_eq!(command, vec!["curl", "-fsS", "http://x"]);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_negative_values() {
    match parse(&[
        "retrier",
        "run",
        "--max-attempts",
        "-1",
        "--max-interval-ms",
        "-1",
        "--timeout-ms",
        "2000",
        "make",
    ]) {
        CliCommand::Run {
            policy,
            timeout_ms,
            command,
        } => {
            assert_eq!(policy.max_attempts, Some(-1));
            assert_eq!(policy.max_interval_ms, Some(-1));
            assert_eq!(timeout_ms, Some(2000));
            assert_eq!(command, vec!["make"]);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_requires_command() {
    assert!(Cli::try_parse_from(["retrier", "run"]).is_err());
}

#[test]
fn cli_parse_fixed_delay_conflicts_with_backoff() {
    assert!(Cli::try_parse_from(["retrier", "schedule", "--fixed-delay", "--backoff"]).is_err());
}

#[test]
fn cli_parse_schedule() {
    match parse(&[
        "retrier",
        "schedule",
        "--config",
        "/tmp/r.toml",
        "--fixed-delay",
        "--interval-ms",
        "250",
        "--count",
        "4",
    ]) {
        CliCommand::Schedule { policy, count } => {
            assert_eq!(policy.config, Some(PathBuf::from("/tmp/r.toml")));
            assert!(policy.fixed_delay);
            assert_eq!(policy.interval_ms, Some(250));
            assert_eq!(count, 4);
        }
        _ => panic!("expected Schedule"),
    }
}

#[test]
fn cli_parse_schedule_default_count() {
    match parse(&["retrier", "schedule"]) {
        CliCommand::Schedule { count, .. } => assert_eq!(count, 10),
        _ => panic!("expected Schedule"),
    }
}
