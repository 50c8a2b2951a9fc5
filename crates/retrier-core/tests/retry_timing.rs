//! Integration tests: attempt timing, exhaustion and cancellation driven by a
//! simulated clock.

mod common;

use std::cell::RefCell;
use std::time::Duration;

use common::fake_clock::{ms, FakeClock};
use retrier_core::retry::Never;
use retrier_core::{policy, run, supply, RetryError, RetryPolicy};

#[derive(Debug, Clone, PartialEq)]
enum FetchError {
    Unavailable,
    Refused(u32),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Unavailable => write!(f, "unavailable"),
            FetchError::Refused(n) => write!(f, "refused on attempt {}", n),
        }
    }
}

impl std::error::Error for FetchError {}

/// Runs an operation that fails `failures` times before succeeding and
/// returns the simulated time of each attempt.
fn attempt_times(policy: impl Into<RetryPolicy>, failures: usize) -> Vec<Duration> {
    let clock = FakeClock::new();
    let times = RefCell::new(Vec::new());
    let res = supply(
        &Never,
        &clock,
        || {
            times.borrow_mut().push(clock.now());
            if times.borrow().len() <= failures {
                Err(FetchError::Unavailable)
            } else {
                Ok(times.borrow().len())
            }
        },
        policy,
    );
    assert_eq!(res.unwrap(), failures + 1);
    times.into_inner()
}

#[test]
fn exponential_backoff_attempt_offsets() {
    let p = policy()
        .backoff()
        .with_initial_interval(ms(100))
        .with_max_interval(Duration::from_secs(1))
        .with_coefficient(2.0)
        .with_max_attempts(5)
        .build();
    assert_eq!(
        attempt_times(p, 4),
        vec![ms(0), ms(100), ms(300), ms(700), ms(1500)]
    );
}

#[test]
fn fixed_delay_attempt_offsets() {
    let p = policy()
        .fixed_delay()
        .with_interval(ms(100))
        .with_max_attempts(5)
        .build();
    assert_eq!(
        attempt_times(p, 4),
        vec![ms(0), ms(100), ms(200), ms(300), ms(400)]
    );
}

#[test]
fn exhaustion_returns_exact_operation_error() {
    let clock = FakeClock::new();
    let mut calls = 0u32;
    let res: Result<(), _> = supply(
        &Never,
        &clock,
        || {
            calls += 1;
            Err(FetchError::Refused(calls))
        },
        policy()
            .backoff()
            .with_initial_interval(ms(100))
            .with_max_attempts(3)
            .build(),
    );
    assert_eq!(calls, 3);
    let err = res.unwrap_err();
    assert!(!err.is_deadline_exceeded());
    assert_eq!(err.to_string(), "refused on attempt 3");
    match err {
        RetryError::Exhausted(e) => assert_eq!(e, FetchError::Refused(3)),
        other => panic!("expected exhausted, got {:?}", other),
    }
}

#[test]
fn cancellation_stops_indefinite_retry() {
    let clock = FakeClock::new();
    let deadline = clock.deadline_at(ms(150));
    let attempts = RefCell::new(Vec::new());
    let res = run(
        &deadline,
        &clock,
        || {
            attempts.borrow_mut().push(clock.now());
            Err(FetchError::Unavailable)
        },
        policy()
            .fixed_delay()
            .with_interval(ms(100))
            .with_max_attempts_indefinite()
            .build(),
    );
    assert_eq!(*attempts.borrow(), vec![ms(0), ms(100)]);
    match res {
        Err(RetryError::DeadlineExceeded { last_error }) => {
            assert_eq!(last_error, Some(FetchError::Unavailable))
        }
        other => panic!("expected deadline exceeded, got {:?}", other),
    }
    // No attempt after the signal was observed at 200ms.
    assert_eq!(clock.now(), ms(200));
}

#[test]
fn capped_interval_never_exceeds_max() {
    let clock = FakeClock::new();
    let p = policy()
        .backoff()
        .with_initial_interval(ms(100))
        .with_max_interval(ms(100))
        .with_coefficient(2.0)
        .with_max_attempts(25)
        .build();
    let res: Result<(), _> = supply(&Never, &clock, || Err(FetchError::Unavailable), p);
    assert!(res.unwrap_err().is_exhausted());
    let sleeps = clock.sleeps();
    assert_eq!(sleeps.len(), 25);
    assert!(sleeps.iter().all(|d| *d <= ms(100)));
}

#[test]
fn unlimited_max_interval_outgrows_capped() {
    let run_ten = |p: RetryPolicy| {
        let clock = FakeClock::new();
        let res: Result<(), _> = supply(&Never, &clock, || Err(FetchError::Unavailable), p);
        assert!(res.unwrap_err().is_exhausted());
        clock.sleeps()
    };
    let base = policy()
        .backoff()
        .with_initial_interval(ms(100))
        .with_max_attempts(10);
    let capped = run_ten(base.build().into());
    let uncapped = run_ten(base.with_max_interval_unlimited().build().into());
    assert_eq!(capped[9], Duration::from_secs(30));
    assert_eq!(uncapped[9], ms(51_200));
    assert!(uncapped[9] > capped[9]);
}

#[test]
fn schedule_preview_matches_executed_sleeps() {
    let p: RetryPolicy = policy()
        .backoff()
        .with_initial_interval(ms(50))
        .with_max_interval(ms(500))
        .with_coefficient(3.0)
        .with_max_attempts(6)
        .build()
        .into();
    let clock = FakeClock::new();
    let res: Result<(), _> = supply(&Never, &clock, || Err(FetchError::Unavailable), p);
    assert!(res.is_err());
    let preview: Vec<_> = p.intervals().take(6).collect();
    assert_eq!(clock.sleeps(), preview);
    assert_eq!(preview, vec![ms(50), ms(150), ms(450), ms(500), ms(500), ms(500)]);
}
