//! Coordinator state machine and gauge/histogram accounting.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use sentigate_core::clock::ManualClock;
use sentigate_core::{CoordinatorConfig, LifecycleCoordinator, SentigateError, Sentiment};

const POSITIVE: &[(&str, &str)] = &[("sentiment", "positive")];
const NEGATIVE: &[(&str, &str)] = &[("sentiment", "negative")];

fn t0() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

fn coordinator(cfg: CoordinatorConfig) -> (Arc<ManualClock>, LifecycleCoordinator) {
    let clock = Arc::new(ManualClock::new(t0()));
    let c = LifecycleCoordinator::new(cfg, clock.clone()).unwrap();
    (clock, c)
}

#[test]
fn totals_count_successful_creations_only() {
    let (_, c) = coordinator(CoordinatorConfig::default());
    c.on_submitted("0", Sentiment::Positive).unwrap();
    c.on_submitted("1", Sentiment::Positive).unwrap();
    c.on_submitted("2", Sentiment::Negative).unwrap();

    let err = c.on_submitted("0", Sentiment::Negative).unwrap_err();
    assert!(matches!(err, SentigateError::DuplicateSubmission(_)));

    let m = c.metrics();
    assert_eq!(m.total_submissions.get(POSITIVE), 2);
    assert_eq!(m.total_submissions.get(NEGATIVE), 1);
    assert_eq!(m.active_submissions.get(POSITIVE), 2);
    assert_eq!(m.active_submissions.get(NEGATIVE), 1);
    assert_eq!(c.store().len(), 3);
}

#[test]
fn end_to_end_submit_then_verify() {
    let (clock, c) = coordinator(CoordinatorConfig::default());
    c.on_submitted("0", Sentiment::Positive).unwrap();

    let m = c.metrics();
    assert_eq!(m.total_submissions.get(POSITIVE), 1);
    assert_eq!(m.active_submissions.get(POSITIVE), 1);

    clock.advance(Duration::from_millis(1100));
    c.on_verified("0", true).unwrap();

    let delay_labels = &[("verified", "true"), ("sentiment", "positive")];
    assert_eq!(m.active_submissions.get(POSITIVE), 0);
    assert_eq!(m.total_submissions.get(POSITIVE), 1);
    // 1.1s lands past the 1s bound, inside the 2s bucket.
    assert_eq!(m.verification_delay.bucket_count(delay_labels, 1.0), 0);
    assert_eq!(m.verification_delay.bucket_count(delay_labels, 2.0), 1);
    assert_eq!(m.verification_delay.count(delay_labels), 1);
    assert_eq!(m.error_rate.get(), 0.0);
}

#[test]
fn duplicate_verification_skips_gauge_and_histogram_but_feeds_window() {
    let (clock, c) = coordinator(CoordinatorConfig::default());
    c.on_submitted("0", Sentiment::Positive).unwrap();
    clock.advance(Duration::from_secs(3));
    c.on_verified("0", true).unwrap();

    let m = c.metrics();
    let delay_labels = &[("verified", "true"), ("sentiment", "positive")];
    assert_eq!(m.active_submissions.get(POSITIVE), 0);
    assert_eq!(m.verification_delay.count(delay_labels), 1);
    assert_eq!(m.error_rate.get(), 0.0);

    // Second verification with the opposite outcome: no gauge or histogram
    // movement, but the window takes the duplicate.
    clock.advance(Duration::from_secs(1));
    c.on_verified("0", false).unwrap();

    assert_eq!(m.active_submissions.get(POSITIVE), 0);
    assert_eq!(m.verification_delay.count(delay_labels), 1);
    assert_eq!(
        m.verification_delay
            .count(&[("verified", "false"), ("sentiment", "positive")]),
        0
    );
    assert_eq!(m.error_rate.get(), 0.5);
    assert_eq!(c.store().last_verification("0"), Some(false));
}

#[test]
fn duplicate_window_counting_can_be_disabled() {
    let cfg = CoordinatorConfig {
        count_duplicate_verifications: false,
        ..CoordinatorConfig::default()
    };
    let (clock, c) = coordinator(cfg);
    c.on_submitted("0", Sentiment::Negative).unwrap();
    c.on_verified("0", true).unwrap();

    clock.advance(Duration::from_secs(1));
    c.on_verified("0", false).unwrap();

    // The duplicate never reached the window, so the rate stays clean.
    assert_eq!(c.metrics().error_rate.get(), 0.0);
    // Audit trail still records the last reported outcome.
    assert_eq!(c.store().last_verification("0"), Some(false));
}

#[test]
fn unknown_submission_leaves_metrics_unchanged() {
    let (_, c) = coordinator(CoordinatorConfig::default());
    c.on_submitted("0", Sentiment::Positive).unwrap();

    let before = c.metrics().render();
    let err = c.on_verified("missing-id", true).unwrap_err();
    assert!(matches!(err, SentigateError::UnknownSubmission(_)));
    assert_eq!(c.metrics().render(), before);
}

#[test]
fn active_gauge_never_goes_negative() {
    let (_, c) = coordinator(CoordinatorConfig::default());
    c.on_submitted("0", Sentiment::Positive).unwrap();
    for _ in 0..3 {
        c.on_verified("0", true).unwrap();
    }
    assert_eq!(c.metrics().active_submissions.get(POSITIVE), 0);
}

#[test]
fn active_equals_submissions_minus_first_verifications() {
    let (_, c) = coordinator(CoordinatorConfig::default());
    for i in 0..5 {
        c.on_submitted(&i.to_string(), Sentiment::Positive).unwrap();
    }
    c.on_verified("1", true).unwrap();
    c.on_verified("3", false).unwrap();
    c.on_verified("3", false).unwrap();

    let m = c.metrics();
    assert_eq!(m.total_submissions.get(POSITIVE), 5);
    assert_eq!(m.active_submissions.get(POSITIVE), 3);
}

#[test]
fn invalid_config_is_rejected() {
    let clock = Arc::new(ManualClock::new(t0()));

    let zero_capacity = CoordinatorConfig {
        window_capacity: 0,
        ..CoordinatorConfig::default()
    };
    assert!(LifecycleCoordinator::new(zero_capacity, clock.clone()).is_err());

    let tiny_horizon = CoordinatorConfig {
        window_horizon: Duration::from_millis(10),
        ..CoordinatorConfig::default()
    };
    assert!(LifecycleCoordinator::new(tiny_horizon, clock).is_err());
}
