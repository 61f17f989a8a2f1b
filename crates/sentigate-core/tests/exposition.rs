//! Text exposition rendering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use sentigate_core::clock::ManualClock;
use sentigate_core::metrics::{GaugeVec, SubmissionMetrics};
use sentigate_core::{CoordinatorConfig, LifecycleCoordinator, Sentiment};

fn coordinator() -> (Arc<ManualClock>, LifecycleCoordinator) {
    let clock = Arc::new(ManualClock::new(
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
    ));
    let c = LifecycleCoordinator::new(CoordinatorConfig::default(), clock.clone()).unwrap();
    (clock, c)
}

#[test]
fn all_series_have_help_and_type_lines() {
    let out = SubmissionMetrics::new().render();
    assert!(out.contains("# HELP total_submissions "));
    assert!(out.contains("# TYPE total_submissions counter"));
    assert!(out.contains("# TYPE active_submissions gauge"));
    assert!(out.contains("# TYPE submission_verification_delay_seconds histogram"));
    assert!(out.contains("# TYPE verification_error_rate_last_week gauge"));
    assert!(out.contains("\nverification_error_rate_last_week 0\n"));
}

#[test]
fn counter_and_gauge_series_render_label_values() {
    let (_, c) = coordinator();
    c.on_submitted("0", Sentiment::Positive).unwrap();
    c.on_submitted("1", Sentiment::Negative).unwrap();

    let out = c.metrics().render();
    assert!(out.contains("total_submissions{sentiment=\"positive\"} 1"));
    assert!(out.contains("total_submissions{sentiment=\"negative\"} 1"));
    assert!(out.contains("active_submissions{sentiment=\"positive\"} 1"));
    assert!(out.contains("active_submissions{sentiment=\"negative\"} 1"));
}

#[test]
fn histogram_renders_cumulative_buckets_sum_and_count() {
    let (clock, c) = coordinator();
    c.on_submitted("0", Sentiment::Positive).unwrap();
    clock.advance(Duration::from_millis(1100));
    c.on_verified("0", true).unwrap();

    let out = c.metrics().render();
    let series = "submission_verification_delay_seconds";
    let labels = "sentiment=\"positive\",verified=\"true\"";
    assert!(out.contains(&format!("{series}_bucket{{{labels},le=\"1\"}} 0")));
    assert!(out.contains(&format!("{series}_bucket{{{labels},le=\"2\"}} 1")));
    assert!(out.contains(&format!("{series}_bucket{{{labels},le=\"600\"}} 1")));
    assert!(out.contains(&format!("{series}_bucket{{{labels},le=\"+Inf\"}} 1")));
    assert!(out.contains(&format!("{series}_sum{{{labels}}} 1.1")));
    assert!(out.contains(&format!("{series}_count{{{labels}}} 1")));
}

#[test]
fn error_rate_gauge_renders_latest_value() {
    let (_, c) = coordinator();
    c.on_submitted("0", Sentiment::Positive).unwrap();
    c.on_submitted("1", Sentiment::Positive).unwrap();
    c.on_verified("0", true).unwrap();
    c.on_verified("1", false).unwrap();

    let out = c.metrics().render();
    assert!(out.contains("\nverification_error_rate_last_week 0.5\n"));
}

#[test]
fn gauge_decrement_clamps_at_zero() {
    let g = GaugeVec::default();
    let labels = &[("sentiment", "positive")];
    g.dec(labels);
    assert_eq!(g.get(labels), 0);
    g.inc(labels);
    g.dec(labels);
    g.dec(labels);
    assert_eq!(g.get(labels), 0);
}
