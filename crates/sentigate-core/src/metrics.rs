//! Metrics registry for the submission lifecycle.
//!
//! Counter/gauge/histogram vectors with dynamic labels backed by `DashMap`,
//! rendered by hand into the Prometheus text exposition format. Labels are
//! flattened into sorted key vectors to keep series ordering deterministic.
//! Readers get per-series atomicity during concurrent writes; whole-registry
//! atomicity is not needed by any consumer.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

use crate::types::Sentiment;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn render_labels(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn render_header(name: &str, help: &str, kind: &str, out: &mut String) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {kind}");
}

/// Monotonic counter partitioned by labels.
#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value for a label set (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        render_header(name, help, "counter", out);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), val);
        }
    }
}

/// Gauge partitioned by labels. Decrements clamp at zero.
#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<Vec<(String, String)>, AtomicI64>,
}

impl GaugeVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement by 1, clamped at zero.
    ///
    /// The coordinator gates every decrement behind the active-submission
    /// index, so a zero-valued gauge here means that guard is broken: log
    /// it and hold the gauge at zero rather than going negative.
    pub fn dec(&self, labels: &[(&str, &str)]) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        let decremented = gauge.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
            if v > 0 {
                Some(v - 1)
            } else {
                None
            }
        });
        if decremented.is_err() {
            tracing::error!(?labels, "gauge decrement below zero clamped");
        }
    }

    /// Current value for a label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        render_header(name, help, "gauge", out);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), val);
        }
    }
}

/// Scalar gauge holding an `f64` (bit-cast into an atomic).
#[derive(Default)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        render_header(name, help, "gauge", out);
        let _ = writeln!(out, "{} {}", name, self.get());
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(bucket_count: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: (0..bucket_count).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Histogram over seconds with fixed upper bounds, partitioned by labels.
pub struct HistogramVec {
    bounds: &'static [f64],
    map: DashMap<Vec<(String, String)>, AtomicHistogram>,
}

impl HistogramVec {
    pub fn new(bounds: &'static [f64]) -> Self {
        Self {
            bounds,
            map: DashMap::new(),
        }
    }

    /// Observe a duration, incrementing every cumulative bucket it fits.
    pub fn observe(&self, labels: &[(&str, &str)], value: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::new(self.bounds.len()));
        let secs = value.as_secs_f64();

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros
            .fetch_add(value.as_micros() as u64, Ordering::Relaxed);
        for (i, &le) in self.bounds.iter().enumerate() {
            if secs <= le {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Cumulative count at a bucket bound for a label set.
    pub fn bucket_count(&self, labels: &[(&str, &str)], le: f64) -> u64 {
        let idx = self.bounds.iter().position(|&b| b == le);
        let Some(idx) = idx else { return 0 };
        self.map
            .get(&label_key(labels))
            .map(|h| h.buckets[idx].load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Total observations for a label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        render_header(name, help, "histogram", out);
        for r in self.map.iter() {
            let hist = r.value();
            let label_str = render_labels(r.key());
            let prefix = if label_str.is_empty() {
                String::new()
            } else {
                format!("{label_str},")
            };

            for (i, &le) in self.bounds.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {count}");
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");

            let sum = hist.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
            let _ = writeln!(out, "{name}_sum{{{label_str}}} {sum}");
            let _ = writeln!(out, "{name}_count{{{label_str}}} {count}");
        }
    }
}

/// Verification-delay bucket bounds, in seconds.
pub const DELAY_BUCKETS: [f64; 9] = [1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0];

fn verified_label(is_correct: bool) -> &'static str {
    if is_correct {
        "true"
    } else {
        "false"
    }
}

/// All metric series exposed by the submission lifecycle.
pub struct SubmissionMetrics {
    pub total_submissions: CounterVec,
    pub active_submissions: GaugeVec,
    pub verification_delay: HistogramVec,
    pub error_rate: Gauge,
}

impl Default for SubmissionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionMetrics {
    pub fn new() -> Self {
        Self {
            total_submissions: CounterVec::default(),
            active_submissions: GaugeVec::default(),
            verification_delay: HistogramVec::new(&DELAY_BUCKETS),
            error_rate: Gauge::default(),
        }
    }

    pub fn inc_total_submissions(&self, sentiment: Sentiment) {
        self.total_submissions
            .inc(&[("sentiment", sentiment.as_label())]);
    }

    pub fn inc_active_submissions(&self, sentiment: Sentiment) {
        self.active_submissions
            .inc(&[("sentiment", sentiment.as_label())]);
    }

    pub fn dec_active_submissions(&self, sentiment: Sentiment) {
        self.active_submissions
            .dec(&[("sentiment", sentiment.as_label())]);
    }

    pub fn observe_verification_delay(
        &self,
        sentiment: Sentiment,
        is_correct: bool,
        delay: Duration,
    ) {
        self.verification_delay.observe(
            &[
                ("verified", verified_label(is_correct)),
                ("sentiment", sentiment.as_label()),
            ],
            delay,
        );
    }

    pub fn set_error_rate(&self, value: f64) {
        self.error_rate.set(value);
    }

    /// Render all registered series in the text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.total_submissions.render(
            "total_submissions",
            "Total number of submissions received (model-predicted sentiment)",
            &mut out,
        );
        self.active_submissions.render(
            "active_submissions",
            "Number of active submissions not yet verified (model-predicted sentiment)",
            &mut out,
        );
        self.verification_delay.render(
            "submission_verification_delay_seconds",
            "Time between submission and verification",
            &mut out,
        );
        self.error_rate.render(
            "verification_error_rate_last_week",
            "Percentage of incorrect verifications in the last week",
            &mut out,
        );
        out
    }
}
