//! Lifecycle coordinator.
//!
//! Orchestrates the store, the rolling window, and the metrics registry on
//! the two state-changing events (`on_submitted`, `on_verified`). Per id the
//! states are `Unknown -> Active -> Verified`, never backwards; the active
//! index makes the gauge decrement and the delay observation idempotent
//! under duplicate or racing verification calls.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;

use crate::clock::Clock;
use crate::error::{Result, SentigateError};
use crate::metrics::SubmissionMetrics;
use crate::store::SubmissionStore;
use crate::types::Sentiment;
use crate::window::RollingErrorWindow;

const DEFAULT_WINDOW_HORIZON: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const DEFAULT_WINDOW_CAPACITY: usize = 1000;

/// Coordinator tuning knobs.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Rolling-window time horizon.
    pub window_horizon: Duration,
    /// Maximum retained window entries, independent of the horizon.
    pub window_capacity: usize,
    /// When true (the source system's behavior), every verification call
    /// feeds the rolling error window, duplicates included. When false,
    /// only an id's first verification counts.
    pub count_duplicate_verifications: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            window_horizon: DEFAULT_WINDOW_HORIZON,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            count_duplicate_verifications: true,
        }
    }
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_horizon < Duration::from_secs(1) {
            return Err(SentigateError::BadRequest(
                "lifecycle.window_horizon must be at least 1 second".into(),
            ));
        }
        if self.window_capacity == 0 {
            return Err(SentigateError::BadRequest(
                "lifecycle.window_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Owns all lifecycle state for the life of the process.
///
/// No module-level mutable state anywhere: construct one of these, share it
/// via the application state, and inject a fake clock in tests.
pub struct LifecycleCoordinator {
    cfg: CoordinatorConfig,
    clock: Arc<dyn Clock>,
    store: SubmissionStore,
    window: RollingErrorWindow,
    active: DashSet<String>,
    metrics: Arc<SubmissionMetrics>,
}

impl LifecycleCoordinator {
    pub fn new(cfg: CoordinatorConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        cfg.validate()?;
        let window = RollingErrorWindow::new(cfg.window_horizon, cfg.window_capacity);
        Ok(Self {
            cfg,
            clock,
            store: SubmissionStore::new(),
            window,
            active: DashSet::new(),
            metrics: Arc::new(SubmissionMetrics::new()),
        })
    }

    /// Registry handle for the scrape endpoint.
    pub fn metrics(&self) -> Arc<SubmissionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Read access to the store (audit lookups).
    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }

    /// Record a freshly predicted submission.
    ///
    /// Side effects run in a fixed order (create, total, active, index) so
    /// the total-submissions counter is never observably behind the active
    /// gauge. A duplicate id is a logic error upstream: reported, process
    /// keeps serving.
    pub fn on_submitted(&self, id: &str, sentiment: Sentiment) -> Result<()> {
        let now = self.clock.now();
        if let Err(e) = self.store.create(id, sentiment, now) {
            tracing::warn!(id, "submission id already exists");
            return Err(e);
        }
        self.metrics.inc_total_submissions(sentiment);
        self.metrics.inc_active_submissions(sentiment);
        self.active.insert(id.to_string());
        tracing::debug!(id, sentiment = sentiment.as_label(), "submission active");
        Ok(())
    }

    /// Record a human verification of a prior prediction.
    ///
    /// The rolling window takes every reported outcome (duplicates too,
    /// unless configured otherwise); the gauge decrement and the delay
    /// histogram fire only for an id's first verification.
    pub fn on_verified(&self, id: &str, is_correct: bool) -> Result<()> {
        let now = self.clock.now();
        let Some(sentiment) = self.store.predicted_sentiment(id) else {
            tracing::warn!(id, "verification for unknown submission");
            return Err(SentigateError::UnknownSubmission(id.to_string()));
        };

        self.store.record_outcome(id, is_correct);

        // Atomic check-and-remove: exactly one caller wins the first
        // verification even under concurrent duplicates.
        let first = self.active.remove(id).is_some();

        if first || self.cfg.count_duplicate_verifications {
            self.window.record(now, is_correct);
        }
        self.metrics.set_error_rate(self.window.error_rate(now));

        if first {
            self.metrics.dec_active_submissions(sentiment);
        }

        if let Some(created) = self.store.take_created_at(id) {
            let delay = now.duration_since(created).unwrap_or_default();
            self.metrics
                .observe_verification_delay(sentiment, is_correct, delay);
        }

        tracing::debug!(
            id,
            is_correct,
            first,
            sentiment = sentiment.as_label(),
            "verification recorded"
        );
        Ok(())
    }
}
