//! Shared application state for the sentigate gateway.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sentigate_core::clock::SystemClock;
use sentigate_core::error::Result;
use sentigate_core::LifecycleCoordinator;

use crate::config::GatewayConfig;
use crate::model::SentimentPredictor;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    coordinator: LifecycleCoordinator,
    predictor: Arc<dyn SentimentPredictor>,
    next_id: AtomicU64,
}

impl AppState {
    /// Build application state. Returns Result so main can handle config
    /// errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig, predictor: Arc<dyn SentimentPredictor>) -> Result<Self> {
        let coordinator = LifecycleCoordinator::new(
            cfg.lifecycle.to_coordinator_config(),
            Arc::new(SystemClock),
        )?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                coordinator,
                predictor,
                next_id: AtomicU64::new(0),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn coordinator(&self) -> &LifecycleCoordinator {
        &self.inner.coordinator
    }

    pub fn predictor(&self) -> &dyn SentimentPredictor {
        self.inner.predictor.as_ref()
    }

    /// Next submission id: a stringified process-global monotonic counter,
    /// unique for the process lifetime.
    pub fn next_submission_id(&self) -> String {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }
}
