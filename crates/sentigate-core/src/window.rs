//! Rolling verification-outcome window.
//!
//! A time- and capacity-bounded log of `(timestamp, is_correct)` pairs used
//! to derive the recent error rate. Append-and-evict happens under one lock
//! so the size/horizon bound always holds.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Bounded log of verification outcomes.
pub struct RollingErrorWindow {
    horizon: Duration,
    capacity: usize,
    entries: Mutex<VecDeque<(SystemTime, bool)>>,
}

impl RollingErrorWindow {
    pub fn new(horizon: Duration, capacity: usize) -> Self {
        Self {
            horizon,
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Append an outcome, evicting entries past the horizon or beyond
    /// capacity (oldest first, whichever limit is hit first).
    pub fn record(&self, now: SystemTime, is_correct: bool) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Self::evict(&mut entries, now, self.horizon);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back((now, is_correct));
    }

    /// Fraction of incorrect outcomes over the live window, in `[0, 1]`.
    ///
    /// An empty window reads as `0.0`: no evidence of error, not
    /// "undefined". Eviction runs before the ratio so stale entries never
    /// contribute.
    pub fn error_rate(&self, now: SystemTime) -> f64 {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Self::evict(&mut entries, now, self.horizon);
        if entries.is_empty() {
            return 0.0;
        }
        let incorrect = entries.iter().filter(|(_, ok)| !ok).count();
        incorrect as f64 / entries.len() as f64
    }

    /// Number of retained outcomes (post-eviction count may be higher until
    /// the next `record`/`error_rate` call touches the log).
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict(entries: &mut VecDeque<(SystemTime, bool)>, now: SystemTime, horizon: Duration) {
        let cutoff = now.checked_sub(horizon);
        let Some(cutoff) = cutoff else {
            return;
        };
        while entries.front().is_some_and(|(t, _)| *t < cutoff) {
            entries.pop_front();
        }
    }
}
