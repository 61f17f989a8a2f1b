//! Submission store:
//! - `id -> SubmissionRecord` (predicted sentiment + last reported outcome)
//! - `id -> creation timestamp` (poppable, consumed once at verification)

use std::time::SystemTime;

use dashmap::DashMap;

use crate::error::{Result, SentigateError};
use crate::types::Sentiment;

#[derive(Debug, Clone)]
struct SubmissionRecord {
    sentiment: Sentiment,
    last_verification: Option<bool>,
}

/// Live submissions and their creation timestamps.
///
/// Records are never evicted: the store grows for the life of the process.
/// That is accepted rather than bounded away, because evicting verified
/// entries would turn late duplicate verifications into
/// `UnknownSubmission` errors and change the externally observable
/// behavior.
#[derive(Default)]
pub struct SubmissionStore {
    records: DashMap<String, SubmissionRecord>,
    created_at: DashMap<String, SystemTime>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new submission. `DuplicateSubmission` if the id exists.
    pub fn create(&self, id: &str, sentiment: Sentiment, now: SystemTime) -> Result<()> {
        match self.records.entry(id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(SentigateError::DuplicateSubmission(id.to_string()))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(SubmissionRecord {
                    sentiment,
                    last_verification: None,
                });
                self.created_at.insert(id.to_string(), now);
                Ok(())
            }
        }
    }

    /// Remove and return the creation timestamp.
    ///
    /// A pop, not a peek: the verification delay can be computed at most
    /// once per id, which is the second idempotency guard under duplicate
    /// verification calls.
    pub fn take_created_at(&self, id: &str) -> Option<SystemTime> {
        self.created_at.remove(id).map(|(_, t)| t)
    }

    /// Predicted sentiment for an id. Survives `take_created_at`, so
    /// repeated verification attempts can still resolve their label.
    pub fn predicted_sentiment(&self, id: &str) -> Option<Sentiment> {
        self.records.get(id).map(|r| r.sentiment)
    }

    /// Overwrite the last reported outcome (audit trail, every call wins).
    pub fn record_outcome(&self, id: &str, is_correct: bool) {
        if let Some(mut r) = self.records.get_mut(id) {
            r.last_verification = Some(is_correct);
        }
    }

    /// Last reported outcome for an id, if any verification arrived.
    pub fn last_verification(&self, id: &str) -> Option<bool> {
        self.records.get(id).and_then(|r| r.last_verification)
    }

    /// Number of submissions ever created in this process.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
