//! sentigate core: submission lifecycle tracking and metrics aggregation.
//!
//! This crate owns the bookkeeping behind the gateway's feedback loop: which
//! submissions are still awaiting human verification, how long verification
//! takes, and how often the model turns out to be wrong over a sliding
//! window. It performs no I/O and carries no HTTP or runtime dependencies so
//! it can be exercised deterministically with a fake clock.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SentigateError`/`Result` so the
//! serving process never crashes on caller misuse.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod store;
pub mod types;
pub mod window;

/// Shared result type.
pub use error::{Result, SentigateError};
pub use lifecycle::{CoordinatorConfig, LifecycleCoordinator};
pub use types::Sentiment;
