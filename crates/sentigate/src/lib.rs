//! Top-level facade crate for sentigate.
//!
//! Re-exports the lifecycle core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use sentigate_core::*;
}

pub mod gateway {
    pub use sentigate_gateway::*;
}
