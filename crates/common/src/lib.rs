//! Shared types for the camroute waypoint engine.
//!
//! # Invariants
//! - `NodeId` is totally ordered so every graph iteration is deterministic.
//! - Types here carry no behavior beyond construction and accessors.

pub mod types;

pub use types::{CameraPose, NodeId};

pub fn crate_info() -> &'static str {
    "camroute-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
