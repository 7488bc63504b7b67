//! Waypoint graph: named camera nodes, shortest-route search, validation.
//!
//! # Invariants
//! - Node ids are unique; duplicates are rejected at the construction
//!   boundary, never discovered later.
//! - Iteration order is deterministic (BTreeMap), so equal-length routes
//!   resolve the same way on every run.
//! - The neighbor relation is expected to be symmetric. The validator
//!   reports violations; nothing repairs them.
//! - The graph is read-only while routes are searched or flown.

mod config;
mod graph;
mod route;
mod validate;

pub use config::{ConfigError, GraphConfig, NodeConfig, load_graph};
pub use graph::{GraphError, WaypointGraph, WaypointNode};
pub use route::{Hop, Route, RouteError};
pub use validate::ValidationReport;

pub fn crate_info() -> &'static str {
    "camroute-graph v0.1.0"
}
