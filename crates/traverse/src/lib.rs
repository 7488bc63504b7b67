//! Tick-driven camera traversal along a sequence of waypoints.
//!
//! # Invariants
//! - Motion is pure interpolation: no feedback, no replanning mid-flight.
//! - All waiting is expressed through the update tick; nothing blocks.
//! - At most one flight is in progress per director; a newer request
//!   supersedes the one in flight (last move wins).
//! - Every flight ends in exactly one terminal event: completed, cancelled,
//!   or superseded.

mod director;
mod plan;
mod traversal;

pub use director::{CameraDirector, FlightEvent, RequestId};
pub use plan::{FlightPlan, LookMode, Segment, TraverseConfig};
pub use traversal::{Tick, Traversal};

pub fn crate_info() -> &'static str {
    "camroute-traverse v0.1.0"
}
