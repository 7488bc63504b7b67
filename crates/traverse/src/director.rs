use crate::plan::TraverseConfig;
use crate::traversal::{Tick, Traversal};
use camroute_common::CameraPose;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle identifying one flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal outcome of a flight request, reported from `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    /// The flight reached its destination.
    Completed { id: RequestId },
    /// The flight was cancelled through its handle.
    Cancelled { id: RequestId },
    /// A newer request replaced this flight before it arrived.
    Superseded { id: RequestId },
}

/// Owns the camera pose and at most one in-flight traversal.
///
/// Requests coalesce into a single slot: asking for a new flight while one
/// is in progress supersedes it (last move wins). The host drives the
/// director from its frame loop via `tick` and drains the events it
/// returns for completion signals.
#[derive(Debug)]
pub struct CameraDirector {
    pose: CameraPose,
    flight: Option<(RequestId, Traversal)>,
    events: Vec<FlightEvent>,
}

impl CameraDirector {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            flight: None,
            events: Vec::new(),
        }
    }

    /// Current camera pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Whether a flight is in progress.
    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Handle of the flight in progress, if any.
    pub fn current_request(&self) -> Option<RequestId> {
        self.flight.as_ref().map(|(id, _)| *id)
    }

    /// Request a flight along `waypoints`. Supersedes any flight in
    /// progress. The flight starts at the first waypoint; hosts route from
    /// the node the camera currently occupies.
    pub fn request(&mut self, waypoints: &[Vec3], config: &TraverseConfig) -> RequestId {
        if let Some((old, _)) = self.flight.take() {
            tracing::debug!(superseded = %old.0, "new flight replaces the one in progress");
            self.events.push(FlightEvent::Superseded { id: old });
        }
        let id = RequestId::new();
        tracing::debug!(request = %id.0, waypoints = waypoints.len(), "flight requested");
        self.flight = Some((id, Traversal::new(waypoints, config)));
        id
    }

    /// Cancel the flight with this handle. Returns false when it is not the
    /// one in progress (already landed, superseded, or never existed). The
    /// camera stays wherever the last tick left it.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        if self.current_request() != Some(id) {
            return false;
        }
        tracing::debug!(request = %id.0, "flight cancelled");
        self.flight = None;
        self.events.push(FlightEvent::Cancelled { id });
        true
    }

    /// Advance the in-flight traversal by `dt` seconds and return the
    /// terminal events produced since the last tick.
    pub fn tick(&mut self, dt: f32) -> Vec<FlightEvent> {
        if let Some((id, traversal)) = &mut self.flight {
            if traversal.tick(&mut self.pose, dt) == Tick::Finished {
                let id = *id;
                tracing::debug!(request = %id.0, "flight completed");
                self.flight = None;
                self.events.push(FlightEvent::Completed { id });
            }
        }
        std::mem::take(&mut self.events)
    }
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self::new(CameraPose::default())
    }
}
