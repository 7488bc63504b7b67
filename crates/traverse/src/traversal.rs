use crate::plan::{FlightPlan, LookMode, TraverseConfig};
use camroute_common::CameraPose;
use glam::Vec3;

/// Result of advancing a traversal by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still in flight.
    Active,
    /// Arrived (or was already done).
    Finished,
}

/// Interpolates a camera pose along a flight plan, one tick at a time.
///
/// Position moves linearly within each segment; leftover tick time rolls
/// into the next segment so total flight time is independent of tick rate.
/// The look target follows the configured `LookMode`.
#[derive(Debug, Clone)]
pub struct Traversal {
    plan: FlightPlan,
    look: LookMode,
    destination: Option<Vec3>,
    segment: usize,
    elapsed: f32,
    finished: bool,
}

impl Traversal {
    pub fn new(waypoints: &[Vec3], config: &TraverseConfig) -> Self {
        Self {
            plan: FlightPlan::new(waypoints, config),
            look: config.look,
            destination: waypoints.last().copied(),
            segment: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    pub fn plan(&self) -> &FlightPlan {
        &self.plan
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index of the segment currently being flown.
    pub fn current_segment(&self) -> usize {
        self.segment
    }

    /// Advance by `dt` seconds, updating the pose in place.
    pub fn tick(&mut self, pose: &mut CameraPose, dt: f32) -> Tick {
        if self.finished {
            return Tick::Finished;
        }
        let mut remaining = dt.max(0.0);
        loop {
            let Some(seg) = self.plan.segments().get(self.segment) else {
                return self.finish(pose);
            };
            let left = seg.duration - self.elapsed;
            if remaining < left {
                self.elapsed += remaining;
                let t = self.elapsed / seg.duration;
                pose.position = seg.from.lerp(seg.to, t);
                self.aim(pose);
                return Tick::Active;
            }
            // Segment boundary: land exactly on the waypoint and carry the
            // leftover time into the next segment.
            remaining -= left;
            pose.position = seg.to;
            self.elapsed = 0.0;
            self.segment += 1;
            tracing::trace!(segment = self.segment, "segment boundary");
        }
    }

    fn aim(&self, pose: &mut CameraPose) {
        let Some(seg) = self.plan.segments().get(self.segment) else {
            return;
        };
        let last = self.segment + 1 == self.plan.segments().len();
        match self.look {
            LookMode::Keep => {}
            LookMode::NextWaypoint => pose.target = seg.to,
            LookMode::FinalTarget(point) => {
                pose.target = if last { point } else { seg.to };
            }
        }
    }

    fn finish(&mut self, pose: &mut CameraPose) -> Tick {
        self.finished = true;
        if let Some(destination) = self.destination {
            pose.position = destination;
        }
        match self.look {
            LookMode::Keep => {}
            LookMode::NextWaypoint => {
                // Keep facing along the last leg instead of collapsing the
                // target onto the camera itself.
                if let Some(seg) = self.plan.segments().last() {
                    pose.target = seg.to + (seg.to - seg.from).normalize_or_zero();
                }
            }
            LookMode::FinalTarget(point) => pose.target = point,
        }
        tracing::debug!("traversal finished");
        Tick::Finished
    }
}
