use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What the camera looks at while it moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LookMode {
    /// Leave the look target wherever the pose already points.
    Keep,
    /// Look at the end of the segment currently being flown.
    NextWaypoint,
    /// Look ahead while flying; once the last segment starts, look at the
    /// given point instead.
    FinalTarget(Vec3),
}

/// Flight parameters: speed plus per-segment duration clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraverseConfig {
    /// Cruise speed in world units per second.
    pub speed: f32,
    /// Shortest a single segment may take, so adjacent nodes don't blink past.
    pub min_segment_duration: f32,
    /// Longest a single segment may take, so distant nodes don't crawl.
    pub max_segment_duration: f32,
    pub look: LookMode,
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            min_segment_duration: 0.25,
            max_segment_duration: 4.0,
            look: LookMode::NextWaypoint,
        }
    }
}

/// One straight leg of a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec3,
    pub to: Vec3,
    pub duration: f32,
}

/// Precomputed time parameterization of a waypoint sequence.
///
/// Each consecutive pair becomes a segment whose duration is
/// `distance / speed`, clamped to the configured bounds. Fewer than two
/// waypoints yields an empty plan that completes immediately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightPlan {
    segments: Vec<Segment>,
}

impl FlightPlan {
    pub fn new(waypoints: &[Vec3], config: &TraverseConfig) -> Self {
        assert!(config.speed > 0.0, "speed must be positive");
        assert!(
            config.min_segment_duration <= config.max_segment_duration,
            "segment duration clamps are inverted"
        );
        let segments = waypoints
            .windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                let duration = (from.distance(to) / config.speed)
                    .clamp(config.min_segment_duration, config.max_segment_duration);
                Segment { from, to, duration }
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment durations.
    pub fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}
