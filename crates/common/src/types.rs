use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for a waypoint node within a graph.
///
/// Ids are designer-chosen names ("lobby", "checkout_overview"). Ordering is
/// total so graph iteration, and therefore route tie-breaking, is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Camera pose: position plus the point the camera is looking at.
///
/// A traversal mutates this over time; hosts read it each tick to drive
/// whatever view they render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Unit vector from position toward the look target, or zero when the
    /// two coincide.
    pub fn facing(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_ordering_is_lexicographic() {
        let a = NodeId::new("aisle");
        let b = NodeId::new("backroom");
        assert!(a < b);
    }

    #[test]
    fn node_id_display_is_bare() {
        assert_eq!(NodeId::new("lobby").to_string(), "lobby");
    }

    #[test]
    fn pose_default_looks_at_origin() {
        let pose = CameraPose::default();
        assert_eq!(pose.target, Vec3::ZERO);
        assert!(pose.position.y > 0.0);
    }

    #[test]
    fn facing_is_normalized() {
        let pose = CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
        let dir = pose.facing();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(dir, Vec3::Z);
    }

    #[test]
    fn facing_degenerate_is_zero() {
        let pose = CameraPose::new(Vec3::ONE, Vec3::ONE);
        assert_eq!(pose.facing(), Vec3::ZERO);
    }
}
