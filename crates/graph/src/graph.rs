use camroute_common::NodeId;
use glam::Vec3;
use std::collections::BTreeMap;

/// Errors from graph construction.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node id {0:?}")]
    DuplicateNode(NodeId),
    #[error("unknown node id {0:?}")]
    UnknownNode(NodeId),
}

/// A named point in space used as a camera waypoint.
///
/// Adjacency is stored as neighbor ids. An edge is traversable in the
/// direction it is stored; symmetric pairs are the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointNode {
    pub id: NodeId,
    pub position: Vec3,
    pub neighbors: Vec<NodeId>,
}

/// Graph of camera waypoints keyed by id.
///
/// Built up-front through the builder API or from a config file, then held
/// read-only while routes are searched and flown. Uses BTreeMap for
/// deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaypointGraph {
    pub(crate) nodes: BTreeMap<NodeId, WaypointNode>,
}

impl WaypointGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. The id must not already be present.
    pub fn add_node(&mut self, id: impl Into<NodeId>, position: Vec3) -> Result<(), GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            tracing::error!(%id, "duplicate node id");
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.insert(
            id.clone(),
            WaypointNode {
                id,
                position,
                neighbors: Vec::new(),
            },
        );
        Ok(())
    }

    /// Connect two nodes with a symmetric edge. Both must exist.
    pub fn connect(
        &mut self,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
    ) -> Result<(), GraphError> {
        let (a, b) = (a.into(), b.into());
        self.link(&a, &b)?;
        self.link(&b, &a)?;
        Ok(())
    }

    /// Connect `from` to `to` in one direction only.
    ///
    /// Exists so asymmetric graphs are representable; the validator flags
    /// them as a warning.
    pub fn connect_one_way(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
    ) -> Result<(), GraphError> {
        let (from, to) = (from.into(), to.into());
        self.link(&from, &to)
    }

    fn link(&mut self, from: &NodeId, to: &NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(to) {
            return Err(GraphError::UnknownNode(to.clone()));
        }
        let node = self
            .nodes
            .get_mut(from)
            .ok_or_else(|| GraphError::UnknownNode(from.clone()))?;
        if !node.neighbors.contains(to) {
            node.neighbors.push(to.clone());
        }
        Ok(())
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node by id.
    pub fn get(&self, id: &NodeId) -> Option<&WaypointNode> {
        self.nodes.get(id)
    }

    /// Position of a node, if it exists.
    pub fn position(&self, id: &NodeId) -> Option<Vec3> {
        self.nodes.get(id).map(|n| n.position)
    }

    /// Neighbor ids of a node. Empty for unknown ids.
    pub fn neighbors(&self, id: &NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &WaypointNode> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let g = WaypointGraph::new();
        assert_eq!(g.node_count(), 0);
        assert!(!g.contains(&NodeId::new("anything")));
    }

    #[test]
    fn add_and_get() {
        let mut g = WaypointGraph::new();
        g.add_node("lobby", Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert!(g.contains(&NodeId::new("lobby")));
        assert_eq!(
            g.position(&NodeId::new("lobby")),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut g = WaypointGraph::new();
        g.add_node("lobby", Vec3::ZERO).unwrap();
        let err = g.add_node("lobby", Vec3::ONE).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode(_)));
        // First node untouched
        assert_eq!(g.position(&NodeId::new("lobby")), Some(Vec3::ZERO));
    }

    #[test]
    fn connect_is_symmetric() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.connect("a", "b").unwrap();
        assert_eq!(g.neighbors(&NodeId::new("a")), &[NodeId::new("b")]);
        assert_eq!(g.neighbors(&NodeId::new("b")), &[NodeId::new("a")]);
    }

    #[test]
    fn connect_one_way_is_directed() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.connect_one_way("a", "b").unwrap();
        assert_eq!(g.neighbors(&NodeId::new("a")), &[NodeId::new("b")]);
        assert!(g.neighbors(&NodeId::new("b")).is_empty());
    }

    #[test]
    fn connect_unknown_endpoint_errors() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        assert!(matches!(
            g.connect("a", "ghost"),
            Err(GraphError::UnknownNode(_))
        ));
        assert!(matches!(
            g.connect("ghost", "a"),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn reconnect_does_not_duplicate_edge() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.connect("a", "b").unwrap();
        g.connect("a", "b").unwrap();
        assert_eq!(g.neighbors(&NodeId::new("a")).len(), 1);
    }

    #[test]
    fn nodes_iterate_in_id_order() {
        let mut g = WaypointGraph::new();
        g.add_node("c", Vec3::ZERO).unwrap();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::ZERO).unwrap();
        let ids: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
