use crate::graph::WaypointGraph;
use camroute_common::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Findings from a graph validation pass.
///
/// Validation is diagnostic only. It reports what a designer should look
/// at; it never mutates the graph, and none of the findings stop routing
/// from working on the edges that do exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `(node, neighbor)`: node lists a neighbor id that is not in the graph.
    pub unknown_neighbors: Vec<(NodeId, NodeId)>,
    /// `(from, to)`: the edge from→to exists but to→from does not.
    pub asymmetric_edges: Vec<(NodeId, NodeId)>,
    /// Nodes with no path from the anchor node (first id in order).
    pub unreachable: Vec<NodeId>,
}

impl ValidationReport {
    /// True when nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.unknown_neighbors.is_empty()
            && self.asymmetric_edges.is_empty()
            && self.unreachable.is_empty()
    }

    /// Total number of findings.
    pub fn finding_count(&self) -> usize {
        self.unknown_neighbors.len() + self.asymmetric_edges.len() + self.unreachable.len()
    }

    /// Emit every finding as a tracing diagnostic. Missing ids and
    /// unreachable nodes are errors; asymmetric edges only warn, since the
    /// graph still functions in the stored direction.
    pub fn log(&self) {
        for (node, neighbor) in &self.unknown_neighbors {
            tracing::error!(%node, %neighbor, "neighbor id not in graph");
        }
        for node in &self.unreachable {
            tracing::error!(%node, "node unreachable from anchor");
        }
        for (from, to) in &self.asymmetric_edges {
            tracing::warn!(%from, %to, "edge has no reverse direction");
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "graph is clean");
        }
        writeln!(f, "{} finding(s):", self.finding_count())?;
        for (node, neighbor) in &self.unknown_neighbors {
            writeln!(f, "  error: {node} lists unknown neighbor {neighbor}")?;
        }
        for node in &self.unreachable {
            writeln!(f, "  error: {node} is unreachable from the anchor node")?;
        }
        for (from, to) in &self.asymmetric_edges {
            writeln!(f, "  warning: edge {from} -> {to} has no reverse")?;
        }
        Ok(())
    }
}

impl WaypointGraph {
    /// Check the graph for things a designer probably did not intend:
    /// dangling neighbor references, one-directional edges, and nodes that
    /// cannot be reached at all.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for node in self.nodes.values() {
            for neighbor in &node.neighbors {
                match self.nodes.get(neighbor) {
                    None => report
                        .unknown_neighbors
                        .push((node.id.clone(), neighbor.clone())),
                    Some(back) => {
                        if !back.neighbors.contains(&node.id) {
                            report
                                .asymmetric_edges
                                .push((node.id.clone(), neighbor.clone()));
                        }
                    }
                }
            }
        }

        // Reachability from the anchor (first node in id order), following
        // edges as stored.
        if let Some(anchor) = self.nodes.keys().next() {
            let mut seen: BTreeSet<&NodeId> = BTreeSet::new();
            let mut stack = vec![anchor];
            seen.insert(anchor);
            while let Some(current) = stack.pop() {
                let Some(node) = self.nodes.get(current) else {
                    continue;
                };
                for neighbor in &node.neighbors {
                    if let Some(next) = self.nodes.get(neighbor) {
                        if seen.insert(&next.id) {
                            stack.push(&next.id);
                        }
                    }
                }
            }
            report.unreachable = self
                .nodes
                .keys()
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WaypointGraph;
    use glam::Vec3;

    fn pair(a: &str, b: &str) -> (NodeId, NodeId) {
        (NodeId::new(a), NodeId::new(b))
    }

    #[test]
    fn clean_graph_reports_nothing() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.connect("a", "b").unwrap();
        let report = g.validate();
        assert!(report.is_clean());
        assert_eq!(report.finding_count(), 0);
        assert_eq!(report.to_string(), "graph is clean");
    }

    #[test]
    fn one_way_edge_flags_exactly_that_pair() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.add_node("c", Vec3::Y).unwrap();
        g.connect("a", "b").unwrap();
        g.connect("b", "c").unwrap();
        g.connect_one_way("a", "c").unwrap();

        let report = g.validate();
        assert_eq!(report.asymmetric_edges, vec![pair("a", "c")]);
        assert!(report.unknown_neighbors.is_empty());
        assert!(report.unreachable.is_empty());
    }

    #[test]
    fn unreachable_nodes_reported() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.add_node("island", Vec3::new(40.0, 0.0, 0.0)).unwrap();
        g.connect("a", "b").unwrap();

        let report = g.validate();
        assert_eq!(report.unreachable, vec![NodeId::new("island")]);
        assert!(report.asymmetric_edges.is_empty());
    }

    #[test]
    fn unknown_neighbor_reported_from_config() {
        use crate::config::GraphConfig;

        let yaml = r#"
nodes:
  - id: a
    position: [0.0, 0.0, 0.0]
    neighbors: [b, ghost]
  - id: b
    position: [1.0, 0.0, 0.0]
    neighbors: [a]
"#;
        let g = GraphConfig::from_yaml_str(yaml).unwrap().into_graph().unwrap();
        let report = g.validate();
        assert_eq!(report.unknown_neighbors, vec![pair("a", "ghost")]);
        // The dangling ref is not also an asymmetric edge.
        assert!(report.asymmetric_edges.is_empty());
    }

    #[test]
    fn empty_graph_is_clean() {
        assert!(WaypointGraph::new().validate().is_clean());
    }

    #[test]
    fn display_lists_findings() {
        let mut g = WaypointGraph::new();
        g.add_node("a", Vec3::ZERO).unwrap();
        g.add_node("b", Vec3::X).unwrap();
        g.connect_one_way("a", "b").unwrap();
        let text = g.validate().to_string();
        assert!(text.contains("warning"));
        assert!(text.contains("a -> b"));
    }
}
