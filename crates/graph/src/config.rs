//! Graph construction from configuration files.
//!
//! Nodes are placed in a YAML document instead of being discovered from a
//! scene. Duplicate ids fail the load; neighbor ids that name no node are
//! kept (and logged) so the validator can report them.
//!
//! ```text
//! nodes:
//!   - id: lobby
//!     position: [0.0, 1.5, 0.0]
//!     neighbors: [checkout, produce]
//! ```

use crate::graph::{GraphError, WaypointGraph};
use camroute_common::NodeId;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a graph config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One node entry in a graph config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub id: NodeId,
    pub position: [f32; 3],
    #[serde(default)]
    pub neighbors: Vec<NodeId>,
}

/// Serializable graph description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub nodes: Vec<NodeConfig>,
}

impl GraphConfig {
    /// Parse a config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the graph this config describes.
    ///
    /// Duplicate ids are a hard error. Dangling neighbor references load as
    /// stored; they are logged here and reported by `validate()`.
    pub fn into_graph(self) -> Result<WaypointGraph, ConfigError> {
        let mut graph = WaypointGraph::new();
        for node in &self.nodes {
            graph.add_node(node.id.clone(), Vec3::from_array(node.position))?;
        }
        for node in self.nodes {
            for neighbor in node.neighbors {
                if !graph.contains(&neighbor) {
                    tracing::error!(node = %node.id, %neighbor, "config neighbor id names no node");
                }
                if let Some(entry) = graph.nodes.get_mut(&node.id) {
                    if !entry.neighbors.contains(&neighbor) {
                        entry.neighbors.push(neighbor);
                    }
                }
            }
        }
        Ok(graph)
    }

    /// Capture an existing graph as a config (for export / round-trip).
    pub fn from_graph(graph: &WaypointGraph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .map(|n| NodeConfig {
                    id: n.id.clone(),
                    position: n.position.to_array(),
                    neighbors: n.neighbors.clone(),
                })
                .collect(),
        }
    }
}

/// Load a graph straight from a YAML file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<WaypointGraph, ConfigError> {
    GraphConfig::load(path)?.into_graph()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_YAML: &str = r#"
nodes:
  - id: a
    position: [0.0, 0.0, 0.0]
    neighbors: [b, d]
  - id: b
    position: [1.0, 0.0, 0.0]
    neighbors: [a, c]
  - id: c
    position: [1.0, 1.0, 0.0]
    neighbors: [b, d]
  - id: d
    position: [0.0, 1.0, 0.0]
    neighbors: [c, a]
"#;

    #[test]
    fn parse_and_build() {
        let g = GraphConfig::from_yaml_str(SQUARE_YAML)
            .unwrap()
            .into_graph()
            .unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.neighbors(&NodeId::new("a")).len(), 2);
        assert!(g.validate().is_clean());
    }

    #[test]
    fn neighbors_field_is_optional() {
        let yaml = r#"
nodes:
  - id: lone
    position: [1.0, 2.0, 3.0]
"#;
        let g = GraphConfig::from_yaml_str(yaml).unwrap().into_graph().unwrap();
        assert_eq!(g.node_count(), 1);
        assert!(g.neighbors(&NodeId::new("lone")).is_empty());
    }

    #[test]
    fn duplicate_id_fails_load() {
        let yaml = r#"
nodes:
  - id: twin
    position: [0.0, 0.0, 0.0]
  - id: twin
    position: [1.0, 0.0, 0.0]
"#;
        let err = GraphConfig::from_yaml_str(yaml)
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Graph(GraphError::DuplicateNode(_))
        ));
    }

    #[test]
    fn dangling_neighbor_survives_load() {
        let yaml = r#"
nodes:
  - id: a
    position: [0.0, 0.0, 0.0]
    neighbors: [nowhere]
"#;
        let g = GraphConfig::from_yaml_str(yaml).unwrap().into_graph().unwrap();
        assert_eq!(g.neighbors(&NodeId::new("a")), &[NodeId::new("nowhere")]);
        assert_eq!(g.validate().unknown_neighbors.len(), 1);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            GraphConfig::from_yaml_str("nodes: [not a node]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn round_trip_preserves_graph() {
        let g = GraphConfig::from_yaml_str(SQUARE_YAML)
            .unwrap()
            .into_graph()
            .unwrap();
        let yaml = GraphConfig::from_graph(&g).to_yaml().unwrap();
        let again = GraphConfig::from_yaml_str(&yaml)
            .unwrap()
            .into_graph()
            .unwrap();
        assert_eq!(g, again);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.yaml");
        std::fs::write(&path, SQUARE_YAML).unwrap();

        let g = load_graph(&path).unwrap();
        assert_eq!(g.node_count(), 4);
        assert!(
            g.route(&NodeId::new("a"), &NodeId::new("c"))
                .unwrap()
                .length()
                > 0.0
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_graph(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
