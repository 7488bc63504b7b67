use crate::graph::WaypointGraph;
use camroute_common::NodeId;
use glam::Vec3;
use std::collections::{BTreeMap, BTreeSet};

/// Errors from route search. A missing endpoint id is distinct from a pair
/// of nodes with no connecting path.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("node {0:?} not found in graph")]
    NodeNotFound(NodeId),
    #[error("no route from {from:?} to {to:?}")]
    NoRoute { from: NodeId, to: NodeId },
}

/// One step of a route: the node and its position, captured at search time.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub node: NodeId,
    pub position: Vec3,
}

/// Ordered sequence of hops from source to destination, with total
/// Euclidean length. Ephemeral: recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    hops: Vec<Hop>,
    length: f32,
}

impl Route {
    /// All hops, source first.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of hops, including the source.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Total Euclidean length.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Hop positions in flight order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.hops.iter().map(|h| h.position).collect()
    }

    /// Cumulative distance at each hop. Starts at 0, ends at `length()`.
    pub fn prefix_lengths(&self) -> Vec<f32> {
        let mut total = 0.0;
        let mut out = Vec::with_capacity(self.hops.len());
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                total += self.hops[i - 1].position.distance(hop.position);
            }
            out.push(total);
        }
        out
    }
}

impl WaypointGraph {
    /// Shortest route between two named nodes.
    ///
    /// Classic Dijkstra with straight-line Euclidean edge weights.
    /// Extract-min is a linear scan over the unvisited set; node counts are
    /// tens, a heap buys nothing here. Distance ties resolve by id order,
    /// so the same query always yields the same route.
    ///
    /// `from == to` returns a one-node route of zero length.
    pub fn route(&self, from: &NodeId, to: &NodeId) -> Result<Route, RouteError> {
        let _span = tracing::debug_span!("route", %from, %to).entered();

        for endpoint in [from, to] {
            if !self.nodes.contains_key(endpoint) {
                tracing::error!(node = %endpoint, "route endpoint not in graph");
                return Err(RouteError::NodeNotFound(endpoint.clone()));
            }
        }

        if from == to {
            let hops = self
                .nodes
                .get(from)
                .map(|n| {
                    vec![Hop {
                        node: n.id.clone(),
                        position: n.position,
                    }]
                })
                .unwrap_or_default();
            return Ok(Route { hops, length: 0.0 });
        }

        let mut dist: BTreeMap<&NodeId, f32> =
            self.nodes.keys().map(|id| (id, f32::INFINITY)).collect();
        let mut prev: BTreeMap<&NodeId, &NodeId> = BTreeMap::new();
        let mut unvisited: BTreeSet<&NodeId> = self.nodes.keys().collect();
        dist.insert(from, 0.0);

        while !unvisited.is_empty() {
            // Strict `<` over id-ordered iteration: the lowest id wins ties.
            let mut current: Option<&NodeId> = None;
            let mut best = f32::INFINITY;
            for &id in &unvisited {
                let d = dist[&id];
                if d < best {
                    best = d;
                    current = Some(id);
                }
            }
            // Everything still unvisited is unreachable.
            let Some(current) = current else { break };
            if current == to {
                break;
            }
            unvisited.remove(current);

            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            for neighbor in &node.neighbors {
                // Dangling neighbor refs are the validator's concern; the
                // search just never travels through them.
                let Some(next) = self.nodes.get(neighbor) else {
                    continue;
                };
                if !unvisited.contains(&next.id) {
                    continue;
                }
                let candidate = best + node.position.distance(next.position);
                if candidate < dist[&next.id] {
                    dist.insert(&next.id, candidate);
                    prev.insert(&next.id, current);
                }
            }
        }

        let length = dist[to];
        if !length.is_finite() {
            tracing::error!(%from, %to, "no route between nodes");
            return Err(RouteError::NoRoute {
                from: from.clone(),
                to: to.clone(),
            });
        }

        // Walk the predecessor chain back from the destination.
        let mut ids: Vec<NodeId> = Vec::new();
        let mut cursor = to.clone();
        while let Some(p) = prev.get(&cursor) {
            let next = (*p).clone();
            ids.push(cursor);
            cursor = next;
        }
        ids.push(cursor);
        ids.reverse();

        // A chain that does not lead back to the source means the graph is
        // disconnected in a way the distance table missed. Treat as no route.
        if ids.first() != Some(from) {
            tracing::error!(%from, %to, "route reconstruction did not reach source");
            return Err(RouteError::NoRoute {
                from: from.clone(),
                to: to.clone(),
            });
        }

        let mut hops = Vec::with_capacity(ids.len());
        for id in ids {
            let position = self
                .nodes
                .get(&id)
                .map(|n| n.position)
                .ok_or_else(|| RouteError::NoRoute {
                    from: from.clone(),
                    to: to.clone(),
                })?;
            hops.push(Hop { node: id, position });
        }

        tracing::debug!(hops = hops.len(), length, "route found");
        Ok(Route { hops, length })
    }
}
