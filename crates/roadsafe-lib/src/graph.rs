use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::hazard::HazardSource;
use crate::survey::{LatLon, NodeId, Survey};

/// Multiplier applied to a node's hazard score when weighting its
/// outgoing edges. A score of 1.0 at the default penalty makes an edge
/// six times as expensive as its physical length.
pub const DEFAULT_HAZARD_PENALTY: f64 = 5.0;

/// Tunables for graph construction.
#[derive(Debug, Clone, Copy)]
pub struct GraphConfig {
    pub hazard_penalty: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            hazard_penalty: DEFAULT_HAZARD_PENALTY,
        }
    }
}

/// A surveyed point as the pathfinding engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    pub id: NodeId,
    /// Decimal coordinate; `None` when the survey's raw string did not parse.
    pub coordinate: Option<LatLon>,
    pub hazard_score: f64,
}

/// Directed edge within the routing graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    /// Surveyed segment length in metres, always positive.
    pub distance_m: f64,
    pub direction: Option<String>,
    /// Hazard score of the source node, in `[0, 1]`.
    pub safety_score: f64,
    /// Traversal cost in metres: `distance_m * (1 + safety_score * penalty)`.
    pub weight_m: f64,
}

static EMPTY_NEIGHBOURS: Lazy<BTreeMap<NodeId, RoadEdge>> = Lazy::new(BTreeMap::new);

/// Immutable routing graph shared read-only across queries.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<BTreeMap<NodeId, RoadNode>>,
    adjacency: Arc<BTreeMap<NodeId, BTreeMap<NodeId, RoadEdge>>>,
}

impl Graph {
    /// All nodes, keyed by id in stable lexicographic order.
    pub fn nodes(&self) -> &BTreeMap<NodeId, RoadNode> {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&RoadNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Outgoing edges for a node. Unknown ids get the empty map.
    pub fn neighbours(&self, id: &str) -> &BTreeMap<NodeId, RoadEdge> {
        self.adjacency.get(id).unwrap_or(&EMPTY_NEIGHBOURS)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the routing graph from a survey, weighting each edge by its
/// source node's hazard score.
///
/// Connections naming a node outside the survey are dropped: the network
/// is partially surveyed and dangling references are expected, not
/// defects. A node with no usable connections still gets an empty
/// adjacency entry. Passing `None` for the hazard source scores every
/// node 0.0, so `weight_m == distance_m` throughout.
pub fn build_graph(
    survey: &Survey,
    config: &GraphConfig,
    hazard: Option<&dyn HazardSource>,
) -> Graph {
    let mut nodes = BTreeMap::new();
    let mut adjacency: BTreeMap<NodeId, BTreeMap<NodeId, RoadEdge>> = BTreeMap::new();
    let mut dropped = 0usize;

    for (id, node) in &survey.nodes {
        let hazard_score = hazard
            .map(|source| source.score(node).clamp(0.0, 1.0))
            .unwrap_or(0.0);

        nodes.insert(
            id.clone(),
            RoadNode {
                id: id.clone(),
                coordinate: node.coordinate.decimal(),
                hazard_score,
            },
        );

        let edges = adjacency.entry(id.clone()).or_default();
        for connection in &node.connections {
            if !survey.nodes.contains_key(&connection.neighbor) {
                dropped += 1;
                continue;
            }
            let weight_m =
                connection.distance_m * (1.0 + hazard_score * config.hazard_penalty);
            edges.insert(
                connection.neighbor.clone(),
                RoadEdge {
                    distance_m: connection.distance_m,
                    direction: connection.direction.clone(),
                    safety_score: hazard_score,
                    weight_m,
                },
            );
        }
    }

    if dropped > 0 {
        debug!(dropped, "dropped connections to unsurveyed nodes");
    }

    Graph {
        nodes: Arc::new(nodes),
        adjacency: Arc::new(adjacency),
    }
}
