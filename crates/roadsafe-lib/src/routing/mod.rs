//! Route planning over the surveyed road network.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (Dijkstra, A*)
//! - [`RouteEndpoint`] - A query endpoint: known node id or raw coordinate
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! Each algorithm is encapsulated in its own planner struct behind the
//! [`RoutePlanner`] trait, so new algorithms slot in without touching the
//! orchestration here.

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::spatial::nearest_node;
use crate::survey::{LatLon, NodeId};

/// Number of fuzzy-match suggestions offered for an unknown node id.
const MAX_SUGGESTIONS: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm over hazard-adjusted weights.
    Dijkstra,
    /// A* search guided by a straight-line coordinate heuristic.
    #[default]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// One end of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEndpoint {
    /// A node id already known to the caller; skips resolution.
    Node(NodeId),
    /// An arbitrary coordinate, resolved to the nearest surveyed node.
    Coordinate(LatLon),
}

impl RouteEndpoint {
    pub fn node(id: impl Into<NodeId>) -> Self {
        RouteEndpoint::Node(id.into())
    }

    pub fn coordinate(lat: f64, lon: f64) -> Self {
        RouteEndpoint::Coordinate(LatLon::new(lat, lon))
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Convenience constructor for a node-id pair with the default algorithm.
    pub fn between(start: impl Into<NodeId>, goal: impl Into<NodeId>) -> Self {
        Self {
            start: RouteEndpoint::node(start),
            goal: RouteEndpoint::node(goal),
            algorithm: RouteAlgorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    /// Ordered node ids from start to goal; `[goal]` when unreachable.
    pub steps: Vec<NodeId>,
    /// Decimal coordinates for the steps that have one.
    pub path_coordinates: Vec<LatLon>,
    /// Total weighted cost in metres; `None` exactly when unreachable.
    pub distance_m: Option<f64>,
    pub unreachable: bool,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Resolve a request endpoint to a node id in the graph.
///
/// Unknown ids fail fast with fuzzy-match suggestions; coordinates go
/// through the nearest-node resolver.
fn resolve_endpoint(graph: &Graph, endpoint: &RouteEndpoint) -> Result<NodeId> {
    match endpoint {
        RouteEndpoint::Node(id) => {
            if graph.contains(id) {
                Ok(id.clone())
            } else {
                Err(Error::UnknownNode {
                    name: id.clone(),
                    suggestions: fuzzy_matches(graph, id),
                })
            }
        }
        RouteEndpoint::Coordinate(point) => {
            let id = nearest_node(graph, *point)?;
            debug!(lat = point.lat, lon = point.lon, resolved = %id, "resolved coordinate");
            Ok(id.clone())
        }
    }
}

/// Closest node ids by Jaro-Winkler similarity, best first.
fn fuzzy_matches(graph: &Graph, name: &str) -> Vec<NodeId> {
    let mut scored: Vec<(f64, &NodeId)> = graph
        .nodes()
        .keys()
        .map(|id| (strsim::jaro_winkler(name, id), id))
        .filter(|(score, _)| *score > 0.6)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, id)| id.clone())
        .collect()
}

/// Compute a route using the requested algorithm.
///
/// Resolves both endpoints, runs the selected planner, and assembles the
/// plan. An unreachable goal is a successful result with
/// `unreachable = true`, not an error; only endpoints that cannot be
/// resolved fail.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_endpoint(graph, &request.start)?;
    let goal = resolve_endpoint(graph, &request.goal)?;

    let planner = select_planner(request.algorithm);
    let result = planner.find_path(graph, &start, &goal);

    debug!(
        algorithm = %request.algorithm,
        start = %start,
        goal = %goal,
        cost = result.cost,
        hops = result.steps.len().saturating_sub(1),
        "route computed"
    );

    let path_coordinates = result
        .steps
        .iter()
        .filter_map(|id| graph.node(id).and_then(|node| node.coordinate))
        .collect();

    let unreachable = result.is_unreachable();
    Ok(RoutePlan {
        algorithm: request.algorithm,
        start,
        goal,
        distance_m: (!unreachable).then_some(result.cost),
        path_coordinates,
        steps: result.steps,
        unreachable,
    })
}
