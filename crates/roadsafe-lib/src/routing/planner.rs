//! Route planning strategies.
//!
//! Each algorithm is wrapped in a planner implementing [`RoutePlanner`],
//! selected explicitly by the caller through [`select_planner`] rather
//! than dispatched on a string flag.

use crate::graph::Graph;
use crate::path::{a_star, dijkstra, PathResult};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search on the given graph.
    ///
    /// Always returns a result; an unreachable goal is encoded in the
    /// [`PathResult`] rather than signalled separately.
    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> PathResult;
}

/// Dijkstra's algorithm planner for weighted traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> PathResult {
        dijkstra(graph, start, goal)
    }
}

/// A* planner guided by the coordinate heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> PathResult {
        a_star(graph, start, goal)
    }
}

/// Select the planner for the requested algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
