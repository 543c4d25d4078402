use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use crate::graph::{Graph, RoadEdge};
use crate::survey::NodeId;

/// Result of a single-pair search.
///
/// An unreachable goal is not an error: `cost` is `f64::INFINITY` and
/// `steps` degenerates to `[goal]`. Callers must check
/// [`PathResult::is_unreachable`] before treating the steps as a route.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Ordered node ids from start to goal inclusive, never empty.
    pub steps: Vec<NodeId>,
    /// Total weighted cost in metres, `INFINITY` when no route exists.
    pub cost: f64,
}

impl PathResult {
    pub fn is_unreachable(&self) -> bool {
        self.cost.is_infinite()
    }
}

/// Receives every edge examination during a search.
///
/// The engine itself never prints; callers that want a relaxation trace
/// inject an observer. The default observer does nothing.
pub trait SearchObserver {
    fn on_relax(&mut self, from: &str, to: &str, edge: &RoadEdge, tentative: f64);
}

/// Observer that discards all events.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_relax(&mut self, _from: &str, _to: &str, _edge: &RoadEdge, _tentative: f64) {}
}

/// Dijkstra's algorithm over edge weights, terminating as soon as the
/// goal is popped from the frontier.
pub fn dijkstra(graph: &Graph, start: &str, goal: &str) -> PathResult {
    dijkstra_with_observer(graph, start, goal, &mut NoopObserver)
}

pub fn dijkstra_with_observer(
    graph: &Graph,
    start: &str,
    goal: &str,
    observer: &mut dyn SearchObserver,
) -> PathResult {
    let mut distances = initial_distances(graph, start);
    let mut predecessors = initial_predecessors(graph);

    let mut frontier = BinaryHeap::new();
    frontier.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = frontier.pop() {
        if entry.node == goal {
            break;
        }

        // Lazy deletion: a stale entry carries a cost that has since
        // been improved.
        match distances.get(entry.node) {
            Some(&best) if entry.cost.0 > best => continue,
            None => continue,
            _ => {}
        }

        for (neighbor, edge) in graph.neighbours(entry.node) {
            let tentative = entry.cost.0 + edge.weight_m;
            observer.on_relax(entry.node, neighbor, edge, tentative);

            if tentative < *distances.get(neighbor.as_str()).unwrap_or(&f64::INFINITY) {
                distances.insert(neighbor, tentative);
                predecessors.insert(neighbor, Some(entry.node));
                frontier.push(QueueEntry::new(neighbor, tentative));
            }
        }
    }

    reconstruct(&predecessors, &distances, goal)
}

/// A* search keyed by `g + h`, where `h` is the straight-line distance
/// over the raw decimal coordinate components.
///
/// The heuristic is in degree-scale units while edge weights are metres;
/// it is kept that way deliberately (see DESIGN.md). A node without a
/// coordinate contributes `h = 0`, which locally degrades to Dijkstra.
pub fn a_star(graph: &Graph, start: &str, goal: &str) -> PathResult {
    a_star_with_observer(graph, start, goal, &mut NoopObserver)
}

pub fn a_star_with_observer(
    graph: &Graph,
    start: &str,
    goal: &str,
    observer: &mut dyn SearchObserver,
) -> PathResult {
    let mut best_cost = initial_distances(graph, start);
    let mut predecessors = initial_predecessors(graph);

    let mut frontier = BinaryHeap::new();
    frontier.push(AStarEntry::new(start, 0.0, heuristic(graph, start, goal)));

    while let Some(entry) = frontier.pop() {
        if entry.node == goal {
            break;
        }

        match best_cost.get(entry.node) {
            Some(&best) if entry.cost.0 > best => continue,
            None => continue,
            _ => {}
        }

        for (neighbor, edge) in graph.neighbours(entry.node) {
            let tentative = entry.cost.0 + edge.weight_m;
            observer.on_relax(entry.node, neighbor, edge, tentative);

            if tentative < *best_cost.get(neighbor.as_str()).unwrap_or(&f64::INFINITY) {
                best_cost.insert(neighbor, tentative);
                predecessors.insert(neighbor, Some(entry.node));
                frontier.push(AStarEntry::new(
                    neighbor,
                    tentative,
                    heuristic(graph, neighbor, goal),
                ));
            }
        }
    }

    reconstruct(&predecessors, &best_cost, goal)
}

fn initial_distances<'a>(graph: &'a Graph, start: &str) -> BTreeMap<&'a str, f64> {
    let mut distances: BTreeMap<&str, f64> = graph
        .nodes()
        .keys()
        .map(|id| (id.as_str(), f64::INFINITY))
        .collect();
    if let Some(distance) = distances.get_mut(start) {
        *distance = 0.0;
    }
    distances
}

fn initial_predecessors(graph: &Graph) -> BTreeMap<&str, Option<&str>> {
    graph.nodes().keys().map(|id| (id.as_str(), None)).collect()
}

/// Straight-line distance between two nodes' coordinate components.
/// Degree-scale units, not geodesic; 0.0 when either coordinate is missing.
fn heuristic(graph: &Graph, from: &str, to: &str) -> f64 {
    let (Some(a), Some(b)) = (
        graph.node(from).and_then(|node| node.coordinate),
        graph.node(to).and_then(|node| node.coordinate),
    ) else {
        return 0.0;
    };
    (a.lat - b.lat).hypot(a.lon - b.lon)
}

/// Walk predecessors back from the goal and reverse. With an untouched
/// predecessor chain this yields `[goal]`, the degenerate unreachable path.
fn reconstruct(
    predecessors: &BTreeMap<&str, Option<&str>>,
    distances: &BTreeMap<&str, f64>,
    goal: &str,
) -> PathResult {
    let mut steps = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        steps.push(node.to_string());
        current = predecessors.get(node).copied().flatten();
    }
    steps.reverse();

    PathResult {
        steps,
        cost: distances.get(goal).copied().unwrap_or(f64::INFINITY),
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl<'a> AStarEntry<'a> {
    fn new(node: &'a str, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for AStarEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
