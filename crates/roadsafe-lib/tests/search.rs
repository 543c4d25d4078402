use std::collections::BTreeMap;

use roadsafe_lib::survey::{Connection, SurveyCoordinate};
use roadsafe_lib::{
    a_star, build_graph, dijkstra, Graph, GraphConfig, HazardSource, LatLon, Survey, SurveyNode,
};

fn synthetic_graph(
    edges: &[(&str, &str, f64)],
    coordinates: &[(&str, f64, f64)],
    hazard: Option<&dyn HazardSource>,
) -> Graph {
    let mut nodes: BTreeMap<String, SurveyNode> = BTreeMap::new();
    let coordinate_of = |id: &str| {
        coordinates
            .iter()
            .find(|(name, _, _)| *name == id)
            .map(|(_, lat, lon)| SurveyCoordinate::Decimal(LatLon::new(*lat, *lon)))
            .unwrap_or_else(|| SurveyCoordinate::Raw("unsurveyed".to_string()))
    };

    for &(from, to, distance_m) in edges {
        for id in [from, to] {
            nodes.entry(id.to_string()).or_insert_with(|| SurveyNode {
                id: id.to_string(),
                coordinate: coordinate_of(id),
                connections: Vec::new(),
                images: Vec::new(),
            });
        }
        nodes.get_mut(from).unwrap().connections.push(Connection {
            neighbor: to.to_string(),
            distance_m,
            direction: None,
        });
    }

    build_graph(&Survey { nodes }, &GraphConfig::default(), hazard)
}

/// Exhaustive minimum over all simple paths; only viable on tiny graphs.
fn brute_force_cost(graph: &Graph, start: &str, goal: &str) -> f64 {
    fn visit(graph: &Graph, current: &str, goal: &str, spent: f64, seen: &mut Vec<String>) -> f64 {
        if current == goal {
            return spent;
        }
        let mut best = f64::INFINITY;
        for (neighbor, edge) in graph.neighbours(current) {
            if seen.iter().any(|s| s == neighbor) {
                continue;
            }
            seen.push(neighbor.clone());
            best = best.min(visit(graph, neighbor, goal, spent + edge.weight_m, seen));
            seen.pop();
        }
        best
    }

    visit(graph, start, goal, 0.0, &mut vec![start.to_string()])
}

// Small synthetic networks with branching, cycles, and dead ends.
fn property_fixtures() -> Vec<Vec<(&'static str, &'static str, f64)>> {
    vec![
        vec![
            ("a", "b", 7.0),
            ("a", "c", 9.0),
            ("a", "f", 14.0),
            ("b", "c", 10.0),
            ("b", "d", 15.0),
            ("c", "d", 11.0),
            ("c", "f", 2.0),
            ("d", "e", 6.0),
            ("e", "f", 9.0),
            ("f", "e", 9.0),
        ],
        vec![
            ("a", "b", 1.0),
            ("b", "c", 1.0),
            ("c", "d", 1.0),
            ("d", "a", 1.0),
            ("a", "d", 3.5),
            ("b", "d", 1.9),
        ],
        vec![
            ("a", "b", 2.0),
            ("b", "a", 2.0),
            ("b", "c", 2.0),
            ("c", "b", 2.0),
            ("c", "d", 2.0),
            ("a", "d", 100.0),
            ("d", "e", 1.0),
            ("e", "f", 1.0),
            ("f", "g", 1.0),
            ("c", "g", 50.0),
            ("g", "h", 4.0),
        ],
    ]
}

#[test]
fn dijkstra_matches_brute_force_on_small_graphs() {
    for edges in property_fixtures() {
        let graph = synthetic_graph(&edges, &[], None);
        let ids: Vec<String> = graph.nodes().keys().cloned().collect();
        assert!(ids.len() <= 8);

        for start in &ids {
            for goal in &ids {
                let expected = brute_force_cost(&graph, start, goal);
                let actual = dijkstra(&graph, start, goal).cost;
                if expected.is_infinite() {
                    assert!(actual.is_infinite(), "{start}->{goal}");
                } else {
                    assert!(
                        (actual - expected).abs() < 1e-9,
                        "{start}->{goal}: dijkstra {actual}, brute force {expected}"
                    );
                }
            }
        }
    }
}

#[test]
fn a_star_agrees_with_dijkstra_when_the_heuristic_underestimates() {
    // Coordinates a few millidegrees apart keep the heuristic tiny
    // compared to metre-scale edge weights, so it never overestimates.
    let coordinates = [
        ("a", 0.000, 0.000),
        ("b", 0.001, 0.000),
        ("c", 0.002, 0.000),
        ("d", 0.003, 0.001),
        ("e", 0.001, 0.002),
        ("f", 0.002, 0.003),
    ];

    for edges in property_fixtures() {
        let graph = synthetic_graph(&edges, &coordinates, None);
        let ids: Vec<String> = graph.nodes().keys().cloned().collect();

        for start in &ids {
            for goal in &ids {
                let d = dijkstra(&graph, start, goal);
                let a = a_star(&graph, start, goal);
                if d.is_unreachable() {
                    assert!(a.is_unreachable(), "{start}->{goal}");
                } else {
                    assert!(
                        (d.cost - a.cost).abs() < 1e-9,
                        "{start}->{goal}: dijkstra {}, a* {}",
                        d.cost,
                        a.cost
                    );
                }
            }
        }
    }
}

#[test]
fn repeated_searches_are_deterministic() {
    let graph = synthetic_graph(&property_fixtures()[0], &[], None);
    let first = dijkstra(&graph, "a", "e");
    for _ in 0..5 {
        assert_eq!(dijkstra(&graph, "a", "e"), first);
        assert_eq!(a_star(&graph, "a", "e"), a_star(&graph, "a", "e"));
    }
}

#[test]
fn severed_goal_is_unreachable_from_both_algorithms() {
    // d has no inbound edges at all.
    let edges = [("a", "b", 10.0), ("b", "c", 10.0), ("d", "c", 10.0)];
    let graph = synthetic_graph(&edges, &[], None);

    for result in [dijkstra(&graph, "a", "d"), a_star(&graph, "a", "d")] {
        assert!(result.is_unreachable());
        assert!(result.cost.is_infinite());
        assert_eq!(result.steps, vec!["d"]);
    }
}

#[test]
fn hazard_at_a_midpoint_diverts_the_route() {
    let line = [
        ("a", "b", 10.0),
        ("b", "c", 10.0),
        ("c", "d", 10.0),
        ("a", "e", 25.0),
        ("e", "d", 25.0),
    ];

    // Without hazard the direct line wins: 30 against 50.
    let graph = synthetic_graph(&line, &[], None);
    let result = dijkstra(&graph, "a", "d");
    assert_eq!(result.steps, vec!["a", "b", "c", "d"]);
    assert!((result.cost - 30.0).abs() < 1e-9);

    // Scoring b at 1.0 lifts b->c to 10 * (1 + 5) = 60, so the detour
    // through e (total 50) takes over.
    let hazard = |node: &SurveyNode| if node.id == "b" { 1.0 } else { 0.0 };
    let graph = synthetic_graph(&line, &[], Some(&hazard));
    assert!((graph.neighbours("b")["c"].weight_m - 60.0).abs() < 1e-9);

    let result = dijkstra(&graph, "a", "d");
    assert_eq!(result.steps, vec!["a", "e", "d"]);
    assert!((result.cost - 50.0).abs() < 1e-9);
}
