//! Geographic utilities: great-circle distance and nearest-node lookup.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::survey::{LatLon, NodeId};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance in metres.
pub fn haversine_distance(a: LatLon, b: LatLon) -> f64 {
    haversine_distance_with_radius(a, b, EARTH_RADIUS_M)
}

/// Haversine distance on a sphere of the given radius. The radius is a
/// parameter so tests can work in convenient units.
pub fn haversine_distance_with_radius(a: LatLon, b: LatLon, radius: f64) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * radius * h.sqrt().asin()
}

/// Find the graph node closest to a query coordinate.
///
/// Nodes without a decimal coordinate are skipped. Ties fall to the
/// first node in the graph's stable id ordering. Fails with
/// [`Error::NoLocatedNodes`] when nothing in the graph can be located.
pub fn nearest_node(graph: &Graph, point: LatLon) -> Result<&NodeId> {
    let mut best: Option<(&NodeId, f64)> = None;

    for (id, node) in graph.nodes() {
        let Some(coordinate) = node.coordinate else {
            continue;
        };
        let distance = haversine_distance(point, coordinate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((id, distance)),
        }
    }

    best.map(|(id, _)| id).ok_or(Error::NoLocatedNodes)
}
