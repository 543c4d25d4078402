//! Road-safety routing library entry points.
//!
//! This crate exposes helpers to load a road survey into memory, build a
//! hazard-weighted routing graph, and run pathfinding over it.
//! Higher-level consumers (CLI, HTTP services) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod coord;
pub mod error;
pub mod graph;
pub mod hazard;
pub mod path;
pub mod routing;
pub mod spatial;
pub mod survey;

pub use coord::{normalize, Normalized};
pub use error::{Error, Result};
pub use graph::{build_graph, Graph, GraphConfig, RoadEdge, RoadNode, DEFAULT_HAZARD_PENALTY};
pub use hazard::{HazardSource, SeverityHazard};
pub use path::{a_star, dijkstra, PathResult, SearchObserver};
pub use routing::{plan_route, RouteAlgorithm, RouteEndpoint, RoutePlan, RouteRequest};
pub use spatial::{haversine_distance, nearest_node, EARTH_RADIUS_M};
pub use survey::{load_survey, LatLon, NodeId, Survey, SurveyNode};
