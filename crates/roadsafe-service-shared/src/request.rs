//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations validate all fields and return a `ProblemDetails`
/// error for invalid input. The `request_id` populates the `instance`
/// field of any returned problem. Boxed to keep `Result::Err` small.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// One end of a routing query: a surveyed node id, or a raw
/// `[lat, lon]` pair to be resolved to the nearest node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EndpointSpec {
    Coordinate([f64; 2]),
    Node(String),
}

impl From<EndpointSpec> for roadsafe_lib::RouteEndpoint {
    fn from(value: EndpointSpec) -> Self {
        match value {
            EndpointSpec::Coordinate([lat, lon]) => {
                roadsafe_lib::RouteEndpoint::coordinate(lat, lon)
            }
            EndpointSpec::Node(id) => roadsafe_lib::RouteEndpoint::node(id),
        }
    }
}

impl EndpointSpec {
    fn check(&self, field: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        match self {
            EndpointSpec::Node(id) if id.trim().is_empty() => {
                Err(Box::new(ProblemDetails::bad_request(
                    format!("The '{}' field must name a node or give [lat, lon]", field),
                    request_id,
                )))
            }
            EndpointSpec::Coordinate([lat, lon])
                if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lon) =>
            {
                Err(Box::new(ProblemDetails::bad_request(
                    format!(
                        "The '{}' coordinate must lie within [-90, 90] x [-180, 180]",
                        field
                    ),
                    request_id,
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Supported routing algorithms on the wire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (weighted by hazard-adjusted distance).
    Dijkstra,
    /// A* search with a coordinate heuristic (default).
    #[default]
    AStar,
}

impl From<RouteAlgorithm> for roadsafe_lib::RouteAlgorithm {
    fn from(value: RouteAlgorithm) -> Self {
        match value {
            RouteAlgorithm::Dijkstra => roadsafe_lib::RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar => roadsafe_lib::RouteAlgorithm::AStar,
        }
    }
}

/// Request for computing a route between two endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Starting node id or `[lat, lon]` pair.
    pub start: EndpointSpec,

    /// Destination node id or `[lat, lon]` pair.
    pub end: EndpointSpec,

    /// Routing algorithm to use.
    #[serde(default)]
    pub algorithm: RouteAlgorithm,
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.start.check("start", request_id)?;
        self.end.check("end", request_id)?;
        Ok(())
    }
}
