//! Road-safety route planning HTTP microservice.
//!
//! Provides a REST API for computing hazard-aware routes between
//! surveyed nodes or raw coordinates.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Compute a route between two endpoints
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `ROADSAFE_SURVEY_PATH` - Path to the survey metadata JSON (required)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use roadsafe_lib::{
    plan_route, RouteAlgorithm as LibAlgorithm, RouteRequest as LibRequest,
};
use roadsafe_service_shared::{
    from_lib_error, health_live, health_ready, init_logging, AppState, LoggingConfig,
    ProblemDetails, RouteRequest, ServiceResponse, Validate,
};

/// Route response returned to the caller.
#[derive(Debug, Serialize)]
struct RouteResponse {
    /// Ordered node ids from start to goal; `[goal]` when unreachable.
    node_path: Vec<String>,
    /// Decimal `[lat, lon]` pairs for the nodes on the path.
    path_coordinates: Vec<[f64; 2]>,
    /// Total weighted distance in metres; `null` when unreachable.
    distance_m: Option<f64>,
    /// True when no route exists between the resolved endpoints.
    unreachable: bool,
    /// Algorithm used.
    algorithm: String,
    /// Number of hops in the route.
    hops: usize,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response {
    Success(ServiceResponse<RouteResponse>),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    // Load configuration from environment
    let survey_path =
        env::var("ROADSAFE_SURVEY_PATH").unwrap_or_else(|_| "/data/survey.json".to_string());
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(survey_path = %survey_path, port = port, "starting route service");

    // Load application state
    let state = AppState::load(&survey_path).map_err(|e| {
        error!(error = %e, path = %survey_path, "failed to load application state");
        e
    })?;

    info!(nodes = state.graph().len(), "application state loaded");

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the service router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .with_state(state)
}

/// Handle POST /api/v1/route requests.
async fn route_handler(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Response {
    let request_id = generate_request_id();

    info!(
        request_id = %request_id,
        start = ?request.start,
        end = ?request.end,
        algorithm = ?request.algorithm,
        "handling route request"
    );

    if let Err(problem) = request.validate(&request_id) {
        return Response::Error(*problem);
    }

    let graph = state.graph();

    let lib_request = LibRequest {
        start: request.start.clone().into(),
        goal: request.end.clone().into(),
        algorithm: LibAlgorithm::from(request.algorithm),
    };

    let plan = match plan_route(graph, &lib_request) {
        Ok(plan) => plan,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "route planning failed");
            return Response::Error(from_lib_error(&e, &request_id));
        }
    };

    let response = RouteResponse {
        hops: plan.hop_count(),
        path_coordinates: plan
            .path_coordinates
            .iter()
            .map(|c| [c.lat, c.lon])
            .collect(),
        distance_m: plan.distance_m,
        unreachable: plan.unreachable,
        algorithm: plan.algorithm.to_string(),
        node_path: plan.steps,
    };

    info!(
        request_id = %request_id,
        hops = response.hops,
        unreachable = response.unreachable,
        "route computed"
    );

    Response::Success(ServiceResponse::new(response))
}

/// Generate a unique request ID for tracing.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();

    format!("req-{:x}", timestamp)
}
