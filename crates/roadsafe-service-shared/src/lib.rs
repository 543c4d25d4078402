//! Shared infrastructure for road-safety HTTP services.
//!
//! This crate provides the common glue used by the service binaries:
//!
//! - [`AppState`]: survey loaded and graph built once, `Arc`-shared
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses
//! - Request types with validation for each endpoint
//! - Structured logging setup and health probe handlers
//!
//! The services follow a thin-handler pattern: all routing logic lives in
//! `roadsafe-lib`, and handlers only parse, validate, call the library,
//! and format the response.

#![deny(warnings)]

mod health;
pub mod logging;
mod problem;
mod request;
mod response;
mod state;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_NODE,
};
pub use request::{EndpointSpec, RouteAlgorithm, RouteRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
