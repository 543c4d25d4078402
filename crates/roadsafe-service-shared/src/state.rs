//! Application state for the HTTP services.
//!
//! The survey is loaded and the graph built exactly once at startup;
//! handlers share the result read-only through axum's `State` extractor.

use std::path::Path;
use std::sync::Arc;

use roadsafe_lib::{
    build_graph, load_survey, Error as LibError, Graph, GraphConfig, SeverityHazard,
};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load or parse the survey metadata.
    SurveyLoad(LibError),

    /// Survey metadata file not found.
    SurveyNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SurveyLoad(e) => write!(f, "failed to load survey: {}", e),
            Self::SurveyNotFound(path) => write!(f, "survey not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurveyLoad(e) => Some(e),
            Self::SurveyNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::SurveyLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); every clone reads the same
/// immutable graph, so concurrent requests never contend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    graph: Graph,
}

impl AppState {
    /// Load application state from a survey metadata file.
    ///
    /// Builds the routing graph with severity-derived hazard weighting;
    /// a node with no recorded severities stays unweighted.
    pub fn load(survey_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let survey_path = survey_path.as_ref();

        if !survey_path.exists() {
            return Err(AppStateError::SurveyNotFound(
                survey_path.display().to_string(),
            ));
        }

        tracing::info!(path = %survey_path.display(), "loading survey");
        let survey = load_survey(survey_path)?;
        tracing::info!(nodes = survey.len(), "survey loaded");

        let graph = build_graph(
            &survey,
            &GraphConfig::default(),
            Some(&SeverityHazard::default()),
        );

        Ok(Self::from_graph(graph))
    }

    /// Create application state from a pre-built graph.
    ///
    /// Useful for testing handlers without a survey file on disk.
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            inner: Arc::new(AppStateInner { graph }),
        }
    }

    /// Access the routing graph.
    pub fn graph(&self) -> &Graph {
        &self.inner.graph
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.graph.len())
            .finish()
    }
}
