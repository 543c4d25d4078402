use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the road-safety library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Survey metadata could not be located at the resolved path.
    #[error("survey metadata not found at {path}")]
    SurveyNotFound { path: PathBuf },

    /// Raised when a node identifier could not be found in the graph.
    #[error("unknown node id: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a coordinate query cannot be resolved because no
    /// surveyed node carries a usable decimal coordinate.
    #[error("no surveyed node carries a usable coordinate")]
    NoLocatedNodes,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for survey metadata parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
