//! Hazard scoring seam.
//!
//! The graph builder never evaluates hazards itself; it asks an injected
//! [`HazardSource`] for a score in `[0, 1]` per node. The production
//! scorer is an image classifier living outside this crate; callers that
//! have no scorer simply pass `None` and every node is treated as safe.

use crate::survey::SurveyNode;

/// Per-node hazard scorer.
///
/// Implementations must return a value in `[0, 1]`; the builder clamps
/// out-of-range values. A node with no hazard data scores `0.0`: no
/// signal means safe, not unknown.
pub trait HazardSource {
    fn score(&self, node: &SurveyNode) -> f64;
}

impl<F> HazardSource for F
where
    F: Fn(&SurveyNode) -> f64,
{
    fn score(&self, node: &SurveyNode) -> f64 {
        self(node)
    }
}

/// Hazard scores derived from the survey's own image severity ratings.
///
/// Takes the highest severity recorded across a node's images and scales
/// it onto `[0, 1]`. This is the stand-in the external classifier plugs
/// in behind when its model is unavailable.
#[derive(Debug, Clone, Copy)]
pub struct SeverityHazard {
    /// Severity value that maps to a score of 1.0.
    max_severity: f64,
}

impl SeverityHazard {
    pub fn new(max_severity: f64) -> Self {
        Self { max_severity }
    }
}

impl Default for SeverityHazard {
    /// Survey sheets rate severity on a 0-5 scale.
    fn default() -> Self {
        Self { max_severity: 5.0 }
    }
}

impl HazardSource for SeverityHazard {
    fn score(&self, node: &SurveyNode) -> f64 {
        let worst = node
            .images
            .iter()
            .filter_map(|image| image.severity)
            .fold(0.0_f64, f64::max);
        (worst / self.max_severity).clamp(0.0, 1.0)
    }
}
