//! The discriminated generation result

use sowgen_domain::{CostEstimate, ScopeOfWork};
use std::sync::Arc;

/// Outcome of one generation call
///
/// Always a value, never an exception path: `success=false` carries the
/// error list of a hard failure, while soft degradation (low scores, empty
/// sections) rides on a `success=true` result as warnings and
/// recommendations.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Hard success/failure discriminant
    pub success: bool,
    /// The persisted document, with its repository-assigned version
    pub sow: Option<Arc<ScopeOfWork>>,
    /// The embedded cost estimate, surfaced for the API response
    pub estimated_cost: Option<CostEstimate>,
    /// Derived confidence in [0, 1]
    pub confidence: Option<f64>,
    /// Wall-clock pipeline duration
    pub generation_time_ms: u64,
    /// Soft-degradation findings
    pub warnings: Vec<String>,
    /// Hard-failure messages (empty on success)
    pub errors: Vec<String>,
    /// Checker recommendations
    pub recommendations: Vec<String>,
    /// Suggested follow-up actions
    pub next_steps: Vec<String>,
}

impl GenerationResult {
    /// A hard failure carrying its error list
    #[must_use]
    pub fn failure(errors: Vec<String>, generation_time_ms: u64) -> Self {
        Self {
            success: false,
            sow: None,
            estimated_cost: None,
            confidence: None,
            generation_time_ms,
            warnings: Vec::new(),
            errors,
            recommendations: Vec::new(),
            next_steps: Vec::new(),
        }
    }
}
