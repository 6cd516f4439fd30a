//! Pipeline configuration

use std::time::Duration;

/// Policy deciding when a stored document may be approved
///
/// Evaluated at the approve boundary against the stored validation results,
/// never re-derived from the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalPolicy {
    /// Minimum validation summary score required to approve
    pub minimum_score: f64,
    /// Whether a failed critical checker blocks approval outright
    pub block_on_critical: bool,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            minimum_score: 40.0,
            block_on_critical: true,
        }
    }
}

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Extra generation attempts after the first, on transient failures only
    pub max_generation_retries: u32,
    /// Wall-clock budget for the whole pipeline
    pub pipeline_timeout: Duration,
    /// Approval policy applied by the repository
    pub approval_policy: ApprovalPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_generation_retries: 2,
            pipeline_timeout: Duration::from_secs(120),
            approval_policy: ApprovalPolicy::default(),
        }
    }
}
