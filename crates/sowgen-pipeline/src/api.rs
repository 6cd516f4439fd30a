//! Request and summary shapes at the pipeline boundary

use serde::{Deserialize, Serialize};
use sowgen_domain::{
    has_critical_failure, summary_score, CouncilData, DocumentContext, GenerationPreferences,
    ProjectBrief, ProjectId, ProjectType, Requirements, ValidationResult,
};

/// One generation request, as received from the API layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Owning project
    pub project_id: ProjectId,
    /// Property address
    pub address: String,
    /// Project type
    pub project_type: ProjectType,
    /// Client requirements
    pub requirements: Requirements,
    /// Council constraints, as returned by the council lookup
    pub council_data: CouncilData,
    /// Generation preferences
    pub preferences: GenerationPreferences,
    /// Uploaded document context
    #[serde(default)]
    pub documents: Vec<DocumentContext>,
}

impl GenerationRequest {
    /// Reshape into the domain brief for normalization
    #[must_use]
    pub fn into_brief(self) -> ProjectBrief {
        ProjectBrief {
            project_id: self.project_id,
            address: self.address,
            project_type: self.project_type,
            requirements: self.requirements,
            council: self.council_data,
            preferences: self.preferences,
            documents: self.documents,
        }
    }
}

/// Validation summary served for a stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Arithmetic mean of checker scores (0 on critical failure)
    pub mean_score: f64,
    /// Whether every checker passed
    pub passed: bool,
    /// Whether a critical checker failed
    pub critical_failure: bool,
    /// All checker recommendations, in checker order
    pub recommendations: Vec<String>,
}

impl ValidationSummary {
    /// Summarise stored validation results
    #[must_use]
    pub fn from_results(results: &[ValidationResult]) -> Self {
        Self {
            mean_score: summary_score(results),
            passed: !results.is_empty() && results.iter().all(|r| r.passed),
            critical_failure: has_critical_failure(results),
            recommendations: results
                .iter()
                .flat_map(|r| r.recommendations.iter().cloned())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use sowgen_domain::ComplianceDomain;

    fn result(score: f64, passed: bool, critical: bool) -> ValidationResult {
        ValidationResult {
            validator: "test".to_string(),
            domain: ComplianceDomain::Thermal,
            passed,
            score,
            critical,
            issues: Vec::new(),
            recommendations: vec![format!("recommendation at {score}")],
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn summary_averages_scores() {
        let summary = ValidationSummary::from_results(&[
            result(80.0, true, false),
            result(60.0, true, false),
        ]);
        assert_eq!(summary.mean_score, 70.0);
        assert!(summary.passed);
        assert!(!summary.critical_failure);
        assert_eq!(summary.recommendations.len(), 2);
    }

    #[test]
    fn critical_failure_zeroes_the_summary() {
        let summary = ValidationSummary::from_results(&[
            result(90.0, true, false),
            result(20.0, false, true),
        ]);
        assert_eq!(summary.mean_score, 0.0);
        assert!(summary.critical_failure);
        assert!(!summary.passed);
    }

    #[test]
    fn empty_results_do_not_pass() {
        let summary = ValidationSummary::from_results(&[]);
        assert!(!summary.passed);
        assert_eq!(summary.mean_score, 0.0);
    }
}
