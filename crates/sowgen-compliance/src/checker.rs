//! Checker trait and result assembly helpers

use chrono::Utc;
use sowgen_domain::{
    ComplianceDomain, NormalizedBrief, ParsedSowDraft, Severity, ValidationIssue, ValidationResult,
};

/// Score below which a checker reports failure
pub const PASS_THRESHOLD: f64 = 60.0;

/// One independent compliance rule checker
///
/// Implementations are pure functions of the draft and brief, and total over
/// malformed or empty sub-sections.
pub trait ComplianceChecker: Send + Sync {
    /// Stable checker name, recorded on every result
    fn name(&self) -> &'static str;

    /// Regulatory domain covered
    fn domain(&self) -> ComplianceDomain;

    /// Standard this checker validates against
    fn standard(&self) -> &'static str;

    /// Whether a failure forces the document summary score to 0
    fn critical(&self) -> bool {
        false
    }

    /// Run the check; never fails
    fn check(&self, draft: &ParsedSowDraft, brief: &NormalizedBrief) -> ValidationResult;
}

/// Accumulates findings into a [`ValidationResult`]
///
/// Shared by every checker so scores clamp to [0, 100] and the pass flag is
/// derived uniformly from [`PASS_THRESHOLD`].
pub struct Findings {
    score: f64,
    issues: Vec<ValidationIssue>,
    recommendations: Vec<String>,
}

impl Findings {
    /// Start with no score and no findings
    #[must_use]
    pub fn new() -> Self {
        Self {
            score: 0.0,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Credit points for evidence found
    pub fn award(&mut self, points: f64) {
        self.score += points;
    }

    /// Record a finding
    pub fn issue(&mut self, severity: Severity, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(severity, message));
    }

    /// Record a recommendation
    pub fn recommend(&mut self, message: impl Into<String>) {
        self.recommendations.push(message.into());
    }

    /// Current score (clamped on finish)
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Assemble the result for the given checker
    #[must_use]
    pub fn finish(self, checker: &dyn ComplianceChecker) -> ValidationResult {
        let score = self.score.clamp(0.0, 100.0);
        ValidationResult {
            validator: checker.name().to_string(),
            domain: checker.domain(),
            passed: score >= PASS_THRESHOLD,
            score,
            critical: checker.critical(),
            issues: self.issues,
            recommendations: self.recommendations,
            checked_at: Utc::now(),
        }
    }
}

impl Default for Findings {
    fn default() -> Self {
        Self::new()
    }
}

/// True when any keyword appears in the evidence text
#[must_use]
pub fn mentions_any(evidence: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| evidence.contains(k))
}

/// Specifications whose category contains the given fragment
#[must_use]
pub fn specs_in_category<'a>(
    draft: &'a ParsedSowDraft,
    fragment: &str,
) -> Vec<&'a sowgen_domain::TechnicalSpecification> {
    draft
        .specifications
        .iter()
        .filter(|s| s.category.to_lowercase().contains(fragment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;
    impl ComplianceChecker for Dummy {
        fn name(&self) -> &'static str {
            "dummy"
        }
        fn domain(&self) -> ComplianceDomain {
            ComplianceDomain::Thermal
        }
        fn standard(&self) -> &'static str {
            "none"
        }
        fn check(&self, _: &ParsedSowDraft, _: &NormalizedBrief) -> ValidationResult {
            Findings::new().finish(self)
        }
    }

    #[test]
    fn finish_clamps_score_and_derives_pass() {
        let mut f = Findings::new();
        f.award(140.0);
        let result = f.finish(&Dummy);
        assert_eq!(result.score, 100.0);
        assert!(result.passed);
        assert!(!result.critical);

        let mut f = Findings::new();
        f.award(30.0);
        let result = f.finish(&Dummy);
        assert!(!result.passed);
    }

    #[test]
    fn mentions_any_is_substring_based() {
        assert!(mentions_any("install fire doors throughout", &["fire door"]));
        assert!(!mentions_any("install doors", &["fire door"]));
    }
}
