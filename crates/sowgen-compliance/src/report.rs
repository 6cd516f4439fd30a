//! Running the checker set and shaping results for the document

use crate::checker::ComplianceChecker;
use crate::checkers::{
    FireSafetyChecker, HealthSafetyChecker, HeritageChecker, StructuralChecker, ThermalChecker,
};
use sowgen_domain::{ComplianceCheck, NormalizedBrief, ParsedSowDraft, ValidationResult};

/// The full checker set, in reporting order
#[must_use]
pub fn registry() -> Vec<Box<dyn ComplianceChecker>> {
    vec![
        Box::new(StructuralChecker),
        Box::new(FireSafetyChecker),
        Box::new(ThermalChecker),
        Box::new(HeritageChecker),
        Box::new(HealthSafetyChecker),
    ]
}

/// Run every checker against the draft
///
/// Infallible: checkers report missing information as findings, never as
/// errors. Results come back in registry order.
#[must_use]
pub fn run_checks(draft: &ParsedSowDraft, brief: &NormalizedBrief) -> Vec<ValidationResult> {
    registry()
        .iter()
        .map(|checker| {
            let result = checker.check(draft, brief);
            tracing::debug!(
                validator = checker.name(),
                score = result.score,
                passed = result.passed,
                issues = result.issues.len(),
                "compliance check complete"
            );
            result
        })
        .collect()
}

/// Summarise results as per-standard compliance checks for the document
#[must_use]
pub fn compliance_checks_from(results: &[ValidationResult]) -> Vec<ComplianceCheck> {
    let checkers = registry();
    results
        .iter()
        .map(|result| {
            let standard = checkers
                .iter()
                .find(|c| c.name() == result.validator)
                .map_or("unknown", |c| c.standard());
            let notes = result
                .issues
                .first()
                .map_or_else(|| "no issues raised".to_string(), |i| i.message.clone());
            ComplianceCheck {
                domain: result.domain,
                standard: standard.to_string(),
                satisfied: result.passed,
                notes,
            }
        })
        .collect()
}
