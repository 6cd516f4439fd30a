//! Thermal performance checker (Approved Document L)

use crate::checker::{mentions_any, specs_in_category, ComplianceChecker, Findings};
use sowgen_domain::{ComplianceDomain, NormalizedBrief, ParsedSowDraft, Severity, ValidationResult};

const INSULATION_KEYWORDS: &[&str] = &[
    "insulation",
    "insulated",
    "pir",
    "mineral wool",
    "rockwool",
    "celotex",
];

const GLAZING_KEYWORDS: &[&str] = &["double glaz", "triple glaz", "glazing"];

/// Verifies insulation and fabric performance provisions
pub struct ThermalChecker;

impl ComplianceChecker for ThermalChecker {
    fn name(&self) -> &'static str {
        "thermal"
    }

    fn domain(&self) -> ComplianceDomain {
        ComplianceDomain::Thermal
    }

    fn standard(&self) -> &'static str {
        "Approved Document L"
    }

    fn check(&self, draft: &ParsedSowDraft, _brief: &NormalizedBrief) -> ValidationResult {
        let mut findings = Findings::new();

        if draft.is_empty() {
            findings.issue(
                Severity::Warning,
                "document contains no content to assess thermal performance",
            );
            findings.award(15.0);
            return findings.finish(self);
        }

        let evidence = draft.evidence_text();

        let has_spec = !specs_in_category(draft, "insulation").is_empty()
            || !specs_in_category(draft, "thermal").is_empty();
        if has_spec {
            findings.award(35.0);
        } else {
            findings.issue(Severity::Warning, "no insulation specification present");
        }

        if evidence.contains("u-value") || evidence.contains("u value") {
            findings.award(30.0);
        } else {
            findings.issue(Severity::Warning, "no target u-values stated");
            findings.recommend("state target u-values for the upgraded thermal elements");
        }

        if mentions_any(&evidence, INSULATION_KEYWORDS) {
            findings.award(20.0);
        } else {
            findings.issue(Severity::Info, "no insulation materials scoped");
        }

        if mentions_any(&evidence, GLAZING_KEYWORDS) {
            findings.award(15.0);
        } else {
            findings.issue(Severity::Info, "glazing performance not addressed");
        }

        findings.finish(self)
    }
}
