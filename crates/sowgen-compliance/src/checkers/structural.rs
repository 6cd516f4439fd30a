//! Structural safety checker (Approved Document A)

use crate::checker::{mentions_any, specs_in_category, ComplianceChecker, Findings};
use sowgen_domain::{ComplianceDomain, NormalizedBrief, ParsedSowDraft, ProjectType, Severity, ValidationResult};

const MEMBER_KEYWORDS: &[&str] = &[
    "beam",
    "joist",
    "steel",
    "lintel",
    "load-bearing",
    "load bearing",
    "foundation",
    "padstone",
];

const CALCULATION_KEYWORDS: &[&str] = &["structural engineer", "structural calculation"];

/// Verifies that load paths, member sizing and engineering input are addressed
pub struct StructuralChecker;

impl StructuralChecker {
    fn needs_calculations(project_type: ProjectType) -> bool {
        matches!(
            project_type,
            ProjectType::LoftConversion
                | ProjectType::Extension
                | ProjectType::BasementConversion
                | ProjectType::NewBuild
        )
    }
}

impl ComplianceChecker for StructuralChecker {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn domain(&self) -> ComplianceDomain {
        ComplianceDomain::Structural
    }

    fn standard(&self) -> &'static str {
        "Approved Document A"
    }

    fn critical(&self) -> bool {
        true
    }

    fn check(&self, draft: &ParsedSowDraft, brief: &NormalizedBrief) -> ValidationResult {
        let mut findings = Findings::new();

        if draft.is_empty() {
            findings.issue(
                Severity::Error,
                "document contains no content to assess structural safety",
            );
            findings.recommend("regenerate the scope of work with structural detail");
            findings.award(10.0);
            return findings.finish(self);
        }

        let evidence = draft.evidence_text();
        let specs = specs_in_category(draft, "structur");

        if specs.is_empty() {
            findings.issue(
                Severity::Error,
                "no structural specification category present",
            );
            findings
                .recommend("add a structural specification covering load paths and member sizing");
        } else {
            findings.award(35.0);
        }

        let cites_standard = specs
            .iter()
            .any(|s| s.requirements.iter().any(|r| r.standard.is_some()));
        if cites_standard {
            findings.award(10.0);
        } else {
            findings.issue(
                Severity::Warning,
                "structural requirements cite no design standard",
            );
        }

        if mentions_any(&evidence, MEMBER_KEYWORDS) {
            findings.award(10.0);
        } else {
            findings.issue(
                Severity::Warning,
                "no load-bearing members identified in the document",
            );
        }

        if Self::needs_calculations(brief.project_type) {
            if mentions_any(&evidence, CALCULATION_KEYWORDS) {
                findings.award(45.0);
            } else {
                findings.issue(
                    Severity::Error,
                    format!(
                        "{} requires structural calculations but none are scoped",
                        brief.project_type.label()
                    ),
                );
                findings.recommend(
                    "appoint a structural engineer to produce calculations before construction",
                );
            }
        } else {
            findings.award(45.0);
        }

        findings.finish(self)
    }
}
