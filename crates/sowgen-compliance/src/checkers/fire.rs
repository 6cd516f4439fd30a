//! Fire safety checker (Approved Document B)

use crate::checker::{mentions_any, specs_in_category, ComplianceChecker, Findings};
use sowgen_domain::{
    ComplianceDomain, NormalizedBrief, ParsedSowDraft, ProjectType, Severity, ValidationResult,
};

const ESCAPE_KEYWORDS: &[&str] = &[
    "escape route",
    "escape window",
    "means of escape",
    "protected stair",
];

const ALARM_KEYWORDS: &[&str] = &["smoke alarm", "heat alarm", "interlinked"];

const RESISTANCE_KEYWORDS: &[&str] = &[
    "fd30",
    "fd60",
    "fire door",
    "fire-resisting",
    "fire resistance",
    "30 minute",
];

/// Verifies means of escape, detection and fire resistance provisions
pub struct FireSafetyChecker;

impl FireSafetyChecker {
    fn escape_is_mandatory(project_type: ProjectType) -> bool {
        matches!(
            project_type,
            ProjectType::LoftConversion | ProjectType::BasementConversion
        )
    }
}

impl ComplianceChecker for FireSafetyChecker {
    fn name(&self) -> &'static str {
        "fire-safety"
    }

    fn domain(&self) -> ComplianceDomain {
        ComplianceDomain::FireSafety
    }

    fn standard(&self) -> &'static str {
        "Approved Document B"
    }

    fn critical(&self) -> bool {
        true
    }

    fn check(&self, draft: &ParsedSowDraft, brief: &NormalizedBrief) -> ValidationResult {
        let mut findings = Findings::new();

        if draft.is_empty() {
            findings.issue(
                Severity::Error,
                "document contains no content to assess fire safety",
            );
            findings.recommend("regenerate the scope of work with fire safety provisions");
            findings.award(10.0);
            return findings.finish(self);
        }

        let evidence = draft.evidence_text();

        if specs_in_category(draft, "fire").is_empty()
            && !evidence.contains("approved document b")
        {
            findings.issue(Severity::Warning, "no fire safety specification present");
        } else {
            findings.award(25.0);
        }

        if mentions_any(&evidence, ESCAPE_KEYWORDS) {
            findings.award(35.0);
        } else if Self::escape_is_mandatory(brief.project_type) {
            findings.issue(
                Severity::Error,
                format!(
                    "{} adds a habitable storey but no means of escape is scoped",
                    brief.project_type.label()
                ),
            );
            findings.recommend("scope a protected escape route or compliant escape windows");
        } else {
            findings.issue(Severity::Warning, "means of escape not addressed");
        }

        if mentions_any(&evidence, ALARM_KEYWORDS) {
            findings.award(20.0);
        } else {
            findings.issue(Severity::Warning, "no fire detection or alarm provision");
            findings.recommend("specify mains-wired interlinked smoke alarms to every storey");
        }

        if mentions_any(&evidence, RESISTANCE_KEYWORDS) {
            findings.award(20.0);
        } else {
            findings.issue(
                Severity::Warning,
                "no fire resistance rating given for doors or separating elements",
            );
        }

        findings.finish(self)
    }
}
