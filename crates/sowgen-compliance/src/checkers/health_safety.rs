//! Site health and safety checker (CDM Regulations 2015)

use crate::checker::{mentions_any, ComplianceChecker, Findings};
use sowgen_domain::{ComplianceDomain, NormalizedBrief, ParsedSowDraft, Severity, ValidationResult};

const CDM_KEYWORDS: &[&str] = &["cdm", "principal designer", "principal contractor"];

const SITE_PRACTICE_KEYWORDS: &[&str] = &["method statement", "scaffold", "welfare", "ppe"];

/// Verifies CDM duties, risk planning and site practice provisions
pub struct HealthSafetyChecker;

impl ComplianceChecker for HealthSafetyChecker {
    fn name(&self) -> &'static str {
        "health-safety"
    }

    fn domain(&self) -> ComplianceDomain {
        ComplianceDomain::HealthSafety
    }

    fn standard(&self) -> &'static str {
        "CDM Regulations 2015"
    }

    fn check(&self, draft: &ParsedSowDraft, _brief: &NormalizedBrief) -> ValidationResult {
        let mut findings = Findings::new();

        if draft.is_empty() {
            findings.issue(
                Severity::Warning,
                "document contains no content to assess health and safety",
            );
            findings.award(15.0);
            return findings.finish(self);
        }

        let evidence = draft.evidence_text();

        if mentions_any(&evidence, CDM_KEYWORDS) {
            findings.award(30.0);
        } else {
            findings.issue(Severity::Warning, "CDM 2015 duties not addressed");
            findings.recommend("identify the principal designer and principal contractor");
        }

        let has_risks = draft.work_phases.iter().any(|p| !p.risk_factors.is_empty());
        if has_risks {
            findings.award(30.0);
        } else {
            findings.issue(
                Severity::Warning,
                "work phases carry no identified risk factors",
            );
        }

        if evidence.contains("asbestos") {
            findings.award(20.0);
        } else {
            findings.issue(Severity::Info, "asbestos risk not considered");
            findings.recommend("commission a refurbishment asbestos survey before strip-out");
        }

        let site_practice = mentions_any(&evidence, SITE_PRACTICE_KEYWORDS)
            || draft.work_phases.iter().any(|p| {
                p.resources
                    .iter()
                    .any(|r| mentions_any(&r.to_lowercase(), SITE_PRACTICE_KEYWORDS))
            });
        if site_practice {
            findings.award(20.0);
        } else {
            findings.issue(Severity::Info, "no site practice provisions scoped");
        }

        findings.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::testutil::{brief, thorough_draft};
    use pretty_assertions::assert_eq;
    use sowgen_domain::ProjectType;

    #[test]
    fn thorough_draft_passes() {
        let result =
            HealthSafetyChecker.check(&thorough_draft(), &brief(ProjectType::LoftConversion));
        assert!(result.passed);
        assert!(!result.critical);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn empty_draft_fails_softly() {
        let result = HealthSafetyChecker.check(
            &ParsedSowDraft::default(),
            &brief(ProjectType::LoftConversion),
        );
        assert!(!result.passed);
        assert_eq!(result.score, 15.0);
    }

    #[test]
    fn missing_risk_factors_is_flagged() {
        let mut draft = thorough_draft();
        for phase in &mut draft.work_phases {
            phase.risk_factors.clear();
        }
        let result = HealthSafetyChecker.check(&draft, &brief(ProjectType::LoftConversion));
        assert!(result
            .issues
            .iter()
            .any(|i| i.message.contains("risk factors")));
    }
}
