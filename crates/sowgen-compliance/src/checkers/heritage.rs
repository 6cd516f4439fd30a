//! Heritage and planning checker

use crate::checker::{mentions_any, ComplianceChecker, Findings};
use sowgen_domain::{ComplianceDomain, NormalizedBrief, ParsedSowDraft, Severity, ValidationResult};

const PLANNING_KEYWORDS: &[&str] = &[
    "planning permission",
    "planning application",
    "householder application",
    "permitted development",
];

const CONSERVATION_KEYWORDS: &[&str] = &[
    "conservation",
    "heritage statement",
    "matching materials",
    "like-for-like",
];

/// Verifies consents and heritage obligations for constrained sites
///
/// Unconstrained sites pass with a fixed score; the detailed checks only
/// apply when the council data imposes obligations.
pub struct HeritageChecker;

impl ComplianceChecker for HeritageChecker {
    fn name(&self) -> &'static str {
        "heritage"
    }

    fn domain(&self) -> ComplianceDomain {
        ComplianceDomain::Heritage
    }

    fn standard(&self) -> &'static str {
        "Planning (Listed Buildings and Conservation Areas) Act 1990"
    }

    fn check(&self, draft: &ParsedSowDraft, brief: &NormalizedBrief) -> ValidationResult {
        let mut findings = Findings::new();

        let constrained = brief.council.conservation_area
            || brief.council.listed_building
            || !brief.council.planning_restrictions.is_empty();
        if !constrained {
            findings.award(85.0);
            return findings.finish(self);
        }

        let evidence = draft.evidence_text();

        if mentions_any(&evidence, PLANNING_KEYWORDS) {
            findings.award(25.0);
        } else {
            findings.issue(
                Severity::Error,
                "site carries planning constraints but no consent activity is scoped",
            );
            findings.recommend(format!(
                "scope a planning submission to {}",
                brief.council.local_authority
            ));
        }

        if brief.council.listed_building {
            if evidence.contains("listed building consent") {
                findings.award(45.0);
            } else {
                findings.issue(
                    Severity::Error,
                    "listed building but no listed building consent is scoped",
                );
                findings.recommend("scope a listed building consent application before works");
            }
        } else {
            findings.award(45.0);
        }

        if brief.council.conservation_area {
            if mentions_any(&evidence, CONSERVATION_KEYWORDS) {
                findings.award(20.0);
            } else {
                findings.issue(
                    Severity::Warning,
                    "conservation area but no heritage considerations in the document",
                );
            }
        } else {
            findings.award(20.0);
        }

        let addresses_authority = draft.deliverables.iter().any(|d| {
            let recipient = d.recipient.to_lowercase();
            recipient.contains("planning") || recipient.contains("local authority")
        }) || evidence.contains("heritage statement");
        if addresses_authority {
            findings.award(10.0);
        } else {
            findings.issue(
                Severity::Warning,
                "no deliverable addressed to the planning authority",
            );
        }

        findings.finish(self)
    }
}
