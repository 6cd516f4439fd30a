//! Validation records and summary scoring
//!
//! [`ValidationResult`] entries are append-only on a scope of work: re-running
//! validation appends new records, it never rewrites old ones. The summary
//! score is the arithmetic mean of checker scores, except that a failed
//! checker marked critical forces the summary to 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Regulatory/safety domain covered by one compliance checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceDomain {
    /// Structural integrity (load paths, beam sizing)
    Structural,
    /// Fire safety (escape routes, separation, alarms)
    FireSafety,
    /// Thermal performance (insulation, U-values)
    Thermal,
    /// Heritage and planning (conservation areas, listed buildings)
    Heritage,
    /// Health and safety (CDM, site risk management)
    HealthSafety,
}

impl ComplianceDomain {
    /// Label used in reports
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::FireSafety => "fire-safety",
            Self::Thermal => "thermal",
            Self::Heritage => "heritage",
            Self::HealthSafety => "health-and-safety",
        }
    }
}

/// Severity of a single validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Informational only
    Info,
    /// Should be addressed before approval
    Warning,
    /// Blocks approval when raised by a critical checker
    Error,
}

/// A single finding raised by a checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity
    pub severity: Severity,
    /// Human-readable finding
    pub message: String,
}

impl ValidationIssue {
    /// Shorthand constructor
    #[inline]
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Outcome of one compliance checker run
///
/// Append-only on the owning scope of work; never deleted or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Checker identity (stable name)
    pub validator: String,
    /// Regulatory domain validated
    pub domain: ComplianceDomain,
    /// Whether the check passed
    pub passed: bool,
    /// Score in [0, 100]
    pub score: f64,
    /// Whether the checker is critical (a failure forces the summary to 0)
    pub critical: bool,
    /// Findings
    pub issues: Vec<ValidationIssue>,
    /// Recommendations for the client / designer
    pub recommendations: Vec<String>,
    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

/// One standard-level compliance line derived from a validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Regulatory domain
    pub domain: ComplianceDomain,
    /// Standard referenced (e.g. "Approved Document B")
    pub standard: String,
    /// Whether the document satisfies the standard's evidence bar
    pub satisfied: bool,
    /// Free-text notes
    pub notes: String,
}

/// Arithmetic-mean summary score with the critical-zero rule
///
/// Empty input scores 0: no evidence is itself a finding.
#[must_use]
pub fn summary_score(results: &[ValidationResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    if has_critical_failure(results) {
        return 0.0;
    }
    let total: f64 = results.iter().map(|r| r.score).sum();
    total / results.len() as f64
}

/// True when any checker flagged critical has failed
#[must_use]
pub fn has_critical_failure(results: &[ValidationResult]) -> bool {
    results.iter().any(|r| r.critical && !r.passed)
}
