//! Compliance validation for scope-of-work drafts
//!
//! A fixed, ordered set of independent rule checkers, each a pure and total
//! function over the draft and normalized brief. Checkers never fail:
//! absence of information is itself a finding, reported with a low score.
//! Order does not affect outcome — no checker reads another's result.

pub mod checker;
pub mod checkers;
pub mod report;

pub use checker::ComplianceChecker;
pub use report::{compliance_checks_from, registry, run_checks};
