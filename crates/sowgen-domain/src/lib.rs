//! Core domain model for the scope-of-work generation pipeline
//!
//! Defines the entities every other crate operates on:
//! - [`ProjectBrief`] and its normalized form (input contract)
//! - [`ParsedSowDraft`] (typed intermediate document)
//! - [`ScopeOfWork`] (the versioned, immutable output document)
//! - [`CostEstimate`] with constructor-enforced total reconciliation
//! - [`ValidationResult`] / [`ComplianceCheck`] records
//!
//! Invariants that hold for every constructed value live here, checked at
//! construction time rather than re-validated downstream.

pub mod brief;
pub mod cost;
pub mod draft;
pub mod error;
pub mod hash;
pub mod ids;
pub mod normalize;
pub mod sow;
pub mod validation;

pub use brief::{
    BudgetRange, CouncilData, DetailLevel, Dimensions, DocumentContext, GenerationPreferences,
    ProjectBrief, ProjectType, QualityLevel, Requirements, Timeline, TimelineFlexibility,
};
pub use cost::{
    CostBreakdownLine, CostConfidence, CostEstimate, CostMethodology, EstimateStatus,
};
pub use draft::{DraftCostLine, ParsedSowDraft};
pub use error::DomainError;
pub use hash::ContentHash;
pub use ids::{ProjectId, SowId};
pub use normalize::{normalize, FieldViolation, InvalidBriefError, NormalizedBrief};
pub use sow::{
    Deliverable, GenerationMetadata, MaterialCategoryTotals, MaterialLine, MaterialsSchedule,
    RibaStage, ScopeOfWork, SowStatus, TechnicalRequirement, TechnicalSpecification, WorkPhase,
};
pub use validation::{
    has_critical_failure, summary_score, ComplianceCheck, ComplianceDomain, Severity,
    ValidationIssue, ValidationResult,
};
