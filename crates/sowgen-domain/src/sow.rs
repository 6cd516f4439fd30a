//! Scope of work — the central, versioned document
//!
//! A [`ScopeOfWork`] is assembled exactly once per generation, persisted,
//! and never structurally rewritten: the only mutations allowed afterwards
//! are the `Generated -> Approved` status transition and appending new
//! validation results. A further generation request produces a brand-new
//! version, never an edit.

use crate::cost::CostEstimate;
use crate::draft::ParsedSowDraft;
use crate::error::DomainError;
use crate::hash::ContentHash;
use crate::ids::{ProjectId, SowId};
use crate::validation::{ComplianceCheck, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One RIBA plan-of-work stage (0..=7)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibaStage {
    /// Stage number, unique within a document, in 0..=7
    pub number: u8,
    /// Stage title
    pub title: String,
    /// What the stage covers for this project
    pub description: String,
    /// Deliverables produced during the stage
    pub deliverables: Vec<String>,
    /// Expected duration
    pub duration_weeks: f64,
    /// Stage numbers this stage depends on
    pub dependencies: Vec<u8>,
}

/// One technical requirement within a specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalRequirement {
    /// Parameter name (e.g. "floor joist depth")
    pub parameter: String,
    /// Required value
    pub value: String,
    /// Unit, where applicable
    pub unit: Option<String>,
    /// Referenced standard (e.g. "BS EN 1995-1-1")
    pub standard: Option<String>,
}

/// Technical specification for one category of the works
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSpecification {
    /// Category (e.g. "structural", "insulation", "electrical")
    pub category: String,
    /// Concrete requirements
    pub requirements: Vec<TechnicalRequirement>,
    /// Compliance notes
    pub compliance_notes: Vec<String>,
}

/// One line in the materials schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    /// Material name
    pub name: String,
    /// Quantity
    pub quantity: f64,
    /// Unit of measurement
    pub unit: String,
    /// Unit cost in document currency
    pub unit_cost: f64,
    /// Line total
    pub total_cost: f64,
    /// Preferred supplier, if named
    pub supplier: Option<String>,
}

/// Materials grouped by category with running subtotals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCategoryTotals {
    /// Category name
    pub category: String,
    /// Line items
    pub items: Vec<MaterialLine>,
    /// Category subtotal
    pub subtotal: f64,
}

/// Categorized materials schedule with grand total
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialsSchedule {
    /// Categories in insertion order
    pub categories: Vec<MaterialCategoryTotals>,
    /// Grand total across categories
    pub grand_total: f64,
}

impl MaterialsSchedule {
    /// Group raw draft items into a schedule with computed totals
    #[must_use]
    pub fn from_draft(draft: &ParsedSowDraft) -> Self {
        let mut categories: Vec<MaterialCategoryTotals> = Vec::new();
        for item in &draft.materials {
            let total_cost = item.quantity * item.unit_cost;
            let line = MaterialLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                unit_cost: item.unit_cost,
                total_cost,
                supplier: item.supplier.clone(),
            };
            match categories.iter_mut().find(|c| c.category == item.category) {
                Some(cat) => {
                    cat.subtotal += total_cost;
                    cat.items.push(line);
                }
                None => categories.push(MaterialCategoryTotals {
                    category: item.category.clone(),
                    subtotal: total_cost,
                    items: vec![line],
                }),
            }
        }
        let grand_total = categories.iter().map(|c| c.subtotal).sum();
        Self {
            categories,
            grand_total,
        }
    }

    /// True when no category has any line items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.items.is_empty())
    }
}

/// One ordered phase of the works
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPhase {
    /// Execution order (1-based)
    pub sequence: u32,
    /// Phase name
    pub name: String,
    /// Expected duration
    pub duration_weeks: f64,
    /// Resource requirements (trades, plant)
    pub resources: Vec<String>,
    /// Sequence numbers this phase depends on
    pub dependencies: Vec<u32>,
    /// Known risk factors
    pub risk_factors: Vec<String>,
}

/// A deliverable mapped to a RIBA stage and recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    /// Deliverable title
    pub title: String,
    /// RIBA stage producing it
    pub stage: u8,
    /// Recipient (client, building control, contractor)
    pub recipient: String,
}

/// Lifecycle status; the only legal transition is `Generated -> Approved`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SowStatus {
    /// Produced by the pipeline, awaiting approval
    Generated,
    /// Approved by the client
    Approved,
}

/// Metadata about the generation run that produced a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model identity reported by the provider
    pub model: String,
    /// Total tokens consumed
    pub total_tokens: u64,
    /// Provider round-trip latency
    pub latency_ms: u64,
    /// Blake3 hash of the raw model output
    pub raw_output_hash: ContentHash,
    /// Derived confidence in [0, 1]; parse success + validation + model
    pub confidence: f64,
}

/// The scope-of-work document
///
/// Versions are monotonic per project starting at 1; the version field is
/// assigned by the repository at persist time, never chosen by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeOfWork {
    /// Document identifier
    pub id: SowId,
    /// Owning project
    pub project_id: ProjectId,
    /// Monotonic per-project version, starting at 1
    pub version: u32,
    /// Lifecycle status
    pub status: SowStatus,
    /// Ordered RIBA stages
    pub riba_stages: Vec<RibaStage>,
    /// Technical specifications
    pub specifications: Vec<TechnicalSpecification>,
    /// Materials schedule with totals
    pub materials: MaterialsSchedule,
    /// Ordered work phases
    pub work_phases: Vec<WorkPhase>,
    /// Deliverables
    pub deliverables: Vec<Deliverable>,
    /// Embedded cost estimate
    pub cost_estimate: CostEstimate,
    /// Validation results, append-only
    pub validation_results: Vec<ValidationResult>,
    /// Standard-level compliance lines
    pub compliance_checks: Vec<ComplianceCheck>,
    /// Generation run metadata
    pub metadata: GenerationMetadata,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Approval timestamp, set by the repository on approval
    pub approved_at: Option<DateTime<Utc>>,
}

impl ScopeOfWork {
    /// Assemble a document from a parsed draft plus validation and cost
    ///
    /// Checks the structural invariants: stage numbers unique and in 0..=7,
    /// stage/phase dependencies resolving within the document, confidence in
    /// [0, 1]. The version starts at 1 and is reassigned by the repository.
    ///
    /// # Errors
    /// Returns a [`DomainError`] naming the first violated invariant.
    pub fn assemble(
        project_id: ProjectId,
        draft: &ParsedSowDraft,
        cost_estimate: CostEstimate,
        validation_results: Vec<ValidationResult>,
        compliance_checks: Vec<ComplianceCheck>,
        metadata: GenerationMetadata,
    ) -> Result<Self, DomainError> {
        let mut seen = BTreeSet::new();
        for stage in &draft.riba_stages {
            if stage.number > 7 {
                return Err(DomainError::StageOutOfRange {
                    number: stage.number,
                });
            }
            if !seen.insert(stage.number) {
                return Err(DomainError::DuplicateStage {
                    number: stage.number,
                });
            }
        }
        for stage in &draft.riba_stages {
            for dep in &stage.dependencies {
                if !seen.contains(dep) {
                    return Err(DomainError::DanglingStageDependency {
                        stage: stage.number,
                        dependency: *dep,
                    });
                }
            }
        }
        let phases: BTreeSet<u32> = draft.work_phases.iter().map(|p| p.sequence).collect();
        for phase in &draft.work_phases {
            for dep in &phase.dependencies {
                if !phases.contains(dep) {
                    return Err(DomainError::DanglingPhaseDependency {
                        phase: phase.sequence,
                        dependency: *dep,
                    });
                }
            }
        }
        if !(0.0..=1.0).contains(&metadata.confidence) {
            return Err(DomainError::ConfidenceOutOfRange {
                value: metadata.confidence,
            });
        }

        let mut riba_stages = draft.riba_stages.clone();
        riba_stages.sort_by_key(|s| s.number);
        let mut work_phases = draft.work_phases.clone();
        work_phases.sort_by_key(|p| p.sequence);

        Ok(Self {
            id: SowId::new(),
            project_id,
            version: 1,
            status: SowStatus::Generated,
            riba_stages,
            specifications: draft.specifications.clone(),
            materials: MaterialsSchedule::from_draft(draft),
            work_phases,
            deliverables: draft.deliverables.clone(),
            cost_estimate,
            validation_results,
            compliance_checks,
            metadata,
            created_at: Utc::now(),
            approved_at: None,
        })
    }

    /// Repository-assigned version; not for use outside persistence
    ///
    /// # Errors
    /// Rejects version 0.
    pub fn with_version(mut self, version: u32) -> Result<Self, DomainError> {
        if version == 0 {
            return Err(DomainError::InvalidVersion { version });
        }
        self.version = version;
        Ok(self)
    }

    /// True once approved
    #[inline]
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == SowStatus::Approved
    }

    /// Transition `Generated -> Approved`, stamping the approval time
    ///
    /// Idempotent: approving an already-approved document keeps the original
    /// approval timestamp.
    #[must_use]
    pub fn approved(mut self, at: DateTime<Utc>) -> Self {
        if self.status == SowStatus::Generated {
            self.status = SowStatus::Approved;
            self.approved_at = Some(at);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostConfidence, CostEstimate, CostMethodology};
    use crate::draft::DraftMaterialItem;

    fn metadata(confidence: f64) -> GenerationMetadata {
        GenerationMetadata {
            model: "test-model".to_string(),
            total_tokens: 100,
            latency_ms: 50,
            raw_output_hash: ContentHash::compute(b"raw"),
            confidence,
        }
    }

    fn estimate() -> CostEstimate {
        CostEstimate::new(
            CostMethodology::Elemental,
            "GBP",
            Vec::new(),
            CostConfidence::weighted(0.5, 0.5, 0.5, 0.5),
            "snap",
            Utc::now(),
        )
    }

    fn stage(number: u8, dependencies: Vec<u8>) -> RibaStage {
        RibaStage {
            number,
            title: format!("Stage {number}"),
            description: String::new(),
            deliverables: Vec::new(),
            duration_weeks: 2.0,
            dependencies,
        }
    }

    #[test]
    fn assemble_accepts_valid_draft() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(0, vec![]), stage(1, vec![0])];
        let sow = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.6),
        )
        .unwrap();
        assert_eq!(sow.version, 1);
        assert_eq!(sow.status, SowStatus::Generated);
        assert_eq!(sow.riba_stages.len(), 2);
    }

    #[test]
    fn assemble_rejects_stage_out_of_range() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(8, vec![])];
        let err = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.6),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::StageOutOfRange { number: 8 }));
    }

    #[test]
    fn assemble_rejects_duplicate_stage() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(2, vec![]), stage(2, vec![])];
        let err = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.6),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateStage { number: 2 }));
    }

    #[test]
    fn assemble_rejects_dangling_stage_dependency() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(1, vec![0])];
        let err = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.6),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DanglingStageDependency {
                stage: 1,
                dependency: 0
            }
        ));
    }

    #[test]
    fn assemble_sorts_stages_by_number() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(3, vec![]), stage(0, vec![]), stage(1, vec![])];
        let sow = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.5),
        )
        .unwrap();
        let numbers: Vec<u8> = sow.riba_stages.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![0, 1, 3]);
    }

    #[test]
    fn approval_is_idempotent() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(0, vec![])];
        let sow = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.5),
        )
        .unwrap();

        let first = Utc::now();
        let approved = sow.approved(first);
        assert!(approved.is_approved());
        assert_eq!(approved.approved_at, Some(first));

        let later = first + chrono::Duration::hours(1);
        let again = approved.approved(later);
        assert_eq!(again.approved_at, Some(first));
    }

    #[test]
    fn with_version_rejects_zero() {
        let mut draft = ParsedSowDraft::default();
        draft.riba_stages = vec![stage(0, vec![])];
        let sow = ScopeOfWork::assemble(
            ProjectId::new(),
            &draft,
            estimate(),
            Vec::new(),
            Vec::new(),
            metadata(0.5),
        )
        .unwrap();
        assert!(sow.with_version(0).is_err());
    }

    #[test]
    fn materials_schedule_groups_and_totals() {
        let mut draft = ParsedSowDraft::default();
        draft.materials = vec![
            DraftMaterialItem {
                category: "timber".to_string(),
                name: "C24 joists".to_string(),
                quantity: 20.0,
                unit: "length".to_string(),
                unit_cost: 18.0,
                supplier: None,
            },
            DraftMaterialItem {
                category: "timber".to_string(),
                name: "OSB deck".to_string(),
                quantity: 15.0,
                unit: "sheet".to_string(),
                unit_cost: 22.0,
                supplier: Some("local merchant".to_string()),
            },
            DraftMaterialItem {
                category: "insulation".to_string(),
                name: "PIR board 100mm".to_string(),
                quantity: 30.0,
                unit: "m2".to_string(),
                unit_cost: 14.0,
                supplier: None,
            },
        ];
        let schedule = MaterialsSchedule::from_draft(&draft);
        assert_eq!(schedule.categories.len(), 2);
        let timber = &schedule.categories[0];
        assert_eq!(timber.category, "timber");
        assert!((timber.subtotal - (360.0 + 330.0)).abs() < 1e-9);
        assert!((schedule.grand_total - (690.0 + 420.0)).abs() < 1e-9);
        assert!(!schedule.is_empty());
    }
}
