//! Parsed draft — the typed intermediate document
//!
//! Output of the response parser, input to validation and cost estimation.
//! A draft may legitimately be empty in any section: structural validity is
//! the parser's concern, semantic completeness is validation's.

use crate::sow::{Deliverable, RibaStage, TechnicalSpecification, WorkPhase};
use serde::{Deserialize, Serialize};

/// One raw material line as claimed by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMaterialItem {
    /// Material category
    pub category: String,
    /// Material name
    pub name: String,
    /// Quantity
    pub quantity: f64,
    /// Unit of measurement
    pub unit: String,
    /// Claimed unit cost
    pub unit_cost: f64,
    /// Preferred supplier, if named
    pub supplier: Option<String>,
}

/// The model's own cost claim for one category — advisory only
///
/// The cost estimator never trusts these; they feed data-quality scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftCostLine {
    /// Cost category
    pub category: String,
    /// Claimed amount
    pub amount: f64,
}

/// Strongly-typed draft document produced by the response parser
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedSowDraft {
    /// RIBA stages (possibly empty)
    pub riba_stages: Vec<RibaStage>,
    /// Technical specifications (possibly empty)
    pub specifications: Vec<TechnicalSpecification>,
    /// Raw material items (possibly empty)
    pub materials: Vec<DraftMaterialItem>,
    /// Work phases (possibly empty)
    pub work_phases: Vec<WorkPhase>,
    /// Deliverables (possibly empty)
    pub deliverables: Vec<Deliverable>,
    /// Model's draft cost claims (advisory)
    pub cost_lines: Vec<DraftCostLine>,
    /// Model-reported confidence, if present
    pub model_confidence: Option<f64>,
}

impl ParsedSowDraft {
    /// True when every substantive section is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.riba_stages.is_empty()
            && self.specifications.is_empty()
            && self.materials.is_empty()
            && self.work_phases.is_empty()
            && self.deliverables.is_empty()
    }

    /// Stage numbers present in the draft
    #[must_use]
    pub fn stage_numbers(&self) -> Vec<u8> {
        self.riba_stages.iter().map(|s| s.number).collect()
    }

    /// All searchable free text, used by compliance checkers as evidence
    #[must_use]
    pub fn evidence_text(&self) -> String {
        let mut text = String::new();
        for stage in &self.riba_stages {
            text.push_str(&stage.title);
            text.push('\n');
            text.push_str(&stage.description);
            text.push('\n');
            for d in &stage.deliverables {
                text.push_str(d);
                text.push('\n');
            }
        }
        for spec in &self.specifications {
            text.push_str(&spec.category);
            text.push('\n');
            for req in &spec.requirements {
                text.push_str(&req.parameter);
                text.push(' ');
                text.push_str(&req.value);
                if let Some(standard) = &req.standard {
                    text.push(' ');
                    text.push_str(standard);
                }
                text.push('\n');
            }
            for note in &spec.compliance_notes {
                text.push_str(note);
                text.push('\n');
            }
        }
        for phase in &self.work_phases {
            text.push_str(&phase.name);
            text.push('\n');
            for r in &phase.risk_factors {
                text.push_str(r);
                text.push('\n');
            }
        }
        for deliverable in &self.deliverables {
            text.push_str(&deliverable.title);
            text.push('\n');
        }
        text.to_lowercase()
    }
}
