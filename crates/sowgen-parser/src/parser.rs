//! Payload parsing and coercion into a typed draft

use crate::coerce::{as_f64, as_string, as_u32, as_u8, string_list};
use crate::error::ParseError;
use crate::extract::locate_payload;
use crate::schema;
use serde_json::Value;
use sowgen_domain::sow::{
    Deliverable, RibaStage, TechnicalRequirement, TechnicalSpecification, WorkPhase,
};
use sowgen_domain::{DraftCostLine, ParsedSowDraft};
use sowgen_domain::draft::DraftMaterialItem;
use std::collections::BTreeSet;

/// Parse raw model output text into a typed draft
///
/// Locates the JSON payload, validates it against the document schema,
/// coerces scalars, and applies the structural stage/phase identity checks.
/// Semantically empty but schema-valid documents parse successfully.
///
/// # Errors
/// [`ParseError::PayloadNotFound`] when no JSON object can be located,
/// [`ParseError::InvalidJson`] for syntax errors, and
/// [`ParseError::SchemaViolations`] (with a best-effort partial draft) for
/// schema or stage/phase identity violations.
pub fn parse(text: &str) -> Result<ParsedSowDraft, ParseError> {
    let payload = locate_payload(text).ok_or(ParseError::PayloadNotFound)?;

    let value: Value = serde_json::from_str(payload).map_err(|e| ParseError::InvalidJson {
        message: e.to_string(),
    })?;

    let mut violations = schema::violations(&value);
    let draft = map_draft(&value);
    structural_checks(&draft, &mut violations);

    if !violations.is_empty() {
        tracing::warn!(
            count = violations.len(),
            "model payload rejected by schema validation"
        );
        return Err(ParseError::SchemaViolations {
            violations,
            partial: Some(Box::new(draft)),
        });
    }

    tracing::debug!(
        stages = draft.riba_stages.len(),
        specifications = draft.specifications.len(),
        materials = draft.materials.len(),
        "parsed model payload"
    );
    Ok(draft)
}

/// Identity constraints that the schema grammar cannot express
fn structural_checks(draft: &ParsedSowDraft, violations: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    for stage in &draft.riba_stages {
        if stage.number > 7 {
            violations.push(format!(
                "/riba_stages: stage number {} outside 0..=7",
                stage.number
            ));
        }
        if !seen.insert(stage.number) {
            violations.push(format!(
                "/riba_stages: duplicate stage number {}",
                stage.number
            ));
        }
    }
    let mut phases = BTreeSet::new();
    for phase in &draft.work_phases {
        if !phases.insert(phase.sequence) {
            violations.push(format!(
                "/work_phases: duplicate sequence {}",
                phase.sequence
            ));
        }
    }
}

/// Best-effort lenient mapping; total over arbitrary JSON
fn map_draft(value: &Value) -> ParsedSowDraft {
    ParsedSowDraft {
        riba_stages: array_of(value, "riba_stages", map_stage),
        specifications: array_of(value, "specifications", map_specification),
        materials: array_of(value, "materials", map_material),
        work_phases: array_of(value, "work_phases", map_phase),
        deliverables: array_of(value, "deliverables", map_deliverable),
        cost_lines: array_of(value, "cost_lines", map_cost_line),
        model_confidence: value
            .get("confidence")
            .and_then(as_f64)
            .map(|c| c.clamp(0.0, 1.0)),
    }
}

fn array_of<T>(value: &Value, key: &str, map: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| map(item)).collect())
        .unwrap_or_default()
}

fn map_stage(item: &Value) -> Option<RibaStage> {
    Some(RibaStage {
        number: item.get("number").and_then(as_u8)?,
        title: item.get("title").and_then(as_string)?,
        description: item
            .get("description")
            .and_then(as_string)
            .unwrap_or_default(),
        deliverables: string_list(item.get("deliverables")),
        duration_weeks: item
            .get("duration_weeks")
            .and_then(as_f64)
            .unwrap_or(0.0)
            .max(0.0),
        dependencies: item
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(as_u8).collect())
            .unwrap_or_default(),
    })
}

fn map_specification(item: &Value) -> Option<TechnicalSpecification> {
    Some(TechnicalSpecification {
        category: item.get("category").and_then(as_string)?,
        requirements: array_of(item, "requirements", map_requirement),
        compliance_notes: string_list(item.get("compliance_notes")),
    })
}

fn map_requirement(item: &Value) -> Option<TechnicalRequirement> {
    Some(TechnicalRequirement {
        parameter: item.get("parameter").and_then(as_string)?,
        value: item.get("value").and_then(as_string)?,
        unit: item.get("unit").and_then(as_string),
        standard: item.get("standard").and_then(as_string),
    })
}

fn map_material(item: &Value) -> Option<DraftMaterialItem> {
    Some(DraftMaterialItem {
        category: item.get("category").and_then(as_string)?,
        name: item.get("name").and_then(as_string)?,
        quantity: item.get("quantity").and_then(as_f64).unwrap_or(0.0).max(0.0),
        unit: item.get("unit").and_then(as_string).unwrap_or_default(),
        unit_cost: item
            .get("unit_cost")
            .and_then(as_f64)
            .unwrap_or(0.0)
            .max(0.0),
        supplier: item.get("supplier").and_then(as_string),
    })
}

fn map_phase(item: &Value) -> Option<WorkPhase> {
    Some(WorkPhase {
        sequence: item.get("sequence").and_then(as_u32)?,
        name: item.get("name").and_then(as_string)?,
        duration_weeks: item
            .get("duration_weeks")
            .and_then(as_f64)
            .unwrap_or(0.0)
            .max(0.0),
        resources: string_list(item.get("resources")),
        dependencies: item
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(as_u32).collect())
            .unwrap_or_default(),
        risk_factors: string_list(item.get("risk_factors")),
    })
}

fn map_deliverable(item: &Value) -> Option<Deliverable> {
    Some(Deliverable {
        title: item.get("title").and_then(as_string)?,
        stage: item.get("stage").and_then(as_u8)?,
        recipient: item
            .get("recipient")
            .and_then(as_string)
            .unwrap_or_else(|| "client".to_string()),
    })
}

fn map_cost_line(item: &Value) -> Option<DraftCostLine> {
    Some(DraftCostLine {
        category: item.get("category").and_then(as_string)?,
        amount: item.get("amount").and_then(as_f64)?,
    })
}
