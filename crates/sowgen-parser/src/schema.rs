//! The scope-of-work document schema
//!
//! Required arrays must be present and correctly typed but may legitimately
//! be empty: an empty document is a semantic finding for validation, not a
//! structural failure. Numeric fields admit `number | string` so that scalar
//! coercion can absorb common model quirks.

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

fn numeric() -> Value {
    json!({ "type": ["number", "string"] })
}

fn integer() -> Value {
    json!({ "type": ["integer", "string"] })
}

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// Raw schema document (JSON Schema draft 7)
pub static SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": [
            "riba_stages",
            "specifications",
            "materials",
            "work_phases",
            "deliverables"
        ],
        "properties": {
            "riba_stages": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["number", "title"],
                    "properties": {
                        "number": integer(),
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "deliverables": string_array(),
                        "duration_weeks": numeric(),
                        "dependencies": { "type": "array", "items": integer() }
                    }
                }
            },
            "specifications": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["category"],
                    "properties": {
                        "category": { "type": "string" },
                        "requirements": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["parameter", "value"],
                                "properties": {
                                    "parameter": { "type": "string" },
                                    "value": { "type": ["string", "number"] },
                                    "unit": { "type": ["string", "null"] },
                                    "standard": { "type": ["string", "null"] }
                                }
                            }
                        },
                        "compliance_notes": string_array()
                    }
                }
            },
            "materials": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["category", "name"],
                    "properties": {
                        "category": { "type": "string" },
                        "name": { "type": "string" },
                        "quantity": numeric(),
                        "unit": { "type": "string" },
                        "unit_cost": numeric(),
                        "supplier": { "type": ["string", "null"] }
                    }
                }
            },
            "work_phases": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["sequence", "name"],
                    "properties": {
                        "sequence": integer(),
                        "name": { "type": "string" },
                        "duration_weeks": numeric(),
                        "resources": string_array(),
                        "dependencies": { "type": "array", "items": integer() },
                        "risk_factors": string_array()
                    }
                }
            },
            "deliverables": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["title", "stage"],
                    "properties": {
                        "title": { "type": "string" },
                        "stage": integer(),
                        "recipient": { "type": "string" }
                    }
                }
            },
            "cost_lines": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["category", "amount"],
                    "properties": {
                        "category": { "type": "string" },
                        "amount": numeric()
                    }
                }
            },
            "confidence": numeric()
        }
    })
});

/// Compiled schema, built once per process
pub static COMPILED: Lazy<JSONSchema> =
    Lazy::new(|| JSONSchema::compile(&SCHEMA).expect("embedded scope-of-work schema compiles"));

/// Validate a payload, returning every violation as an instance-path message
#[must_use]
pub fn violations(payload: &Value) -> Vec<String> {
    match COMPILED.validate(payload) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect(),
    }
}
