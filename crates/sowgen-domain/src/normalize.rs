//! Requirements normalizer
//!
//! Canonicalizes a raw [`ProjectBrief`] into the fixed input contract the
//! generator expects. Pure function of its input; fails fast with every
//! violated field listed, not just the first.

use crate::brief::{
    CouncilData, DetailLevel, Dimensions, DocumentContext, ProjectBrief, ProjectType, QualityLevel,
    Timeline,
};
use crate::cost::CostMethodology;
use crate::ids::ProjectId;
use serde::{Deserialize, Serialize};

/// One violated field in a rejected brief
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field path (e.g. "requirements.budget")
    pub field: String,
    /// What was wrong
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Normalization rejected the brief; lists every violated field
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid brief: {} field(s) violated", violations.len())]
pub struct InvalidBriefError {
    /// Every violation found, in field order
    pub violations: Vec<FieldViolation>,
}

/// Canonicalized brief — the generator's fixed input contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBrief {
    /// Owning project
    pub project_id: ProjectId,
    /// Property address
    pub address: String,
    /// Project type
    pub project_type: ProjectType,
    /// Trimmed description
    pub description: String,
    /// Dimensions, if surveyed
    pub dimensions: Option<Dimensions>,
    /// Material categories: preferences merged with project-type defaults
    pub material_categories: Vec<String>,
    /// Budget lower bound (GBP)
    pub budget_min: f64,
    /// Budget upper bound (GBP)
    pub budget_max: f64,
    /// Timeline preference
    pub timeline: Timeline,
    /// Special requirements
    pub special_requirements: Vec<String>,
    /// Council constraints
    pub council: CouncilData,
    /// Cost methodology to use
    pub methodology: CostMethodology,
    /// Target detail level
    pub detail_level: DetailLevel,
    /// RIBA stages to cover, sorted and deduplicated
    pub riba_stages: Vec<u8>,
    /// Quality level
    pub quality: QualityLevel,
    /// Uploaded document context for the prompt
    pub documents: Vec<DocumentContext>,
}

/// Default material categories per project type, applied when the brief
/// names no preferences
fn default_material_categories(project_type: ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::LoftConversion => &["timber", "insulation", "plasterboard", "roofing"],
        ProjectType::Extension => &["masonry", "concrete", "timber", "glazing", "roofing"],
        ProjectType::Renovation => &["plasterboard", "flooring", "decoration", "electrical"],
        ProjectType::GarageConversion => &["insulation", "plasterboard", "flooring", "glazing"],
        ProjectType::BasementConversion => &["concrete", "waterproofing", "insulation", "steel"],
        ProjectType::NewBuild => &["concrete", "masonry", "timber", "roofing", "services"],
    }
}

/// Normalize a brief, collecting every violation before failing
///
/// # Errors
/// Returns [`InvalidBriefError`] listing all violated fields when the brief
/// does not meet the input contract.
pub fn normalize(brief: &ProjectBrief) -> Result<NormalizedBrief, InvalidBriefError> {
    let mut violations = Vec::new();

    let description = brief.requirements.description.trim().to_string();
    if description.is_empty() {
        violations.push(FieldViolation::new(
            "requirements.description",
            "description must not be empty",
        ));
    }

    let budget = brief.requirements.budget;
    if budget.min < 0.0 {
        violations.push(FieldViolation::new(
            "requirements.budget.min",
            "budget minimum must not be negative",
        ));
    }
    if budget.min > budget.max {
        violations.push(FieldViolation::new(
            "requirements.budget",
            format!(
                "budget minimum {} exceeds maximum {}",
                budget.min, budget.max
            ),
        ));
    }

    if let Some(dims) = brief.requirements.dimensions {
        if dims.length_m <= 0.0 || dims.width_m <= 0.0 {
            violations.push(FieldViolation::new(
                "requirements.dimensions",
                "length and width must be positive",
            ));
        }
        if matches!(dims.height_m, Some(h) if h <= 0.0) {
            violations.push(FieldViolation::new(
                "requirements.dimensions.height_m",
                "height must be positive when present",
            ));
        }
    }

    for stage in &brief.preferences.riba_stages {
        if *stage > 7 {
            violations.push(FieldViolation::new(
                "preferences.riba_stages",
                format!("RIBA stage {stage} outside 0..=7"),
            ));
        }
    }

    if !violations.is_empty() {
        return Err(InvalidBriefError { violations });
    }

    let mut material_categories: Vec<String> = brief
        .requirements
        .material_preferences
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();
    if material_categories.is_empty() {
        material_categories = default_material_categories(brief.project_type)
            .iter()
            .map(|s| (*s).to_string())
            .collect();
    }

    let mut riba_stages = if brief.preferences.riba_stages.is_empty() {
        (0..=7).collect::<Vec<u8>>()
    } else {
        brief.preferences.riba_stages.clone()
    };
    riba_stages.sort_unstable();
    riba_stages.dedup();

    Ok(NormalizedBrief {
        project_id: brief.project_id,
        address: brief.address.trim().to_string(),
        project_type: brief.project_type,
        description,
        dimensions: brief.requirements.dimensions,
        material_categories,
        budget_min: budget.min,
        budget_max: budget.max,
        timeline: brief.requirements.timeline,
        special_requirements: brief.requirements.special_requirements.clone(),
        council: brief.council.clone(),
        methodology: brief.preferences.methodology,
        detail_level: brief.preferences.detail_level,
        riba_stages,
        quality: brief.preferences.quality,
        documents: brief.documents.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{
        BudgetRange, GenerationPreferences, Requirements, TimelineFlexibility,
    };

    fn valid_brief() -> ProjectBrief {
        ProjectBrief {
            project_id: ProjectId::new(),
            address: " 12 Hill Road, Bristol ".to_string(),
            project_type: ProjectType::LoftConversion,
            requirements: Requirements {
                description: "Convert loft into a bedroom with en-suite".to_string(),
                dimensions: Some(Dimensions {
                    length_m: 7.0,
                    width_m: 5.0,
                    height_m: Some(2.3),
                }),
                material_preferences: Vec::new(),
                budget: BudgetRange {
                    min: 25_000.0,
                    max: 40_000.0,
                },
                timeline: Timeline {
                    preferred_start: None,
                    flexibility: TimelineFlexibility::Flexible,
                },
                special_requirements: Vec::new(),
            },
            council: CouncilData {
                conservation_area: false,
                listed_building: false,
                planning_restrictions: Vec::new(),
                local_authority: "Bristol City Council".to_string(),
            },
            preferences: GenerationPreferences {
                methodology: CostMethodology::Elemental,
                detail_level: DetailLevel::Standard,
                riba_stages: Vec::new(),
                quality: QualityLevel::Standard,
            },
            documents: Vec::new(),
        }
    }

    #[test]
    fn normalizes_valid_brief_with_defaults() {
        let normalized = normalize(&valid_brief()).unwrap();
        assert_eq!(normalized.address, "12 Hill Road, Bristol");
        assert_eq!(normalized.riba_stages, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        // Loft-conversion defaults applied when no preferences are given
        assert!(normalized.material_categories.contains(&"timber".to_string()));
        assert!(normalized
            .material_categories
            .contains(&"insulation".to_string()));
    }

    #[test]
    fn explicit_material_preferences_override_defaults() {
        let mut brief = valid_brief();
        brief.requirements.material_preferences =
            vec!["Oak Flooring".to_string(), " zinc roofing ".to_string()];
        let normalized = normalize(&brief).unwrap();
        assert_eq!(
            normalized.material_categories,
            vec!["oak flooring".to_string(), "zinc roofing".to_string()]
        );
    }

    #[test]
    fn collects_every_violation() {
        let mut brief = valid_brief();
        brief.requirements.description = "   ".to_string();
        brief.requirements.budget = BudgetRange {
            min: 50_000.0,
            max: 10_000.0,
        };
        brief.requirements.dimensions = Some(Dimensions {
            length_m: 0.0,
            width_m: 4.0,
            height_m: None,
        });
        brief.preferences.riba_stages = vec![3, 9];

        let err = normalize(&brief).unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(err.violations.len(), 4);
        assert!(fields.contains(&"requirements.description"));
        assert!(fields.contains(&"requirements.budget"));
        assert!(fields.contains(&"requirements.dimensions"));
        assert!(fields.contains(&"preferences.riba_stages"));
    }

    #[test]
    fn stage_subset_is_sorted_and_deduplicated() {
        let mut brief = valid_brief();
        brief.preferences.riba_stages = vec![4, 2, 4, 0];
        let normalized = normalize(&brief).unwrap();
        assert_eq!(normalized.riba_stages, vec![0, 2, 4]);
    }

    #[test]
    fn normalization_is_pure() {
        let brief = valid_brief();
        let a = normalize(&brief).unwrap();
        let b = normalize(&brief).unwrap();
        assert_eq!(a, b);
    }
}
