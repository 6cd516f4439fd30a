//! Elemental methodology — coarse per-group allowances from floor area

use sowgen_domain::{CostBreakdownLine, NormalizedBrief, ProjectType, QualityLevel};

/// Elemental group shares of the all-in rate (sum to 1.0)
const GROUPS: &[(&str, f64)] = &[
    ("substructure", 0.10),
    ("superstructure", 0.35),
    ("internal finishes", 0.20),
    ("services", 0.20),
    ("preliminaries", 0.15),
];

/// All-in GBP rate per square metre for a standard-quality build
fn base_rate(project_type: ProjectType) -> f64 {
    match project_type {
        ProjectType::LoftConversion => 1450.0,
        ProjectType::Extension => 1850.0,
        ProjectType::Renovation => 780.0,
        ProjectType::GarageConversion => 950.0,
        ProjectType::BasementConversion => 2600.0,
        ProjectType::NewBuild => 1700.0,
    }
}

fn quality_multiplier(quality: QualityLevel) -> f64 {
    match quality {
        QualityLevel::Budget => 0.85,
        QualityLevel::Standard => 1.0,
        QualityLevel::Premium => 1.3,
    }
}

/// Floor area assumed when the brief gives no dimensions
fn assumed_area(project_type: ProjectType) -> f64 {
    match project_type {
        ProjectType::LoftConversion => 25.0,
        ProjectType::Extension => 20.0,
        ProjectType::Renovation => 60.0,
        ProjectType::GarageConversion => 18.0,
        ProjectType::BasementConversion => 30.0,
        ProjectType::NewBuild => 90.0,
    }
}

/// Elemental breakdown for the brief
///
/// Quantities are the floor area; each group's rate is its share of the
/// quality-adjusted all-in rate.
#[must_use]
pub fn breakdown(brief: &NormalizedBrief) -> Vec<CostBreakdownLine> {
    let area = brief
        .dimensions
        .as_ref()
        .map_or_else(|| assumed_area(brief.project_type), |d| d.floor_area_m2());
    let all_in = base_rate(brief.project_type) * quality_multiplier(brief.quality);

    GROUPS
        .iter()
        .map(|(group, share)| {
            CostBreakdownLine::measured(
                *group,
                format!("{group} allowance, {}", brief.project_type.label()),
                area,
                "m2",
                all_in * share,
            )
        })
        .collect()
}
