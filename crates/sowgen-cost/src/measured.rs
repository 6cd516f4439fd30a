//! Measured-works methodology — per-line quantities priced against rates

use crate::snapshot::MarketRateSnapshot;
use sowgen_domain::{CostBreakdownLine, ParsedSowDraft};

/// Fallback weekly crew rate when the snapshot has no labour category
const DEFAULT_LABOUR_RATE: f64 = 1800.0;

/// Measured breakdown from the draft's materials and work phases
///
/// Material lines keep the model's unit cost when one is given, otherwise
/// the snapshot rate for the category; unpriceable lines carry a zero rate
/// rather than being dropped, so the breakdown stays traceable to the draft.
/// Each work phase contributes one labour line priced per week.
#[must_use]
pub fn breakdown(draft: &ParsedSowDraft, snapshot: &MarketRateSnapshot) -> Vec<CostBreakdownLine> {
    let mut lines = Vec::with_capacity(draft.materials.len() + draft.work_phases.len());

    for material in &draft.materials {
        let snapshot_rate = snapshot.rate_for(&material.category);
        let unit_rate = if material.unit_cost > 0.0 {
            material.unit_cost
        } else {
            snapshot_rate.map_or(0.0, |r| r.unit_rate)
        };
        let unit = if material.unit.is_empty() {
            snapshot_rate.map_or_else(|| "item".to_string(), |r| r.unit.clone())
        } else {
            material.unit.clone()
        };
        lines.push(CostBreakdownLine::measured(
            material.category.clone(),
            material.name.clone(),
            material.quantity,
            unit,
            unit_rate,
        ));
    }

    let labour_rate = snapshot
        .rate_for("labour")
        .map_or(DEFAULT_LABOUR_RATE, |r| r.unit_rate);
    for phase in &draft.work_phases {
        if phase.duration_weeks > 0.0 {
            lines.push(CostBreakdownLine::measured(
                "labour",
                format!("{} crew", phase.name),
                phase.duration_weeks,
                "week",
                labour_rate,
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sowgen_domain::draft::DraftMaterialItem;
    use sowgen_domain::sow::WorkPhase;

    fn material(category: &str, quantity: f64, unit: &str, unit_cost: f64) -> DraftMaterialItem {
        DraftMaterialItem {
            category: category.to_string(),
            name: format!("{category} item"),
            quantity,
            unit: unit.to_string(),
            unit_cost,
            supplier: None,
        }
    }

    #[test]
    fn model_priced_lines_keep_their_rate() {
        let mut draft = ParsedSowDraft::default();
        draft.materials = vec![material("timber", 24.0, "length", 18.50)];
        let lines = breakdown(&draft, &MarketRateSnapshot::baseline(Utc::now()));
        assert_eq!(lines.len(), 1);
        assert!((lines[0].unit_rate - 18.50).abs() < 1e-9);
        assert!((lines[0].total_cost - 24.0 * 18.50).abs() < 1e-9);
    }

    #[test]
    fn unpriced_lines_fall_back_to_snapshot_rate() {
        let mut draft = ParsedSowDraft::default();
        draft.materials = vec![material("insulation", 40.0, "", 0.0)];
        let snapshot = MarketRateSnapshot::baseline(Utc::now());
        let lines = breakdown(&draft, &snapshot);
        let expected = snapshot.rate_for("insulation").unwrap();
        assert!((lines[0].unit_rate - expected.unit_rate).abs() < 1e-9);
        assert_eq!(lines[0].unit, expected.unit);
    }

    #[test]
    fn unknown_category_without_price_carries_zero_rate() {
        let mut draft = ParsedSowDraft::default();
        draft.materials = vec![material("unobtainium", 3.0, "item", 0.0)];
        let lines = breakdown(&draft, &MarketRateSnapshot::baseline(Utc::now()));
        assert_eq!(lines[0].total_cost, 0.0);
    }

    #[test]
    fn work_phases_contribute_labour_lines() {
        let mut draft = ParsedSowDraft::default();
        draft.work_phases = vec![
            WorkPhase {
                sequence: 1,
                name: "Strip out".to_string(),
                duration_weeks: 2.0,
                resources: Vec::new(),
                dependencies: Vec::new(),
                risk_factors: Vec::new(),
            },
            WorkPhase {
                sequence: 2,
                name: "Unscheduled".to_string(),
                duration_weeks: 0.0,
                resources: Vec::new(),
                dependencies: Vec::new(),
                risk_factors: Vec::new(),
            },
        ];
        let snapshot = MarketRateSnapshot::baseline(Utc::now());
        let lines = breakdown(&draft, &snapshot);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].category, "labour");
        assert!((lines[0].quantity - 2.0).abs() < 1e-9);
    }

    #[test]
    fn empty_draft_yields_no_lines() {
        let lines = breakdown(
            &ParsedSowDraft::default(),
            &MarketRateSnapshot::baseline(Utc::now()),
        );
        assert!(lines.is_empty());
    }
}
