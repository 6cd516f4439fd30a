//! Confidence sub-score derivation

use crate::snapshot::MarketRateSnapshot;
use chrono::{DateTime, Utc};
use sowgen_domain::{CostConfidence, NormalizedBrief, ParsedSowDraft};

/// Snapshot age at which market stability bottoms out
const STALE_AFTER_DAYS: f64 = 180.0;

/// Derive the four confidence sub-scores and their weighted overall
#[must_use]
pub fn derive(
    draft: &ParsedSowDraft,
    brief: &NormalizedBrief,
    snapshot: &MarketRateSnapshot,
    now: DateTime<Utc>,
) -> CostConfidence {
    CostConfidence::weighted(
        data_quality(draft),
        market_stability(snapshot, now),
        project_complexity(brief),
        time_horizon(brief, now),
    )
}

/// Completeness of quantities and rates in the draft
fn data_quality(draft: &ParsedSowDraft) -> f64 {
    if draft.materials.is_empty() {
        // Nothing measurable; elemental fallback carries little cost signal
        return if draft.cost_lines.is_empty() { 0.2 } else { 0.35 };
    }
    let priced = draft
        .materials
        .iter()
        .filter(|m| m.quantity > 0.0 && m.unit_cost > 0.0)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let ratio = priced as f64 / draft.materials.len() as f64;
    0.4 + 0.6 * ratio
}

/// Freshness of the rate snapshot
fn market_stability(snapshot: &MarketRateSnapshot, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let age = snapshot.age_days(now) as f64;
    (1.0 - age / STALE_AFTER_DAYS).clamp(0.2, 1.0)
}

/// Inverse of brief complexity: special requirements and heritage constraints
fn project_complexity(brief: &NormalizedBrief) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let mut score = 1.0 - 0.08 * brief.special_requirements.len() as f64;
    if brief.council.listed_building {
        score -= 0.15;
    }
    if brief.council.conservation_area {
        score -= 0.10;
    }
    score.clamp(0.2, 1.0)
}

/// Proximity of the preferred start to now
fn time_horizon(brief: &NormalizedBrief, now: DateTime<Utc>) -> f64 {
    let Some(start) = brief.timeline.preferred_start else {
        return 0.7;
    };
    let days = (start - now).num_days();
    if days < 0 {
        0.5
    } else if days <= 90 {
        0.9
    } else if days <= 180 {
        0.75
    } else if days <= 365 {
        0.6
    } else {
        0.4
    }
}
