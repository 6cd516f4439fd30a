//! Estimate assembly

use crate::snapshot::MarketRateSnapshot;
use crate::{confidence, elemental, measured};
use chrono::{DateTime, Duration, Utc};
use sowgen_domain::{CostEstimate, CostMethodology, NormalizedBrief, ParsedSowDraft};

/// How long an estimate stays valid
const VALIDITY_DAYS: i64 = 90;

/// Produce the estimate for a draft, priced against the given snapshot
///
/// The brief's methodology selects the breakdown strategy; both strategies
/// produce the same estimate shape and both tolerate an empty draft. The
/// total is derived by [`CostEstimate::new`], never computed here.
#[must_use]
pub fn estimate(
    draft: &ParsedSowDraft,
    brief: &NormalizedBrief,
    snapshot: &MarketRateSnapshot,
    now: DateTime<Utc>,
) -> CostEstimate {
    let breakdown = match brief.methodology {
        CostMethodology::Elemental => elemental::breakdown(brief),
        CostMethodology::MeasuredWorks => measured::breakdown(draft, snapshot),
    };
    let confidence = confidence::derive(draft, brief, snapshot, now);

    let estimate = CostEstimate::new(
        brief.methodology,
        snapshot.currency.clone(),
        breakdown,
        confidence,
        snapshot.id.clone(),
        now + Duration::days(VALIDITY_DAYS),
    );
    tracing::info!(
        methodology = brief.methodology.label(),
        lines = estimate.breakdown.len(),
        total = estimate.total_cost,
        confidence = estimate.confidence.overall,
        snapshot = %estimate.snapshot_ref,
        "cost estimate assembled"
    );
    estimate
}
