//! Cost estimate entity
//!
//! The total is never trusted from upstream: [`CostEstimate::new`] recomputes
//! it as the sum of breakdown line totals, so the reconciliation invariant
//! holds for every constructed estimate, including the zero-line case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two interchangeable cost-measurement methodologies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostMethodology {
    /// Coarse elemental category totals
    Elemental,
    /// Fine-grained measured-quantity line items
    MeasuredWorks,
}

impl CostMethodology {
    /// Label used in reports
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Elemental => "elemental",
            Self::MeasuredWorks => "measured-works",
        }
    }
}

/// One category line in the cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownLine {
    /// Cost category (elemental group or measured item)
    pub category: String,
    /// Human-readable description
    pub description: String,
    /// Measured quantity
    pub quantity: f64,
    /// Unit of measurement (m2, m3, item, week)
    pub unit: String,
    /// Rate per unit, in the estimate currency
    pub unit_rate: f64,
    /// Line total (quantity x rate, pre-computed by the estimator)
    pub total_cost: f64,
}

impl CostBreakdownLine {
    /// Build a line with the total derived from quantity and rate
    #[must_use]
    pub fn measured(
        category: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_rate: f64,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_rate,
            total_cost: quantity * unit_rate,
        }
    }
}

/// Confidence sub-scores for an estimate, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostConfidence {
    /// Weighted overall confidence
    pub overall: f64,
    /// Completeness of quantities/rates supplied by the draft
    pub data_quality: f64,
    /// Freshness of the market-rate snapshot used
    pub market_stability: f64,
    /// Inverse of special-requirement count/variety
    pub project_complexity: f64,
    /// Proximity of the preferred timeline to now
    pub time_horizon: f64,
}

impl CostConfidence {
    /// Sub-score weights: data quality carries the most signal
    const WEIGHTS: [f64; 4] = [0.35, 0.25, 0.20, 0.20];

    /// Combine sub-scores into a weighted overall confidence
    #[must_use]
    pub fn weighted(
        data_quality: f64,
        market_stability: f64,
        project_complexity: f64,
        time_horizon: f64,
    ) -> Self {
        let subs = [
            data_quality.clamp(0.0, 1.0),
            market_stability.clamp(0.0, 1.0),
            project_complexity.clamp(0.0, 1.0),
            time_horizon.clamp(0.0, 1.0),
        ];
        let overall = subs
            .iter()
            .zip(Self::WEIGHTS.iter())
            .map(|(s, w)| s * w)
            .sum();
        Self {
            overall,
            data_quality: subs[0],
            market_stability: subs[1],
            project_complexity: subs[2],
            time_horizon: subs[3],
        }
    }
}

/// Lifecycle status of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateStatus {
    /// Produced by the pipeline, not yet client-facing
    Draft,
    /// Issued to the client as part of an approved document
    Issued,
}

/// Authoritative cost estimate, owned by exactly one scope of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Methodology used
    pub methodology: CostMethodology,
    /// ISO currency code
    pub currency: String,
    /// Ordered breakdown lines
    pub breakdown: Vec<CostBreakdownLine>,
    /// Total cost — always the sum of breakdown line totals
    pub total_cost: f64,
    /// Confidence scores
    pub confidence: CostConfidence,
    /// Identity of the market-rate snapshot used
    pub snapshot_ref: String,
    /// Estimate validity window end
    pub valid_until: DateTime<Utc>,
    /// Estimate version (restarts at 1 per scope of work)
    pub version: u32,
    /// Lifecycle status
    pub status: EstimateStatus,
}

impl CostEstimate {
    /// Assemble an estimate, recomputing the total from the breakdown
    ///
    /// The reconciliation invariant (`total_cost == sum of line totals`) is
    /// established here and nowhere else; callers never set the total.
    #[must_use]
    pub fn new(
        methodology: CostMethodology,
        currency: impl Into<String>,
        breakdown: Vec<CostBreakdownLine>,
        confidence: CostConfidence,
        snapshot_ref: impl Into<String>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        let total_cost = breakdown.iter().map(|line| line.total_cost).sum();
        Self {
            methodology,
            currency: currency.into(),
            breakdown,
            total_cost,
            confidence,
            snapshot_ref: snapshot_ref.into(),
            valid_until,
            version: 1,
            status: EstimateStatus::Draft,
        }
    }

    /// True when the stored total matches the breakdown sum
    #[must_use]
    pub fn reconciles(&self) -> bool {
        let sum: f64 = self.breakdown.iter().map(|line| line.total_cost).sum();
        (self.total_cost - sum).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn confidence() -> CostConfidence {
        CostConfidence::weighted(0.8, 0.9, 0.7, 0.6)
    }

    #[test]
    fn total_is_sum_of_lines() {
        let lines = vec![
            CostBreakdownLine::measured("superstructure", "steelwork", 2.0, "item", 1200.0),
            CostBreakdownLine::measured("roofing", "slate roof", 30.0, "m2", 95.0),
        ];
        let estimate = CostEstimate::new(
            CostMethodology::Elemental,
            "GBP",
            lines,
            confidence(),
            "snapshot-1",
            Utc::now(),
        );
        assert!((estimate.total_cost - (2400.0 + 2850.0)).abs() < 1e-9);
        assert!(estimate.reconciles());
    }

    #[test]
    fn empty_breakdown_totals_zero() {
        let estimate = CostEstimate::new(
            CostMethodology::MeasuredWorks,
            "GBP",
            Vec::new(),
            confidence(),
            "snapshot-1",
            Utc::now(),
        );
        assert_eq!(estimate.total_cost, 0.0);
        assert!(estimate.reconciles());
    }

    #[test]
    fn weighted_confidence_clamps_inputs() {
        let c = CostConfidence::weighted(1.5, -0.2, 0.5, 0.5);
        assert_eq!(c.data_quality, 1.0);
        assert_eq!(c.market_stability, 0.0);
        assert!(c.overall <= 1.0 && c.overall >= 0.0);
    }

    proptest! {
        #[test]
        fn reconciliation_holds_for_any_breakdown(
            lines in proptest::collection::vec((0.0f64..1000.0, 0.0f64..500.0), 0..20)
        ) {
            let breakdown: Vec<_> = lines
                .iter()
                .map(|(qty, rate)| {
                    CostBreakdownLine::measured("cat", "desc", *qty, "m2", *rate)
                })
                .collect();
            let estimate = CostEstimate::new(
                CostMethodology::MeasuredWorks,
                "GBP",
                breakdown,
                CostConfidence::weighted(0.5, 0.5, 0.5, 0.5),
                "snap",
                Utc::now(),
            );
            prop_assert!(estimate.reconciles());
        }
    }
}
