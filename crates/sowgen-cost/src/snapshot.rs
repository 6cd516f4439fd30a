//! Market-rate snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rate for one material or labour category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRate {
    /// Unit the rate is quoted per
    pub unit: String,
    /// Rate per unit, in the snapshot currency
    pub unit_rate: f64,
}

/// Point-in-time capture of market rates
///
/// Every estimate records the id of the snapshot it priced against, so a
/// stored estimate can always be traced back to its rate basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRateSnapshot {
    /// Snapshot identity, recorded on every estimate as `snapshot_ref`
    pub id: String,
    /// Capture time
    pub captured_at: DateTime<Utc>,
    /// ISO currency code all rates are quoted in
    pub currency: String,
    /// Rates keyed by lowercase category name
    pub rates: HashMap<String, CategoryRate>,
}

impl MarketRateSnapshot {
    /// Built-in GBP baseline used when no live rate feed is configured
    #[must_use]
    pub fn baseline(captured_at: DateTime<Utc>) -> Self {
        let mut rates = HashMap::new();
        let mut put = |category: &str, unit: &str, unit_rate: f64| {
            rates.insert(
                category.to_string(),
                CategoryRate {
                    unit: unit.to_string(),
                    unit_rate,
                },
            );
        };
        put("timber", "length", 19.50);
        put("insulation", "m2", 14.20);
        put("plasterboard", "sheet", 11.80);
        put("roofing", "m2", 92.00);
        put("brick", "thousand", 640.00);
        put("concrete", "m3", 135.00);
        put("glazing", "item", 420.00);
        put("electrical", "point", 68.00);
        put("plumbing", "point", 115.00);
        put("flooring", "m2", 38.00);
        put("waterproofing", "m2", 55.00);
        put("labour", "week", 1850.00);

        Self {
            id: format!("baseline-{}", captured_at.format("%Y-%m-%d")),
            captured_at,
            currency: "GBP".to_string(),
            rates,
        }
    }

    /// Rate for a category, matched case-insensitively
    #[must_use]
    pub fn rate_for(&self, category: &str) -> Option<&CategoryRate> {
        self.rates.get(&category.to_lowercase())
    }

    /// Whole days elapsed since capture (zero when `now` precedes capture)
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.captured_at).num_days().max(0)
    }
}
