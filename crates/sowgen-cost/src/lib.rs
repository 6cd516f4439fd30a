//! Cost estimation against market-rate snapshots
//!
//! Two interchangeable methodologies produce the same estimate shape:
//! elemental (coarse per-category totals from floor area) and measured works
//! (per-line quantities priced against snapshot rates). Snapshot access is a
//! trait so callers choose between a static snapshot and a TTL-cached
//! provider.

pub mod confidence;
pub mod elemental;
pub mod error;
pub mod estimator;
pub mod measured;
pub mod provider;
pub mod snapshot;

pub use error::CostError;
pub use estimator::estimate;
pub use provider::{CachedSnapshotProvider, RateSnapshotProvider, StaticSnapshotProvider};
pub use snapshot::{CategoryRate, MarketRateSnapshot};
