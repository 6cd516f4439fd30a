//! Snapshot acquisition

use crate::error::CostError;
use crate::snapshot::MarketRateSnapshot;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Source of the current market-rate snapshot
#[async_trait]
pub trait RateSnapshotProvider: Send + Sync {
    /// Current snapshot to price against
    ///
    /// # Errors
    /// [`CostError::SnapshotUnavailable`] when no snapshot can be obtained.
    async fn current(&self) -> Result<Arc<MarketRateSnapshot>, CostError>;
}

/// Provider backed by a fixed snapshot
pub struct StaticSnapshotProvider {
    snapshot: Arc<MarketRateSnapshot>,
}

impl StaticSnapshotProvider {
    /// Wrap a snapshot
    #[must_use]
    pub fn new(snapshot: MarketRateSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

#[async_trait]
impl RateSnapshotProvider for StaticSnapshotProvider {
    async fn current(&self) -> Result<Arc<MarketRateSnapshot>, CostError> {
        Ok(Arc::clone(&self.snapshot))
    }
}

/// TTL cache in front of another provider
///
/// One snapshot is held for the TTL window; concurrent callers during a
/// refresh share a single upstream fetch.
pub struct CachedSnapshotProvider {
    inner: Arc<dyn RateSnapshotProvider>,
    cache: Cache<(), Arc<MarketRateSnapshot>>,
}

impl CachedSnapshotProvider {
    /// Cache `inner` snapshots for `ttl`
    #[must_use]
    pub fn new(inner: Arc<dyn RateSnapshotProvider>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { inner, cache }
    }
}

#[async_trait]
impl RateSnapshotProvider for CachedSnapshotProvider {
    async fn current(&self) -> Result<Arc<MarketRateSnapshot>, CostError> {
        let inner = Arc::clone(&self.inner);
        self.cache
            .try_get_with((), async move { inner.current().await })
            .await
            .map_err(|e| CostError::SnapshotUnavailable(e.to_string()))
    }
}
