//! Cost estimation errors

use thiserror::Error;

/// Failures raised by snapshot providers
///
/// Estimation itself is infallible once a snapshot is in hand; only
/// acquiring the snapshot can fail.
#[derive(Debug, Error)]
pub enum CostError {
    /// No market-rate snapshot could be obtained
    #[error("market rate snapshot unavailable: {0}")]
    SnapshotUnavailable(String),
}
