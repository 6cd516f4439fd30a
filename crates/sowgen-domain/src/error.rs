//! Domain errors
//!
//! Raised at construction time when a document would violate one of the
//! entity invariants. Anything constructed without error is safe to persist.

/// Invariant violations detected while assembling domain entities
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// RIBA stage number outside 0..=7
    #[error("RIBA stage {number} outside valid range 0..=7")]
    StageOutOfRange {
        /// Offending stage number
        number: u8,
    },

    /// Duplicate RIBA stage number within one document
    #[error("duplicate RIBA stage {number}")]
    DuplicateStage {
        /// Offending stage number
        number: u8,
    },

    /// Stage dependency refers to a stage not present in the document
    #[error("stage {stage} depends on missing stage {dependency}")]
    DanglingStageDependency {
        /// Stage carrying the dependency
        stage: u8,
        /// Missing dependency
        dependency: u8,
    },

    /// Work phase dependency refers to a phase not present in the document
    #[error("work phase {phase} depends on missing phase {dependency}")]
    DanglingPhaseDependency {
        /// Phase carrying the dependency
        phase: u32,
        /// Missing dependency
        dependency: u32,
    },

    /// Version numbers start at 1
    #[error("invalid document version {version}; versions start at 1")]
    InvalidVersion {
        /// Offending version
        version: u32,
    },

    /// Confidence must lie in [0, 1]
    #[error("confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange {
        /// Offending value
        value: f64,
    },
}
