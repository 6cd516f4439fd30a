//! Generation capability trait
//!
//! The only seam between the pipeline and the generative model. Tests
//! substitute deterministic implementations returning canned outputs; the
//! real model is never called from a test.

use crate::error::GenerationError;
use crate::prompt::StructuredPrompt;
use async_trait::async_trait;

/// Raw, untrusted output of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelOutput {
    /// Verbatim response text (semi-structured; parsed downstream)
    pub text: String,
    /// Model identity reported by the provider
    pub model: String,
    /// Total tokens consumed
    pub total_tokens: u64,
    /// Provider round-trip latency
    pub latency_ms: u64,
}

/// The generative capability, abstracted for substitution in tests
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Invoke the model once with a bounded wait
    ///
    /// Implementations must not retry internally; transient failures are
    /// surfaced as typed errors for the orchestrator's retry policy.
    ///
    /// # Errors
    /// [`GenerationError::Timeout`] when the bounded wait elapses,
    /// [`GenerationError::Unavailable`] on transport or provider failure,
    /// [`GenerationError::InvalidPrompt`] for prompts rejected pre-dispatch.
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<RawModelOutput, GenerationError>;
}
