//! Generation error taxonomy
//!
//! Transient faults (timeout, transport) are retried by the orchestrator up
//! to its budget; a structurally invalid prompt is never retried.

/// Errors from the generation capability
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Provider unreachable or returned a failure status
    #[error("generation provider unavailable: {0}")]
    Unavailable(String),

    /// Hard timeout elapsed before the provider answered
    #[error("generation timed out after {seconds}s")]
    Timeout {
        /// Configured timeout budget
        seconds: u64,
    },

    /// Prompt rejected before dispatch; retrying the same prompt cannot help
    #[error("invalid prompt: {0}")]
    InvalidPrompt(String),
}

impl GenerationError {
    /// Whether the orchestrator may retry this failure
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_unavailable_are_transient() {
        assert!(GenerationError::Timeout { seconds: 30 }.is_transient());
        assert!(GenerationError::Unavailable("503".to_string()).is_transient());
    }

    #[test]
    fn invalid_prompt_is_permanent() {
        assert!(!GenerationError::InvalidPrompt("empty".to_string()).is_transient());
    }
}
