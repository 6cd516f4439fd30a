//! Parse errors
//!
//! A [`ParseError`] is always a hard pipeline failure: retrying the same
//! prompt is unlikely to fix a schema mismatch, so the orchestrator does not
//! retry parse failures. Schema violations carry a best-effort partial draft
//! for diagnostics.

use sowgen_domain::ParsedSowDraft;

/// Raw model output could not be converted into a typed draft
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No JSON payload could be located in the response text
    #[error("no JSON payload found in model output")]
    PayloadNotFound,

    /// Located payload is not valid JSON
    #[error("payload is not valid JSON: {message}")]
    InvalidJson {
        /// Underlying syntax error
        message: String,
    },

    /// Payload is valid JSON but violates the document schema
    #[error("payload violates schema: {} violation(s)", violations.len())]
    SchemaViolations {
        /// Every violation found, in instance-path order
        violations: Vec<String>,
        /// Best-effort partial draft recovered from the payload
        partial: Option<Box<ParsedSowDraft>>,
    },
}

impl ParseError {
    /// Flatten into caller-facing error strings
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::PayloadNotFound | Self::InvalidJson { .. } => vec![self.to_string()],
            Self::SchemaViolations { violations, .. } => violations.clone(),
        }
    }
}
