//! Generation client for the scope-of-work pipeline
//!
//! Treats the generative model as an untrusted, non-deterministic external
//! capability behind the [`GenerationClient`] trait. The client adds no
//! business logic beyond request construction and a bounded wait; retry
//! policy belongs to the orchestrator.

pub mod client;
pub mod error;
pub mod http;
pub mod prompt;

pub use client::{GenerationClient, RawModelOutput};
pub use error::GenerationError;
pub use http::HttpGenerationClient;
pub use prompt::StructuredPrompt;
