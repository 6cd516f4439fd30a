//! Pipeline orchestration for scope-of-work generation
//!
//! Wires the capability crates into one flow: normalize the brief, invoke
//! the generation client with a bounded retry budget, parse the output,
//! validate and estimate concurrently, assemble the document, and persist
//! it through the versioned repository. The caller always receives a
//! discriminated [`GenerationResult`], never an exception path.

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod repository;
pub mod result;

pub use api::{GenerationRequest, ValidationSummary};
pub use config::{ApprovalPolicy, PipelineConfig};
pub use orchestrator::GenerationOrchestrator;
pub use repository::{InMemorySowRepository, RepositoryError, SowRepository};
pub use result::GenerationResult;
