//! The generation pipeline, end to end

use crate::api::GenerationRequest;
use crate::config::PipelineConfig;
use crate::repository::{RepositoryError, SowRepository};
use crate::result::GenerationResult;
use chrono::Utc;
use sowgen_compliance::{compliance_checks_from, run_checks};
use sowgen_cost::{CostError, RateSnapshotProvider};
use sowgen_domain::sow::GenerationMetadata;
use sowgen_domain::{
    has_critical_failure, normalize, summary_score, ContentHash, DomainError, InvalidBriefError,
    ScopeOfWork,
};
use sowgen_generation::{GenerationClient, GenerationError, RawModelOutput, StructuredPrompt};
use sowgen_parser::ParseError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Confidence weights: parse outcome, validation summary, model self-report
const PARSE_WEIGHT: f64 = 0.3;
const VALIDATION_WEIGHT: f64 = 0.4;
const MODEL_WEIGHT: f64 = 0.3;

/// Model confidence assumed when the payload reports none
const DEFAULT_MODEL_CONFIDENCE: f64 = 0.5;

/// Confidence below which a warning is attached
const LOW_CONFIDENCE: f64 = 0.5;

/// Hard failures that stop the pipeline before persistence
#[derive(Debug, Error)]
enum PipelineError {
    #[error(transparent)]
    Brief(#[from] InvalidBriefError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Snapshot(#[from] CostError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl PipelineError {
    /// Error messages for the failure result, one per underlying cause
    fn messages(&self) -> Vec<String> {
        match self {
            Self::Brief(err) => err
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.field, v.message))
                .collect(),
            Self::Parse(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// Drives one generation request through the whole pipeline
///
/// Normalize, generate with bounded retry, parse, then validate and
/// estimate concurrently, assemble, persist. Persistence happens exactly
/// once, after full assembly, or not at all.
pub struct GenerationOrchestrator {
    client: Arc<dyn GenerationClient>,
    snapshots: Arc<dyn RateSnapshotProvider>,
    repository: Arc<dyn SowRepository>,
    config: PipelineConfig,
}

impl GenerationOrchestrator {
    /// Wire the orchestrator to its collaborators
    #[must_use]
    pub fn new(
        client: Arc<dyn GenerationClient>,
        snapshots: Arc<dyn RateSnapshotProvider>,
        repository: Arc<dyn SowRepository>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            client,
            snapshots,
            repository,
            config,
        }
    }

    /// Run the pipeline for one request
    ///
    /// Always returns a result value: hard failures (invalid brief,
    /// exhausted generation retries, unparseable output, timeout) come back
    /// as `success=false` with errors; low scores and empty sections come
    /// back as warnings on `success=true`.
    pub async fn generate_scope_of_work(&self, request: GenerationRequest) -> GenerationResult {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.config.pipeline_timeout, self.run(request)).await;
        let elapsed = elapsed_ms(started);

        match outcome {
            Ok(Ok(result)) => GenerationResult {
                generation_time_ms: elapsed,
                ..result
            },
            Ok(Err(error)) => {
                tracing::warn!(%error, elapsed_ms = elapsed, "generation pipeline failed");
                GenerationResult::failure(error.messages(), elapsed)
            }
            Err(_) => {
                tracing::warn!(elapsed_ms = elapsed, "generation pipeline deadline exceeded");
                GenerationResult::failure(
                    vec![format!(
                        "pipeline deadline of {}s exceeded",
                        self.config.pipeline_timeout.as_secs()
                    )],
                    elapsed,
                )
            }
        }
    }

    async fn run(&self, request: GenerationRequest) -> Result<GenerationResult, PipelineError> {
        let brief = normalize(&request.into_brief())?;
        let prompt = StructuredPrompt::from_brief(&brief);
        tracing::debug!(
            project_id = %brief.project_id,
            prompt_fingerprint = %prompt.fingerprint(),
            "dispatching generation"
        );

        let raw = self.generate_with_retry(&prompt).await?;
        let draft = sowgen_parser::parse(&raw.text)?;

        // Validation and estimation are independent once parsing is done
        let (validation_results, estimate) = tokio::join!(
            async { run_checks(&draft, &brief) },
            async {
                let snapshot = self.snapshots.current().await?;
                Ok::<_, CostError>(sowgen_cost::estimate(&draft, &brief, &snapshot, Utc::now()))
            }
        );
        let estimate = estimate?;

        let validation = summary_score(&validation_results);
        let model_confidence = draft
            .model_confidence
            .unwrap_or(DEFAULT_MODEL_CONFIDENCE);
        let confidence = (PARSE_WEIGHT
            + VALIDATION_WEIGHT * validation / 100.0
            + MODEL_WEIGHT * model_confidence)
            .clamp(0.0, 1.0);

        let metadata = GenerationMetadata {
            model: raw.model.clone(),
            total_tokens: raw.total_tokens,
            latency_ms: raw.latency_ms,
            raw_output_hash: ContentHash::compute(raw.text.as_bytes()),
            confidence,
        };
        let compliance_checks = compliance_checks_from(&validation_results);
        let sow = ScopeOfWork::assemble(
            brief.project_id,
            &draft,
            estimate.clone(),
            validation_results.clone(),
            compliance_checks,
            metadata,
        )?;
        let stored = self.repository.save(sow).await?;

        let warnings = derive_warnings(&stored, validation, confidence);
        let recommendations: Vec<String> = validation_results
            .iter()
            .flat_map(|r| r.recommendations.iter().cloned())
            .collect();
        let next_steps = derive_next_steps(&stored);

        tracing::info!(
            sow_id = %stored.id,
            version = stored.version,
            confidence,
            validation,
            warnings = warnings.len(),
            "scope of work generated"
        );
        Ok(GenerationResult {
            success: true,
            estimated_cost: Some(estimate),
            confidence: Some(confidence),
            generation_time_ms: 0, // stamped by the caller
            warnings,
            errors: Vec::new(),
            recommendations,
            next_steps,
            sow: Some(stored),
        })
    }

    /// One call plus up to `max_generation_retries` more on transient faults
    async fn generate_with_retry(
        &self,
        prompt: &StructuredPrompt,
    ) -> Result<RawModelOutput, GenerationError> {
        let mut attempt: u32 = 0;
        loop {
            match self.client.generate(prompt).await {
                Ok(output) => return Ok(output),
                Err(error) if error.is_transient() && attempt < self.config.max_generation_retries => {
                    attempt += 1;
                    tracing::warn!(%error, attempt, "transient generation failure, retrying");
                }
                Err(error) => return Err(error),
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn derive_warnings(sow: &ScopeOfWork, validation: f64, confidence: f64) -> Vec<String> {
    let mut warnings = Vec::new();
    if sow.riba_stages.is_empty() {
        warnings.push("document contains no RIBA stages".to_string());
    }
    if sow.materials.is_empty() {
        warnings.push("materials schedule is empty".to_string());
    }
    if sow.work_phases.is_empty() {
        warnings.push("no work phases scoped".to_string());
    }
    if has_critical_failure(&sow.validation_results) {
        warnings.push("a critical compliance checker failed; approval is blocked".to_string());
    } else if validation < 60.0 {
        warnings.push(format!(
            "validation summary score {validation:.0} is below the pass threshold"
        ));
    }
    if confidence < LOW_CONFIDENCE {
        warnings.push(format!("low generation confidence ({confidence:.2})"));
    }
    warnings
}

fn derive_next_steps(sow: &ScopeOfWork) -> Vec<String> {
    let mut steps = vec!["review the generated scope of work".to_string()];
    if has_critical_failure(&sow.validation_results) {
        steps.push("resolve critical compliance findings, then regenerate".to_string());
    } else {
        steps.push("approve the scope of work to issue it".to_string());
        steps.push("obtain contractor quotes against the cost estimate".to_string());
    }
    steps
}
