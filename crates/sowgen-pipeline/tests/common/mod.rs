//! Shared fixtures for pipeline integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use sowgen_cost::{MarketRateSnapshot, StaticSnapshotProvider};
use sowgen_domain::{
    BudgetRange, CostMethodology, CouncilData, DetailLevel, GenerationPreferences, ProjectId,
    ProjectType, QualityLevel, Requirements, Timeline, TimelineFlexibility,
};
use sowgen_generation::{GenerationClient, GenerationError, RawModelOutput, StructuredPrompt};
use sowgen_pipeline::{
    GenerationOrchestrator, GenerationRequest, InMemorySowRepository, PipelineConfig,
    SowRepository,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A complete model response that satisfies every compliance checker
pub const THOROUGH_PAYLOAD: &str = r#"{
    "riba_stages": [
        {"number": 2, "title": "Concept Design",
         "description": "Outline design for the loft conversion including the steel beam strategy",
         "deliverables": ["Concept drawings"], "duration_weeks": 3, "dependencies": []},
        {"number": 4, "title": "Technical Design",
         "description": "Structural engineer to provide structural calculations for steel beam and joist sizing",
         "deliverables": ["Structural calculations", "Building regulations package"],
         "duration_weeks": 4, "dependencies": [2]}
    ],
    "specifications": [
        {"category": "structural",
         "requirements": [{"parameter": "floor joist depth", "value": "220", "unit": "mm",
                           "standard": "BS EN 1995-1-1"}],
         "compliance_notes": ["Approved Document A"]},
        {"category": "fire safety",
         "requirements": [{"parameter": "door rating", "value": "FD30",
                           "standard": "Approved Document B"}],
         "compliance_notes": ["Mains-interlinked smoke alarms to every storey",
                              "Protected escape route via FD30 doors",
                              "Escape window to the new bedroom"]},
        {"category": "insulation",
         "requirements": [{"parameter": "roof u-value", "value": "0.15", "unit": "W/m2K",
                           "standard": "Approved Document L"}],
         "compliance_notes": ["PIR insulation between and under rafters"]}
    ],
    "materials": [
        {"category": "timber", "name": "C24 joists 220mm", "quantity": 24,
         "unit": "length", "unit_cost": 18.5},
        {"category": "insulation", "name": "PIR board 100mm", "quantity": 40,
         "unit": "m2", "unit_cost": 14.2}
    ],
    "work_phases": [
        {"sequence": 1, "name": "Enabling works", "duration_weeks": 1,
         "resources": ["scaffold crew"], "dependencies": [],
         "risk_factors": ["CDM 2015 duties apply", "Asbestos survey before strip-out"]},
        {"sequence": 2, "name": "Structural works", "duration_weeks": 3,
         "resources": ["steel erectors"], "dependencies": [1],
         "risk_factors": ["Working at height"]}
    ],
    "deliverables": [
        {"title": "Structural calculations", "stage": 4, "recipient": "building control"}
    ],
    "cost_lines": [{"category": "structure", "amount": 5200}],
    "confidence": 0.9
}"#;

/// Two bare stages and nothing else; parses but fails critical checkers
pub const MINIMAL_LOFT_PAYLOAD: &str = r#"{
    "riba_stages": [
        {"number": 0, "title": "Strategic Definition"},
        {"number": 1, "title": "Preparation and Briefing"}
    ],
    "specifications": [],
    "materials": [],
    "work_phases": [],
    "deliverables": []
}"#;

/// Wrap a payload the way a chatty model would
pub fn fenced(payload: &str) -> String {
    format!("Here is the scope of work you asked for:\n```json\n{payload}\n```\n")
}

/// Client returning the same canned text on every call
pub struct CannedClient {
    text: String,
    calls: AtomicUsize,
}

impl CannedClient {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for CannedClient {
    async fn generate(&self, _: &StructuredPrompt) -> Result<RawModelOutput, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawModelOutput {
            text: self.text.clone(),
            model: "test-model".to_string(),
            total_tokens: 1200,
            latency_ms: 40,
        })
    }
}

/// Client that times out on every call
pub struct TimingOutClient {
    calls: AtomicUsize,
}

impl TimingOutClient {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for TimingOutClient {
    async fn generate(&self, _: &StructuredPrompt) -> Result<RawModelOutput, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Timeout { seconds: 60 })
    }
}

/// Client that stalls for the given delay before answering
pub struct SlowClient {
    delay: std::time::Duration,
}

impl SlowClient {
    pub fn new(delay: std::time::Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl GenerationClient for SlowClient {
    async fn generate(&self, _: &StructuredPrompt) -> Result<RawModelOutput, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(RawModelOutput {
            text: fenced(THOROUGH_PAYLOAD),
            model: "test-model".to_string(),
            total_tokens: 1200,
            latency_ms: 40,
        })
    }
}

/// A valid loft-conversion request for the given project
pub fn loft_request(project_id: ProjectId) -> GenerationRequest {
    GenerationRequest {
        project_id,
        address: "12 Hill Road, Bristol".to_string(),
        project_type: ProjectType::LoftConversion,
        requirements: Requirements {
            description: "Convert loft into a bedroom with en-suite".to_string(),
            dimensions: None,
            material_preferences: Vec::new(),
            budget: BudgetRange {
                min: 25_000.0,
                max: 40_000.0,
            },
            timeline: Timeline {
                preferred_start: None,
                flexibility: TimelineFlexibility::Flexible,
            },
            special_requirements: Vec::new(),
        },
        council_data: CouncilData {
            conservation_area: false,
            listed_building: false,
            planning_restrictions: Vec::new(),
            local_authority: "Bristol City Council".to_string(),
        },
        preferences: GenerationPreferences {
            methodology: CostMethodology::MeasuredWorks,
            detail_level: DetailLevel::Standard,
            riba_stages: Vec::new(),
            quality: QualityLevel::Standard,
        },
        documents: Vec::new(),
    }
}

/// Orchestrator wired to a static baseline snapshot and the given parts
pub fn orchestrator(
    client: Arc<dyn GenerationClient>,
    repository: Arc<dyn SowRepository>,
) -> GenerationOrchestrator {
    orchestrator_with(client, repository, PipelineConfig::default())
}

/// Same wiring with an explicit pipeline configuration
pub fn orchestrator_with(
    client: Arc<dyn GenerationClient>,
    repository: Arc<dyn SowRepository>,
    config: PipelineConfig,
) -> GenerationOrchestrator {
    let snapshot = MarketRateSnapshot::baseline(Utc::now());
    GenerationOrchestrator::new(
        client,
        Arc::new(StaticSnapshotProvider::new(snapshot)),
        repository,
        config,
    )
}

/// Fresh in-memory repository with the default approval policy
pub fn repository() -> Arc<InMemorySowRepository> {
    Arc::new(InMemorySowRepository::default())
}
