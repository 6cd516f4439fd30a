//! Project brief — the immutable input to a generation request
//!
//! Created once by the external project service and handed to the
//! orchestrator by value; never mutated inside the pipeline.

use crate::cost::CostMethodology;
use crate::ids::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed enumeration of supported project types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Converting loft space into habitable rooms
    LoftConversion,
    /// Single or double storey extension
    Extension,
    /// Internal renovation / refurbishment
    Renovation,
    /// Garage conversion to habitable space
    GarageConversion,
    /// Basement excavation or conversion
    BasementConversion,
    /// New build on a cleared plot
    NewBuild,
}

impl ProjectType {
    /// Human-readable label used in prompts and reports
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoftConversion => "loft conversion",
            Self::Extension => "extension",
            Self::Renovation => "renovation",
            Self::GarageConversion => "garage conversion",
            Self::BasementConversion => "basement conversion",
            Self::NewBuild => "new build",
        }
    }
}

/// Budget range in GBP
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

/// Overall dimensions of the works, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length in metres
    pub length_m: f64,
    /// Width in metres
    pub width_m: f64,
    /// Height in metres, where relevant
    pub height_m: Option<f64>,
}

impl Dimensions {
    /// Plan-view floor area in square metres
    #[inline]
    #[must_use]
    pub fn floor_area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }
}

/// How firm the client's timeline is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineFlexibility {
    /// Must start on the preferred date
    Fixed,
    /// Preferred date, movable by a few months
    Flexible,
    /// As soon as contractors are available
    Asap,
}

/// Client timeline preference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Preferred start date, if the client has one
    pub preferred_start: Option<DateTime<Utc>>,
    /// How movable the start date is
    pub flexibility: TimelineFlexibility,
}

/// Client requirements section of the brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Free-text description of the desired works
    pub description: String,
    /// Overall dimensions, if surveyed
    pub dimensions: Option<Dimensions>,
    /// Preferred materials (free text, e.g. "oak flooring")
    pub material_preferences: Vec<String>,
    /// Budget range
    pub budget: BudgetRange,
    /// Timeline preference
    pub timeline: Timeline,
    /// Special requirements (accessibility, party wall, etc.)
    pub special_requirements: Vec<String>,
}

/// Council constraints looked up by the external council-data service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilData {
    /// Property sits in a conservation area
    pub conservation_area: bool,
    /// Property is a listed building
    pub listed_building: bool,
    /// Known planning restrictions
    pub planning_restrictions: Vec<String>,
    /// Local planning authority name
    pub local_authority: String,
}

/// Target level of detail for the generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailLevel {
    /// High-level outline only
    Outline,
    /// Standard contractor-ready detail
    Standard,
    /// Full technical detail with specifications
    Detailed,
}

/// Target quality level for materials and finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityLevel {
    /// Cost-driven selections
    Budget,
    /// Mid-range selections
    Standard,
    /// High-end selections
    Premium,
}

/// Caller preferences for the generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPreferences {
    /// Cost measurement methodology to use
    pub methodology: CostMethodology,
    /// Target detail level
    pub detail_level: DetailLevel,
    /// RIBA stage subset to cover (empty means all of 0..=7)
    pub riba_stages: Vec<u8>,
    /// Quality level for material selection
    pub quality: QualityLevel,
}

/// Extracted metadata for an uploaded plan/document
///
/// Produced by the external document store; included as optional prompt
/// context only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentContext {
    /// Original filename
    pub filename: String,
    /// Document classification (e.g. "floor-plan", "structural-survey")
    pub classification: String,
    /// Extracted text, truncated by the document store
    pub extracted_text: String,
}

/// Immutable project brief — the input contract for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectBrief {
    /// Owning project
    pub project_id: ProjectId,
    /// Property address (free text)
    pub address: String,
    /// Project type
    pub project_type: ProjectType,
    /// Client requirements
    pub requirements: Requirements,
    /// Council constraints
    pub council: CouncilData,
    /// Generation preferences
    pub preferences: GenerationPreferences,
    /// Uploaded document context
    pub documents: Vec<DocumentContext>,
}
