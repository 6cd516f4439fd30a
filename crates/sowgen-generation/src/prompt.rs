//! Structured prompt construction
//!
//! Derives the generator's prompt deterministically from a normalized brief,
//! so that identical briefs always dispatch identical prompts (the model's
//! output may still vary between calls).

use sowgen_domain::{ContentHash, DetailLevel, NormalizedBrief, QualityLevel};
use std::fmt::Write as _;

/// System + user prompt pair dispatched to the generation provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredPrompt {
    /// System instruction (document contract, output format)
    pub system: String,
    /// Project-specific request
    pub user: String,
}

impl StructuredPrompt {
    /// Build the prompt for one normalized brief
    #[must_use]
    pub fn from_brief(brief: &NormalizedBrief) -> Self {
        Self {
            system: build_system_prompt(),
            user: build_user_prompt(brief),
        }
    }

    /// Stable fingerprint of the full prompt, recorded for audit
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let mut buf = Vec::with_capacity(self.system.len() + self.user.len() + 1);
        buf.extend_from_slice(self.system.as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.user.as_bytes());
        ContentHash::compute(&buf)
    }
}

fn build_system_prompt() -> String {
    String::from(
        "You are a construction consultant producing a scope of work for a UK \
         home-improvement project. Respond with a single JSON object inside a \
         fenced code block, containing these keys: riba_stages, specifications, \
         materials, work_phases, deliverables, cost_lines, confidence. Every \
         array key must be present even when empty. RIBA stage numbers run 0 to \
         7. Reference British Standards and Approved Documents where relevant. \
         Do not include prose outside the JSON block.\n",
    )
}

fn build_user_prompt(brief: &NormalizedBrief) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Project type: {}\nAddress: {}\nDescription: {}",
        brief.project_type.label(),
        brief.address,
        brief.description
    );
    if let Some(dims) = brief.dimensions {
        let _ = writeln!(
            prompt,
            "Dimensions: {:.1}m x {:.1}m ({:.1} m2 floor area)",
            dims.length_m,
            dims.width_m,
            dims.floor_area_m2()
        );
    }
    let _ = writeln!(
        prompt,
        "Budget: {:.0} to {:.0} GBP\nMaterial categories: {}",
        brief.budget_min,
        brief.budget_max,
        brief.material_categories.join(", ")
    );
    let stages: Vec<String> = brief.riba_stages.iter().map(|s| s.to_string()).collect();
    let _ = writeln!(prompt, "Cover RIBA stages: {}", stages.join(", "));
    let _ = writeln!(
        prompt,
        "Detail level: {}\nQuality level: {}",
        match brief.detail_level {
            DetailLevel::Outline => "outline",
            DetailLevel::Standard => "standard",
            DetailLevel::Detailed => "detailed",
        },
        match brief.quality {
            QualityLevel::Budget => "budget",
            QualityLevel::Standard => "standard",
            QualityLevel::Premium => "premium",
        }
    );

    if !brief.special_requirements.is_empty() {
        let _ = writeln!(
            prompt,
            "Special requirements: {}",
            brief.special_requirements.join("; ")
        );
    }

    if brief.council.conservation_area || brief.council.listed_building {
        let _ = writeln!(
            prompt,
            "Heritage constraints: conservation area: {}, listed building: {} ({})",
            brief.council.conservation_area,
            brief.council.listed_building,
            brief.council.local_authority
        );
    }
    if !brief.council.planning_restrictions.is_empty() {
        let _ = writeln!(
            prompt,
            "Planning restrictions: {}",
            brief.council.planning_restrictions.join("; ")
        );
    }

    for doc in &brief.documents {
        let _ = writeln!(
            prompt,
            "Uploaded document ({}, {}): {}",
            doc.filename, doc.classification, doc.extracted_text
        );
    }

    prompt
}
