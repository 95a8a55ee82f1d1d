//! Report contract - the structured strategy returned by the generation API.
//!
//! Every field is required. A payload that is missing a field or carries the
//! wrong JSON type fails to deserialize and is rejected at the boundary; the
//! controller never stores a partial report. Unknown extra fields are ignored.

use serde::{Deserialize, Serialize};

/// Complete advertising strategy report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Most accurate category/niche for the product
    pub product_category: String,
    pub buyer_persona: BuyerPersona,
    pub budget_recommendation: BudgetRecommendation,
    pub detailed_targeting: DetailedTargeting,
    /// Pre-formatted multi-line block for Ads Manager
    pub copy_paste_targeting: String,
    pub competitor_analysis: Vec<Competitor>,
    pub expert_recommendations: ExpertRecommendations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerPersona {
    /// e.g. "25-45"
    pub age_range: String,
    /// "Male", "Female" or "All"
    pub gender: String,
    pub income_level: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    /// Echo of the budget the user entered
    pub user_budget: String,
    pub recommended_range: String,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTargeting {
    pub interests: Vec<Interest>,
    pub behaviors: Vec<String>,
    pub exclusions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub name: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub targeted_audiences: String,
    pub strategic_advantage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertRecommendations {
    pub why_this_works: String,
    pub ab_tests: String,
    pub placements: String,
    pub creatives: Vec<String>,
    pub ad_copy: AdCopy,
    /// Call-to-action button text
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopy {
    pub headline: String,
    pub primary_text: String,
}

impl Report {
    /// Parse a report from raw model output.
    ///
    /// Surrounding whitespace is trimmed before parsing.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.trim())
    }

    /// Serialize back to the wire shape (camelCase keys)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
