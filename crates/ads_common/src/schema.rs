//! Structured-output schema declared to the generation API.
//!
//! Field names and types mirror [`crate::report::Report`] exactly; the API is
//! asked to conform its JSON to this shape (`responseSchema`).

use serde_json::{json, Value};

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_array(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "description": description })
}

/// Build the response schema for a [`crate::report::Report`]
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "productCategory": string("The most accurate category/niche for the product."),
            "buyerPersona": {
                "type": "OBJECT",
                "properties": {
                    "ageRange": string("A specific age range (e.g., '25-45')."),
                    "gender": string("'Male', 'Female', or 'All'."),
                    "incomeLevel": string("A descriptive level (e.g., 'Middle to Upper-Middle Class')."),
                    "summary": string("A brief paragraph describing the persona's lifestyle, pain points, and motivations."),
                },
                "required": ["ageRange", "gender", "incomeLevel", "summary"],
            },
            "budgetRecommendation": {
                "type": "OBJECT",
                "properties": {
                    "userBudget": string("The user's provided budget."),
                    "recommendedRange": string("A realistic monthly budget range in INR (e.g., '₹15,000 - ₹25,000')."),
                    "justification": string("Briefly explain why this budget is recommended."),
                },
                "required": ["userBudget", "recommendedRange", "justification"],
            },
            "detailedTargeting": {
                "type": "OBJECT",
                "properties": {
                    "interests": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": string("The specific interest term for Meta Ads."),
                                "reasoning": string("Expert explanation of why this interest is relevant."),
                            },
                            "required": ["name", "reasoning"],
                        },
                    },
                    "behaviors": string_array("Purchase-intent focused behaviors."),
                    "exclusions": string_array("Audiences to exclude."),
                },
                "required": ["interests", "behaviors", "exclusions"],
            },
            "copyPasteTargeting": string(
                "A single multi-line string formatted for easy copy-pasting. Must include Age, Gender, Location, Interests, Behaviors, and Exclusions."
            ),
            "competitorAnalysis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string("A plausible competitor name."),
                        "targetedAudiences": string("Description of audiences they likely target."),
                        "strategicAdvantage": string("How the user can outperform this competitor."),
                    },
                    "required": ["name", "targetedAudiences", "strategicAdvantage"],
                },
            },
            "expertRecommendations": {
                "type": "OBJECT",
                "properties": {
                    "whyThisWorks": string("Concise explanation of why the targeting strategy is effective."),
                    "abTests": string("Suggest two distinct audiences (Audience A and Audience B) for A/B testing."),
                    "placements": string("Recommended ad placements (e.g., 'Facebook Feed, Instagram Stories, Reels')."),
                    "creatives": string_array("2-3 specific, actionable ideas for ad creatives."),
                    "adCopy": {
                        "type": "OBJECT",
                        "properties": {
                            "headline": string("A compelling, short ad copy headline."),
                            "primaryText": string("A compelling primary text for the ad."),
                        },
                        "required": ["headline", "primaryText"],
                    },
                    "cta": string("The most effective Call-To-Action button text."),
                },
                "required": ["whyThisWorks", "abTests", "placements", "creatives", "adCopy", "cta"],
            },
        },
        "required": [
            "productCategory",
            "buyerPersona",
            "budgetRecommendation",
            "detailedTargeting",
            "copyPasteTargeting",
            "competitorAnalysis",
            "expertRecommendations",
        ],
    })
}
