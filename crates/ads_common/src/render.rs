//! Report rendering.
//!
//! `sections` turns a [`Report`] into an ordered view model; `format_text`
//! and `format_markdown` lay it out deterministically. No business logic
//! lives here: empty sequences simply render as empty regions.

use crate::report::Report;

/// One visual block inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Small heading inside a card
    Heading(String),
    /// `label: value` line
    Field { label: String, value: String },
    Paragraph(String),
    /// Verbatim multi-line text (copy-paste targeting)
    Preformatted(String),
    /// Name with a dimmer explanation underneath
    Item { name: String, detail: String },
    /// Inline tags (behaviors, exclusions)
    Tags(Vec<String>),
    Bullets(Vec<String>),
}

/// A titled card of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

fn field(label: &str, value: &str) -> Block {
    Block::Field {
        label: label.to_string(),
        value: value.to_string(),
    }
}

/// Format the leading integer of a budget with Indian digit grouping.
///
/// `20000` becomes `₹20,000` and `150000` becomes `₹1,50,000`. A budget
/// without leading digits is returned unchanged.
pub fn format_inr(budget: &str) -> String {
    let digits: String = budget
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return if budget.trim().starts_with('0') {
            "₹0".to_string()
        } else {
            budget.to_string()
        };
    }

    let (head, last3) = digits.split_at(digits.len().saturating_sub(3));
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.insert(0, right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.insert(0, rest);
    }
    groups.push(last3);

    format!("₹{}", groups.join(","))
}

/// Build the ordered sections of the report view
pub fn sections(report: &Report) -> Vec<Section> {
    let persona = &report.buyer_persona;
    let budget = &report.budget_recommendation;
    let targeting = &report.detailed_targeting;
    let recs = &report.expert_recommendations;

    vec![
        Section {
            title: "Copy-Paste Targeting",
            blocks: vec![Block::Preformatted(report.copy_paste_targeting.clone())],
        },
        Section {
            title: "Budget",
            blocks: vec![
                field("Your Monthly Budget", &format_inr(&budget.user_budget)),
                field("Expert Recommended Range", &budget.recommended_range),
                Block::Paragraph(budget.justification.clone()),
            ],
        },
        Section {
            title: "Ideal Buyer Persona",
            blocks: vec![
                field("Category", &report.product_category),
                field("Age", &persona.age_range),
                field("Gender", &persona.gender),
                field("Income", &persona.income_level),
                Block::Paragraph(persona.summary.clone()),
            ],
        },
        Section {
            title: "Strategic Overview",
            blocks: vec![Block::Paragraph(recs.why_this_works.clone())],
        },
        Section {
            title: "Detailed Targeting Breakdown",
            blocks: {
                let mut blocks = vec![Block::Heading("Interests".to_string())];
                blocks.extend(targeting.interests.iter().map(|i| Block::Item {
                    name: i.name.clone(),
                    detail: i.reasoning.clone(),
                }));
                blocks.push(Block::Heading("Behaviors".to_string()));
                blocks.push(Block::Tags(targeting.behaviors.clone()));
                blocks.push(Block::Heading("Exclusions".to_string()));
                blocks.push(Block::Tags(targeting.exclusions.clone()));
                blocks
            },
        },
        Section {
            title: "Competitor Analysis",
            blocks: report
                .competitor_analysis
                .iter()
                .flat_map(|c| {
                    [
                        Block::Heading(c.name.clone()),
                        field("Likely Audience", &c.targeted_audiences),
                        field("Your Advantage ->", &c.strategic_advantage),
                    ]
                })
                .collect(),
        },
        Section {
            title: "Expert Recommendations",
            blocks: vec![
                Block::Heading("A/B Testing Suggestion".to_string()),
                Block::Paragraph(recs.ab_tests.clone()),
                Block::Heading("Ad Placements".to_string()),
                Block::Paragraph(recs.placements.clone()),
                Block::Heading("Creative Ideas".to_string()),
                Block::Bullets(recs.creatives.clone()),
                Block::Heading("Ad Copy Preview".to_string()),
                field("Your Brand", &recs.ad_copy.primary_text),
                field("yourbrand.com", &recs.ad_copy.headline),
                field("Button", &recs.cta),
            ],
        },
    ]
}

/// Format report as plain text (deterministic, no timestamps)
pub fn format_text(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("META ADS EXPERT REPORT\n");
    out.push_str("======================\n\n");

    for section in sections(report) {
        out.push_str(&section.title.to_uppercase());
        out.push('\n');
        for block in &section.blocks {
            match block {
                Block::Heading(text) => out.push_str(&format!("  [{}]\n", text)),
                Block::Field { label, value } => {
                    out.push_str(&format!("  {}: {}\n", label, value))
                }
                Block::Paragraph(text) => out.push_str(&format!("  {}\n", text)),
                Block::Preformatted(text) => {
                    for line in text.lines() {
                        out.push_str(&format!("  | {}\n", line));
                    }
                }
                Block::Item { name, detail } => {
                    out.push_str(&format!("  * {}\n      {}\n", name, detail))
                }
                Block::Tags(tags) => {
                    if !tags.is_empty() {
                        let joined: Vec<String> = tags.iter().map(|t| format!("[{}]", t)).collect();
                        out.push_str(&format!("  {}\n", joined.join(" ")));
                    }
                }
                Block::Bullets(items) => {
                    for item in items {
                        out.push_str(&format!("  - {}\n", item));
                    }
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Format report as markdown (deterministic, no timestamps)
pub fn format_markdown(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("# Meta Ads Expert Report\n\n");

    for section in sections(report) {
        out.push_str(&format!("## {}\n\n", section.title));
        for block in &section.blocks {
            match block {
                Block::Heading(text) => out.push_str(&format!("### {}\n\n", text)),
                Block::Field { label, value } => {
                    out.push_str(&format!("- **{}**: {}\n", label, value))
                }
                Block::Paragraph(text) => out.push_str(&format!("{}\n\n", text)),
                Block::Preformatted(text) => out.push_str(&format!("```\n{}\n```\n\n", text)),
                Block::Item { name, detail } => {
                    out.push_str(&format!("- **{}**: {}\n", name, detail))
                }
                Block::Tags(tags) => {
                    if !tags.is_empty() {
                        let joined: Vec<String> = tags.iter().map(|t| format!("`{}`", t)).collect();
                        out.push_str(&format!("{}\n\n", joined.join(" ")));
                    }
                }
                Block::Bullets(items) => {
                    for item in items {
                        out.push_str(&format!("- {}\n", item));
                    }
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }

    out
}
