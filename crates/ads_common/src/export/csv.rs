//! CSV export of the targeting, competitor and recommendation fields.

use crate::report::Report;

pub const CSV_HEADER: &str = "Section,Category,Detail,Reasoning";

/// Quote a field, doubling embedded quotes
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize the fixed subset of report fields.
///
/// One header line, then: age, gender, one row per interest, behavior,
/// exclusion and competitor, then placements and CTA. Lines end in `\n`.
pub fn build_csv(report: &Report) -> String {
    let persona = &report.buyer_persona;
    let targeting = &report.detailed_targeting;
    let recs = &report.expert_recommendations;

    let mut rows: Vec<String> = Vec::new();
    rows.push(CSV_HEADER.to_string());

    rows.push(format!("Targeting,Age,{},", quote(&persona.age_range)));
    rows.push(format!("Targeting,Gender,{},", quote(&persona.gender)));
    for interest in &targeting.interests {
        rows.push(format!(
            "Targeting,Interest,{},{}",
            quote(&interest.name),
            quote(&interest.reasoning)
        ));
    }
    for behavior in &targeting.behaviors {
        rows.push(format!("Targeting,Behavior,{},", quote(behavior)));
    }
    for exclusion in &targeting.exclusions {
        rows.push(format!("Targeting,Exclusion,{},", quote(exclusion)));
    }
    for competitor in &report.competitor_analysis {
        rows.push(format!(
            "Competitor,{},{},{}",
            quote(&competitor.name),
            quote(&competitor.targeted_audiences),
            quote(&competitor.strategic_advantage)
        ));
    }
    rows.push(format!(
        "Recommendations,Placements,{},",
        quote(&recs.placements)
    ));
    rows.push(format!("Recommendations,CTA,{},", quote(&recs.cta)));

    let mut csv = rows.join("\n");
    csv.push('\n');
    csv
}
