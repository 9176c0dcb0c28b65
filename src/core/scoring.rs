use crate::core::estimators::numeric_value;
use crate::models::{
    CandidateAttributes, Category, CategoryEstimate, CategoryWeights, CompatibilityScore,
    PreferenceProfile, PreferenceValue, NUMERIC_MAX, NUMERIC_MIN,
};
use std::collections::BTreeMap;

/// Score returned when no overlapping category carries any evidence
pub const NEUTRAL_SCORE: u8 = 50;

/// Calculate a compatibility score (0-100) for a candidate against a profile
///
/// Scoring formula, over categories with confidence > 0 that the candidate has:
/// score = round(100 * Σ(similarity × confidence × weight) / Σ(confidence × weight))
///
/// The per-category breakdown is reported for every category in the profile;
/// categories that do not take part are reported as 0.
pub fn calculate_compatibility(
    profile: &PreferenceProfile,
    candidate: &CandidateAttributes,
    weights: &CategoryWeights,
) -> CompatibilityScore {
    let mut breakdown = BTreeMap::new();
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for (category, estimate) in &profile.categories {
        let confidence = estimate.confidence();
        let similarity = match candidate.get(*category) {
            Some(value) if confidence > 0.0 => category_similarity(*category, estimate, value),
            _ => None,
        };

        match similarity {
            Some(similarity) => {
                let weight = weights.weight(*category);
                breakdown.insert(*category, similarity * 100.0);
                total_score += similarity * confidence * weight;
                total_weight += confidence * weight;
            }
            None => {
                breakdown.insert(*category, 0.0);
            }
        }
    }

    let score = if total_weight > 0.0 {
        (100.0 * total_score / total_weight).round().clamp(0.0, 100.0) as u8
    } else {
        NEUTRAL_SCORE
    };

    CompatibilityScore { score, breakdown }
}

/// Similarity (0-1) between the learned value and a candidate value.
///
/// Returns `None` when either side has nothing comparable, e.g. the
/// candidate value has the wrong type for the category.
pub fn category_similarity(
    category: Category,
    estimate: &CategoryEstimate,
    candidate: &PreferenceValue,
) -> Option<f64> {
    match (estimate, candidate) {
        (CategoryEstimate::Boolean(e), PreferenceValue::Bool(c)) => {
            e.value.map(|v| if v == *c { 1.0 } else { 0.0 })
        }
        (CategoryEstimate::Numeric(e), value) => {
            let preferred = e.value?;
            let c = numeric_value(category, value).ok()?;
            Some(numeric_similarity(preferred, c))
        }
        (CategoryEstimate::Categorical(e), PreferenceValue::Text(c)) => e
            .value
            .as_ref()
            .map(|v| if v == c { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Calculate numeric similarity (0-1)
/// Linear falloff over the width of the numeric domain
#[inline]
fn numeric_similarity(preferred: f64, candidate: f64) -> f64 {
    let span = NUMERIC_MAX - NUMERIC_MIN;
    1.0 - ((preferred - candidate).abs() / span).min(1.0)
}
