//! Overall score and improvement suggestions.

use std::collections::HashSet;

use crate::config::AggregateConfig;
use crate::scoring::{Dimension, DimensionResult, MAX_SCORE};

/// Weighted overall score, rounded and clamped to 0-10.
pub fn overall_score(
    clarity: &DimensionResult,
    confidence: &DimensionResult,
    technical: &DimensionResult,
    config: &AggregateConfig,
) -> u8 {
    let weighted = config.clarity_weight * clarity.score as f64
        + config.confidence_weight * confidence.score as f64
        + config.technical_weight * technical.score as f64;
    weighted.round().clamp(0.0, MAX_SCORE as f64) as u8
}

/// One suggestion per dimension below the threshold, weakest dimension
/// first, duplicates removed and capped at `max_suggestions`.
///
/// Ties keep the fixed order clarity, confidence, technical.
pub fn suggestions(
    clarity: &DimensionResult,
    confidence: &DimensionResult,
    technical: &DimensionResult,
    config: &AggregateConfig,
) -> Vec<String> {
    let mut ranked = [
        (Dimension::Clarity, clarity),
        (Dimension::Confidence, confidence),
        (Dimension::TechnicalCorrectness, technical),
    ];
    ranked.sort_by_key(|(_, result)| result.score);

    let mut seen = HashSet::new();
    ranked
        .iter()
        .filter(|(_, result)| result.score < config.suggestion_threshold)
        .map(|(dimension, result)| {
            result
                .worst_issue
                .map(|kind| kind.suggestion())
                .unwrap_or_else(|| dimension.fallback_suggestion())
        })
        .filter(|text| seen.insert(*text))
        .take(config.max_suggestions)
        .map(str::to_string)
        .collect()
}

/// Overall score and suggestions together.
pub fn aggregate(
    clarity: &DimensionResult,
    confidence: &DimensionResult,
    technical: &DimensionResult,
    config: &AggregateConfig,
) -> (u8, Vec<String>) {
    (
        overall_score(clarity, confidence, technical, config),
        suggestions(clarity, confidence, technical, config),
    )
}
