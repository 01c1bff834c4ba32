//! Concept coverage against a question's expected-knowledge set.
//!
//! Matching is a case-insensitive substring test over each concept's
//! surface forms. Paraphrases that use none of the registered forms are
//! reported as missing; registering more aliases is the remedy.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ideal::IdealComparison;

/// Concepts are compared trimmed and lowercased. Concepts that collide under
/// that rule count once, at their first position, so `covered_concepts` and
/// `missing_concepts` partition the distinct concepts rather than the raw list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageAnalysis {
    /// Covered concepts, in `expected_concepts` order.
    pub covered_concepts: Vec<String>,
    /// Missing concepts, in `expected_concepts` order.
    pub missing_concepts: Vec<String>,
    pub total_covered: usize,
    pub total_expected: usize,
    /// 0-100, rounded; 0 when nothing was expected.
    pub coverage_percentage: u8,
    /// Set when the question has a reference answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_comparison: Option<IdealComparison>,
}

impl CoverageAnalysis {
    pub fn empty() -> Self {
        Self {
            covered_concepts: Vec::new(),
            missing_concepts: Vec::new(),
            total_covered: 0,
            total_expected: 0,
            coverage_percentage: 0,
            ideal_comparison: None,
        }
    }
}

/// Partition `expected_concepts` into covered and missing.
///
/// Duplicate concepts (ignoring case) are counted once, at their first
/// position. `aliases` maps a concept name to extra surface forms; its keys
/// are matched to concepts ignoring case.
pub fn analyze(
    transcript: &str,
    expected_concepts: &[String],
    aliases: &BTreeMap<String, Vec<String>>,
) -> CoverageAnalysis {
    if expected_concepts.is_empty() {
        return CoverageAnalysis::empty();
    }

    let haystack = transcript.to_lowercase();
    let mut alias_forms: HashMap<String, Vec<&str>> = HashMap::new();
    for (concept, forms) in aliases {
        alias_forms
            .entry(concept_key(concept))
            .or_default()
            .extend(forms.iter().map(String::as_str));
    }

    let mut seen = HashSet::new();
    let mut covered_concepts = Vec::new();
    let mut missing_concepts = Vec::new();

    for concept in expected_concepts {
        let key = concept_key(concept);
        let mut forms = vec![concept.as_str()];
        if let Some(extra) = alias_forms.get(&key) {
            forms.extend(extra.iter().copied());
        }
        if !seen.insert(key) {
            continue;
        }
        if contains_any(&haystack, &forms) {
            covered_concepts.push(concept.clone());
        } else {
            missing_concepts.push(concept.clone());
        }
    }

    let total_covered = covered_concepts.len();
    let total_expected = total_covered + missing_concepts.len();
    let coverage_percentage = (100.0 * total_covered as f64 / total_expected as f64).round() as u8;

    CoverageAnalysis {
        covered_concepts,
        missing_concepts,
        total_covered,
        total_expected,
        coverage_percentage,
        ideal_comparison: None,
    }
}

/// Normalized form used to compare concept names.
pub fn concept_key(concept: &str) -> String {
    concept.trim().to_lowercase()
}

/// Terms from `terms` that occur in `transcript`, deduplicated, in list order.
pub fn matched_terms(transcript: &str, terms: &[String]) -> Vec<String> {
    let haystack = transcript.to_lowercase();
    let mut seen = HashSet::new();
    terms
        .iter()
        .filter(|t| {
            let lowered = t.trim().to_lowercase();
            !lowered.is_empty() && haystack.contains(&lowered) && seen.insert(lowered)
        })
        .cloned()
        .collect()
}

fn contains_any(haystack: &str, forms: &[&str]) -> bool {
    forms.iter().any(|form| {
        let form = form.trim().to_lowercase();
        !form.is_empty() && haystack.contains(&form)
    })
}
