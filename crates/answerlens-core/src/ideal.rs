//! Comparison of a transcript with a question's reference answer.
//!
//! Both texts are reduced to their distinct content terms (lowercase words
//! of three or more characters outside a small stopword list). Similarity is
//! the Jaccard index of the two term sets.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexical::tokenize;

/// Shared and missed term lists are capped at this many entries.
pub const MAX_LISTED_TERMS: usize = 10;

const MIN_TERM_LEN: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "has", "have",
    "her", "his", "its", "it's", "one", "our", "out", "was", "were", "will", "with", "that",
    "this", "these", "those", "then", "than", "them", "they", "their", "there", "what", "when",
    "where", "which", "while", "who", "why", "how", "into", "from", "onto", "over", "under",
    "each", "every", "some", "such", "also", "just", "very", "more", "most", "much", "many",
    "only", "other", "own", "same", "both", "few", "being", "been", "does", "did", "doing",
    "would", "could", "should", "about", "because", "so", "like", "use", "uses", "used",
];

/// How close an answer's vocabulary is to the reference answer's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Similarity {
    pub fn from_percentage(pct: u8) -> Self {
        match pct {
            80..=u8::MAX => Similarity::VeryHigh,
            60..=79 => Similarity::High,
            40..=59 => Similarity::Moderate,
            20..=39 => Similarity::Low,
            _ => Similarity::VeryLow,
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Similarity::VeryLow => "very low",
            Similarity::Low => "low",
            Similarity::Moderate => "moderate",
            Similarity::High => "high",
            Similarity::VeryHigh => "very high",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealComparison {
    /// Jaccard index of the two term sets, 0-100, rounded.
    pub similarity_percentage: u8,
    pub similarity: Similarity,
    /// Transcript word count as a percentage of the reference's, rounded.
    pub length_percentage: u32,
    /// Terms in both texts, in reference order.
    pub shared_terms: Vec<String>,
    /// Reference terms the transcript never uses, in reference order.
    pub missed_terms: Vec<String>,
}

/// Distinct content terms in first-seen order.
fn content_terms(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .filter(|w| w.chars().count() >= MIN_TERM_LEN && !STOPWORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.as_str()))
        .cloned()
        .collect()
}

pub fn compare(transcript: &str, ideal: &str) -> IdealComparison {
    let answer_words = tokenize(transcript);
    let ideal_words = tokenize(ideal);
    let answer_terms: HashSet<String> = content_terms(&answer_words).into_iter().collect();
    let ideal_terms = content_terms(&ideal_words);

    let (shared, missed): (Vec<String>, Vec<String>) = ideal_terms
        .iter()
        .cloned()
        .partition(|t| answer_terms.contains(t));
    let union = answer_terms.len() + missed.len();

    let similarity_percentage = if union == 0 {
        0
    } else {
        (100.0 * shared.len() as f64 / union as f64).round() as u8
    };
    let length_percentage = if ideal_words.is_empty() {
        0
    } else {
        (100.0 * answer_words.len() as f64 / ideal_words.len() as f64).round() as u32
    };

    IdealComparison {
        similarity_percentage,
        similarity: Similarity::from_percentage(similarity_percentage),
        length_percentage,
        shared_terms: shared.into_iter().take(MAX_LISTED_TERMS).collect(),
        missed_terms: missed.into_iter().take(MAX_LISTED_TERMS).collect(),
    }
}
