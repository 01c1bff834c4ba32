//! Engine configuration: marker vocabularies, structure patterns and the
//! scoring heuristics grouped by dimension.
//!
//! Every section deserializes with defaults, so a TOML override only needs
//! to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::structure::StructureComponent;

/// Complete configuration for a `FeedbackEngine`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub vocabulary: Vocabulary,
    pub structure: StructureConfig,
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Reject configurations the engine cannot score with.
    ///
    /// Regex patterns are compiled (and rejected) by the structure analyzer.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.vocabulary.validate()?;
        self.scoring.aggregate.validate()?;
        for rule in &self.structure.components {
            if rule.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(EngineError::InvalidConfig(format!(
                    "structure component '{}' has an empty pattern",
                    rule.component
                )));
            }
        }
        Ok(())
    }
}

/// Marker phrase lists used by the lexical analyzer. Matching is
/// case-insensitive and on whole words; multi-word phrases must appear as
/// consecutive words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub fillers: Vec<String>,
    pub hedges: Vec<String>,
    pub transitions: Vec<String>,
    /// Auxiliary verbs that open a passive construction.
    pub passive_auxiliaries: Vec<String>,
    /// Past participles that do not end in "-ed" or "-en".
    pub irregular_participles: Vec<String>,
    /// Assertive phrases that signal confidence.
    pub confident_markers: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            fillers: strings(&[
                "um", "uh", "erm", "hmm", "like", "you know", "basically", "actually", "i mean",
                "you see",
            ]),
            hedges: strings(&[
                "i think",
                "i guess",
                "i believe",
                "maybe",
                "perhaps",
                "probably",
                "sort of",
                "kind of",
                "let me think",
                "not sure",
                "might",
            ]),
            transitions: strings(&[
                "first",
                "firstly",
                "second",
                "secondly",
                "then",
                "next",
                "finally",
                "lastly",
                "however",
                "therefore",
                "thus",
                "moreover",
                "furthermore",
                "additionally",
                "consequently",
                "meanwhile",
                "because",
                "in addition",
                "as a result",
                "on the other hand",
            ]),
            passive_auxiliaries: strings(&["is", "are", "was", "were", "be", "been", "being", "am"]),
            irregular_participles: strings(&[
                "built", "done", "found", "held", "kept", "known", "made", "met", "paid", "put",
                "read", "run", "sent", "set", "shown", "sold", "spent", "split", "taught",
                "thought", "told", "understood", "won",
            ]),
            confident_markers: strings(&[
                "definitely",
                "certainly",
                "absolutely",
                "clearly",
                "undoubtedly",
                "specifically",
                "precisely",
                "always",
                "guarantees",
            ]),
        }
    }
}

impl Vocabulary {
    fn validate(&self) -> Result<(), EngineError> {
        let lists = [
            ("fillers", &self.fillers),
            ("hedges", &self.hedges),
            ("transitions", &self.transitions),
            ("passive_auxiliaries", &self.passive_auxiliaries),
            ("irregular_participles", &self.irregular_participles),
            ("confident_markers", &self.confident_markers),
        ];
        for (name, list) in lists {
            if list.iter().any(|p| p.split_whitespace().next().is_none()) {
                return Err(EngineError::InvalidConfig(format!(
                    "vocabulary list '{name}' contains a blank phrase"
                )));
            }
        }
        Ok(())
    }
}

/// The ordered set of structure components and the patterns that detect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub components: Vec<ComponentRule>,
    /// Issue emitted when the logical flow is classified as poor.
    pub poor_flow_issue: String,
}

/// Detection rule for one structure component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRule {
    pub component: StructureComponent,
    /// Regular expressions, matched case-insensitively. One match suffices.
    pub patterns: Vec<String>,
    /// Issue text when the component is absent.
    pub missing_issue: String,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            components: vec![
                ComponentRule {
                    component: StructureComponent::Definition,
                    patterns: strings(&[
                        r"\b(is defined as|can be defined as|refers to|stands for|is a|is an|are a|means)\b",
                        r"\b(in simple terms|essentially|at its core)\b",
                    ]),
                    missing_issue: "No clear definition given".into(),
                },
                ComponentRule {
                    component: StructureComponent::Mechanism,
                    patterns: strings(&[
                        r"\b(works by|how it works|the way it works|under the hood|internally|the mechanism)\b",
                        r"\b(uses|stores|maps|computes|looks up|because|since|which means|the process)\b",
                    ]),
                    missing_issue: "Does not explain how it works".into(),
                },
                ComponentRule {
                    component: StructureComponent::Example,
                    patterns: strings(&[
                        r"\b(for example|for instance|such as|consider|imagine|suppose)\b",
                        r"\b(let's say|let us say|say we have|if we have|in practice)\b",
                    ]),
                    missing_issue: "No example provided".into(),
                },
                ComponentRule {
                    component: StructureComponent::TradeOff,
                    patterns: strings(&[
                        r"\b(trade-?offs?|downsides?|drawbacks?|limitations?|disadvantages?)\b",
                        r"\b(however|but|whereas|although|on the other hand|at the cost of|worst case)\b",
                    ]),
                    missing_issue: "No trade-offs or limitations discussed".into(),
                },
                ComponentRule {
                    component: StructureComponent::Conclusion,
                    patterns: strings(&[
                        r"\b(in conclusion|in summary|to summarize|to sum up|in short|overall)\b",
                        r"\b(the key point|the main takeaway|to wrap up)\b",
                    ]),
                    missing_issue: "Missing conclusion or summary".into(),
                },
            ],
            poor_flow_issue: "Ideas are not connected with transition words".into(),
        }
    }
}

/// Scoring heuristics grouped by dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub clarity: ClarityConfig,
    pub confidence: ConfidenceConfig,
    pub technical: TechnicalConfig,
    pub aggregate: AggregateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarityConfig {
    pub base_score: i32,
    /// Filler words per word above which the heavy penalty applies.
    pub heavy_filler_ratio: f64,
    pub heavy_filler_penalty: i32,
    pub moderate_filler_ratio: f64,
    pub moderate_filler_penalty: i32,
    pub min_sentences: usize,
    pub few_sentences_penalty: i32,
    pub max_avg_sentence_words: f64,
    pub long_sentence_penalty: i32,
    pub no_transition_penalty: i32,
    pub transition_bonus_min: usize,
    pub transition_bonus: i32,
    pub strong_structure_score: u8,
    pub strong_structure_bonus: i32,
    pub good_structure_score: u8,
    pub good_structure_bonus: i32,
    pub weak_structure_score: u8,
    pub weak_structure_penalty: i32,
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            base_score: 7,
            heavy_filler_ratio: 0.10,
            heavy_filler_penalty: 3,
            moderate_filler_ratio: 0.05,
            moderate_filler_penalty: 2,
            min_sentences: 3,
            few_sentences_penalty: 2,
            max_avg_sentence_words: 30.0,
            long_sentence_penalty: 1,
            no_transition_penalty: 1,
            transition_bonus_min: 2,
            transition_bonus: 1,
            strong_structure_score: 8,
            strong_structure_bonus: 2,
            good_structure_score: 6,
            good_structure_bonus: 1,
            weak_structure_score: 2,
            weak_structure_penalty: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub base_score: i32,
    /// Hedges per sentence above which the frequent-hedging penalty applies.
    pub frequent_hedge_rate: f64,
    pub frequent_hedge_penalty: i32,
    pub moderate_hedge_rate: f64,
    pub moderate_hedge_penalty: i32,
    pub any_hedge_penalty: i32,
    pub no_hedge_bonus: i32,
    /// Passive constructions per sentence.
    pub heavy_passive_rate: f64,
    pub heavy_passive_penalty: i32,
    pub some_passive_rate: f64,
    pub some_passive_penalty: i32,
    pub confident_bonus: i32,
    /// Content words (excluding fillers and hedges) below which an answer is too brief.
    pub min_content_words: usize,
    pub brief_penalty: i32,
    pub substantive_content_words: usize,
    pub substantive_bonus: i32,
    pub max_words: usize,
    pub verbose_penalty: i32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base_score: 7,
            frequent_hedge_rate: 1.0,
            frequent_hedge_penalty: 3,
            moderate_hedge_rate: 0.3,
            moderate_hedge_penalty: 2,
            any_hedge_penalty: 1,
            no_hedge_bonus: 1,
            heavy_passive_rate: 0.5,
            heavy_passive_penalty: 2,
            some_passive_rate: 0.25,
            some_passive_penalty: 1,
            confident_bonus: 1,
            min_content_words: 25,
            brief_penalty: 3,
            substantive_content_words: 60,
            substantive_bonus: 1,
            max_words: 250,
            verbose_penalty: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConfig {
    /// Points awarded for 100% concept coverage; scaled linearly.
    pub coverage_weight: i32,
    pub keyword_tier1_count: usize,
    pub keyword_tier1_bonus: i32,
    pub keyword_tier2_count: usize,
    pub keyword_tier2_bonus: i32,
    pub mechanism_bonus: i32,
    pub trade_off_bonus: i32,
    pub red_flag_penalty: i32,
    pub low_coverage_percentage: u8,
    pub high_coverage_percentage: u8,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            coverage_weight: 6,
            keyword_tier1_count: 2,
            keyword_tier1_bonus: 1,
            keyword_tier2_count: 4,
            keyword_tier2_bonus: 2,
            mechanism_bonus: 1,
            trade_off_bonus: 1,
            red_flag_penalty: 2,
            low_coverage_percentage: 40,
            high_coverage_percentage: 80,
        }
    }
}

/// Overall-score weights and suggestion policy. Weights must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    pub clarity_weight: f64,
    pub confidence_weight: f64,
    pub technical_weight: f64,
    /// Dimensions scoring below this receive a suggestion.
    pub suggestion_threshold: u8,
    pub max_suggestions: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            clarity_weight: 1.0 / 3.0,
            confidence_weight: 1.0 / 3.0,
            technical_weight: 1.0 / 3.0,
            suggestion_threshold: 6,
            max_suggestions: 5,
        }
    }
}

impl AggregateConfig {
    fn validate(&self) -> Result<(), EngineError> {
        let weights = [self.clarity_weight, self.confidence_weight, self.technical_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidConfig(
                "aggregate weights must be finite and non-negative".into(),
            ));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidConfig(format!(
                "aggregate weights must sum to 1 (got {sum})"
            )));
        }
        Ok(())
    }
}
