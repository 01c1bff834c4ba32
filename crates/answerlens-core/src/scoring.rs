//! Dimension scorers: clarity, confidence and technical correctness.
//!
//! Each scorer starts from a configured base, applies additive penalties and
//! bonuses, and clamps the result to 0-10. Strengths and issues come from
//! the same thresholds that moved the score, so every point of a score can
//! be traced to an entry in the result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ClarityConfig, ConfidenceConfig, TechnicalConfig};
use crate::coverage::{matched_terms, CoverageAnalysis};
use crate::lexical::LexicalProfile;
use crate::model::QuestionContext;
use crate::structure::{StructureAnalysis, StructureComponent};

pub const MAX_SCORE: u8 = 10;

/// One of the three evaluation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Clarity,
    Confidence,
    TechnicalCorrectness,
}

impl Dimension {
    /// Suggestion used when a low-scoring dimension has no categorized issue.
    pub fn fallback_suggestion(self) -> &'static str {
        match self {
            Dimension::Clarity => "Speak in clear, well-organized sentences",
            Dimension::Confidence => "Practice the answer aloud until you can state it directly",
            Dimension::TechnicalCorrectness => "Study the core concepts behind this question",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Clarity => write!(f, "clarity"),
            Dimension::Confidence => write!(f, "confidence"),
            Dimension::TechnicalCorrectness => write!(f, "technical correctness"),
        }
    }
}

/// Category of an issue, used to pick an improvement suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NoAnswer,
    FillerWords,
    FewSentences,
    LongSentences,
    WeakTransitions,
    WeakStructure,
    Hedging,
    PassiveVoice,
    TooBrief,
    Verbose,
    MissingConcepts,
    LowCoverage,
    FewTechnicalTerms,
    Misconception,
}

impl IssueKind {
    pub fn suggestion(self) -> &'static str {
        match self {
            IssueKind::NoAnswer => "Record a complete spoken answer so it can be evaluated",
            IssueKind::FillerWords => {
                "Pause silently instead of using filler words like 'um' and 'like'"
            }
            IssueKind::FewSentences => {
                "Answer in several complete sentences rather than a single fragment"
            }
            IssueKind::LongSentences => "Break long sentences into shorter, focused statements",
            IssueKind::WeakTransitions => {
                "Link your ideas with transition words such as 'first', 'then' and 'however'"
            }
            IssueKind::WeakStructure => {
                "Define the concept, explain how it works, give an example, then summarize"
            }
            IssueKind::Hedging => "Replace hedges like 'I think' or 'maybe' with direct statements",
            IssueKind::PassiveVoice => "Use active voice to sound more decisive",
            IssueKind::TooBrief => "Expand your answer with more detail and reasoning",
            IssueKind::Verbose => "Tighten your answer and focus on the key points",
            IssueKind::MissingConcepts => {
                "Review the key concepts this question expects and cover them explicitly"
            }
            IssueKind::LowCoverage => "Focus on covering the fundamental concepts first",
            IssueKind::FewTechnicalTerms => "Use precise technical terminology",
            IssueKind::Misconception => "Revisit the points flagged as possible misconceptions",
        }
    }
}

/// Score and evidence for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionResult {
    /// 0-10.
    pub score: u8,
    pub strengths: Vec<String>,
    pub issues: Vec<String>,
    /// Literal excerpts or counts backing the strengths and issues.
    pub evidence: Vec<String>,
    /// The most severe issue category, if any issue was raised.
    #[serde(skip)]
    pub worst_issue: Option<IssueKind>,
}

impl DimensionResult {
    /// Result for a transcript with no words.
    pub fn no_answer() -> Self {
        Self {
            score: 0,
            strengths: Vec::new(),
            issues: vec!["No answer provided".to_string()],
            evidence: vec!["0 words".to_string()],
            worst_issue: Some(IssueKind::NoAnswer),
        }
    }
}

/// Accumulates score adjustments, tracking the most severe issue.
struct Tally {
    score: i32,
    strengths: Vec<String>,
    issues: Vec<String>,
    evidence: Vec<String>,
    worst: Option<(i32, IssueKind)>,
}

impl Tally {
    fn new(base: i32) -> Self {
        Self {
            score: base,
            strengths: Vec::new(),
            issues: Vec::new(),
            evidence: Vec::new(),
            worst: None,
        }
    }

    fn penalize(&mut self, kind: IssueKind, points: i32, issue: impl Into<String>) {
        self.score -= points;
        self.issue(kind, points, issue);
    }

    /// Record an issue of the given severity without moving the score.
    fn issue(&mut self, kind: IssueKind, severity: i32, issue: impl Into<String>) {
        self.issues.push(issue.into());
        if self.worst.map_or(true, |(worst, _)| severity > worst) {
            self.worst = Some((severity, kind));
        }
    }

    fn reward(&mut self, points: i32, strength: impl Into<String>) {
        self.score += points;
        self.strengths.push(strength.into());
    }

    fn strength(&mut self, strength: impl Into<String>) {
        self.strengths.push(strength.into());
    }

    fn evidence(&mut self, evidence: impl Into<String>) {
        self.evidence.push(evidence.into());
    }

    fn finish(self) -> DimensionResult {
        DimensionResult {
            score: self.score.clamp(0, MAX_SCORE as i32) as u8,
            strengths: self.strengths,
            issues: self.issues,
            evidence: self.evidence,
            worst_issue: self.worst.map(|(_, kind)| kind),
        }
    }
}

/// Clarity: filler density, sentence shape, transitions and structure.
pub fn score_clarity(
    profile: &LexicalProfile,
    structure: &StructureAnalysis,
    config: &ClarityConfig,
) -> DimensionResult {
    if profile.is_empty() {
        return DimensionResult::no_answer();
    }
    let mut tally = Tally::new(config.base_score);

    let filler_ratio = profile.filler_ratio();
    let filler_evidence = format!(
        "{} filler words in {} words",
        profile.filler_count, profile.word_count
    );
    if filler_ratio > config.heavy_filler_ratio {
        tally.penalize(
            IssueKind::FillerWords,
            config.heavy_filler_penalty,
            "Excessive filler words reduce clarity",
        );
        tally.evidence(filler_evidence);
    } else if filler_ratio > config.moderate_filler_ratio {
        tally.penalize(
            IssueKind::FillerWords,
            config.moderate_filler_penalty,
            "Frequent filler words reduce clarity",
        );
        tally.evidence(filler_evidence);
    } else if profile.filler_count == 0 {
        tally.strength("No filler words");
    } else {
        tally.strength("Minimal use of filler words");
        tally.evidence(filler_evidence);
    }
    if profile.filler_count > 0 && filler_ratio > config.moderate_filler_ratio {
        tally.evidence(format!("fillers used: {}", profile.fillers_found.join(", ")));
    }

    if profile.sentence_count < config.min_sentences {
        tally.penalize(
            IssueKind::FewSentences,
            config.few_sentences_penalty,
            "Too few complete sentences",
        );
        tally.evidence(format!("{} sentences", profile.sentence_count));
    } else if profile.avg_sentence_length > config.max_avg_sentence_words {
        tally.penalize(
            IssueKind::LongSentences,
            config.long_sentence_penalty,
            "Sentences are too long to follow easily",
        );
        tally.evidence(format!(
            "{:.1} words per sentence",
            profile.avg_sentence_length
        ));
    } else {
        tally.strength("Complete sentences of manageable length");
    }

    if profile.transition_count == 0 {
        tally.penalize(
            IssueKind::WeakTransitions,
            config.no_transition_penalty,
            "Lacks transition words between ideas",
        );
    } else if profile.transition_count >= config.transition_bonus_min {
        tally.reward(config.transition_bonus, "Uses transitions to connect ideas");
        tally.evidence(format!(
            "{} transition words: {}",
            profile.transition_count,
            profile.transitions_found.join(", ")
        ));
    }

    let structure_score = structure.structure_score;
    if structure_score >= config.strong_structure_score {
        tally.reward(config.strong_structure_bonus, "Well-structured answer");
        tally.evidence(format!("structure score {structure_score}/10"));
    } else if structure_score >= config.good_structure_score {
        tally.reward(config.good_structure_bonus, "Clear answer structure");
        tally.evidence(format!("structure score {structure_score}/10"));
    } else if structure_score <= config.weak_structure_score {
        tally.penalize(
            IssueKind::WeakStructure,
            config.weak_structure_penalty,
            "Answer lacks a recognizable structure",
        );
        tally.evidence(format!("structure score {structure_score}/10"));
    }

    tally.finish()
}

/// Confidence: hedging, passive voice, assertive markers and length.
pub fn score_confidence(profile: &LexicalProfile, config: &ConfidenceConfig) -> DimensionResult {
    if profile.is_empty() {
        return DimensionResult::no_answer();
    }
    let mut tally = Tally::new(config.base_score);

    let hedge_rate = profile.hedge_rate();
    let hedge_evidence = format!(
        "{} hedges in {} sentences",
        profile.hedge_count, profile.sentence_count
    );
    if hedge_rate > config.frequent_hedge_rate {
        tally.penalize(
            IssueKind::Hedging,
            config.frequent_hedge_penalty,
            "Frequent hedging undermines confidence",
        );
    } else if hedge_rate > config.moderate_hedge_rate {
        tally.penalize(
            IssueKind::Hedging,
            config.moderate_hedge_penalty,
            "Hedging language weakens statements",
        );
    } else if profile.hedge_count > 0 {
        tally.penalize(
            IssueKind::Hedging,
            config.any_hedge_penalty,
            "Some hedging language",
        );
    } else {
        tally.reward(config.no_hedge_bonus, "States ideas without hedging");
    }
    if profile.hedge_count > 0 {
        tally.evidence(hedge_evidence);
        tally.evidence(format!("hedges used: {}", profile.hedges_found.join(", ")));
    }

    let passive_rate = profile.passive_rate();
    if passive_rate > config.heavy_passive_rate {
        tally.penalize(
            IssueKind::PassiveVoice,
            config.heavy_passive_penalty,
            "Heavy use of passive voice",
        );
        tally.evidence(format!("{} passive constructions", profile.passive_count));
    } else if passive_rate > config.some_passive_rate {
        tally.penalize(
            IssueKind::PassiveVoice,
            config.some_passive_penalty,
            "Some passive constructions",
        );
        tally.evidence(format!("{} passive constructions", profile.passive_count));
    } else if profile.passive_count == 0 {
        tally.strength("Uses active voice");
    }

    if profile.confident_count > 0 {
        tally.reward(config.confident_bonus, "Uses assertive language");
        tally.evidence(format!(
            "assertive markers: {}",
            profile.confident_found.join(", ")
        ));
    }

    if profile.content_word_count < config.min_content_words {
        tally.penalize(
            IssueKind::TooBrief,
            config.brief_penalty,
            "Answer is too brief to sound confident",
        );
        tally.evidence(format!("{} words", profile.word_count));
    } else if profile.content_word_count >= config.substantive_content_words {
        tally.reward(config.substantive_bonus, "Gives a substantive, detailed answer");
    }
    if profile.word_count > config.max_words {
        tally.penalize(
            IssueKind::Verbose,
            config.verbose_penalty,
            "Answer is overly long",
        );
        tally.evidence(format!("{} words", profile.word_count));
    }

    tally.finish()
}

/// Technical correctness: concept coverage first, then category vocabulary,
/// mechanism and trade-off discussion, minus detected misconceptions.
pub fn score_technical(
    profile: &LexicalProfile,
    structure: &StructureAnalysis,
    coverage: &CoverageAnalysis,
    question: &QuestionContext,
    transcript: &str,
    config: &TechnicalConfig,
) -> DimensionResult {
    if profile.is_empty() {
        return DimensionResult::no_answer();
    }
    let mut tally = Tally::new(0);

    if coverage.total_expected > 0 {
        let pct = coverage.coverage_percentage;
        tally.score += (config.coverage_weight as f64 * pct as f64 / 100.0).round() as i32;
        tally.evidence(format!(
            "{}/{} expected concepts covered ({pct}%)",
            coverage.total_covered, coverage.total_expected
        ));
        if pct < config.low_coverage_percentage {
            tally.issue(
                IssueKind::LowCoverage,
                config.coverage_weight / 2,
                "Insufficient coverage of key concepts",
            );
        } else if pct >= config.high_coverage_percentage {
            tally.strength("Comprehensive coverage of key concepts");
        }
        for concept in &coverage.covered_concepts {
            tally.strength(format!("Covered concept: {concept}"));
        }
        for concept in &coverage.missing_concepts {
            tally.issue(
                IssueKind::MissingConcepts,
                1,
                format!("Missing concept: {concept}"),
            );
            tally.evidence(concept.clone());
        }
    }

    let keywords = matched_terms(transcript, &question.technical_keywords);
    if keywords.len() >= config.keyword_tier2_count {
        tally.reward(config.keyword_tier2_bonus, "Strong technical vocabulary");
    } else if keywords.len() >= config.keyword_tier1_count {
        tally.reward(config.keyword_tier1_bonus, "Uses relevant technical terms");
    } else if !question.technical_keywords.is_empty() {
        tally.issue(
            IssueKind::FewTechnicalTerms,
            1,
            "Limited technical terminology",
        );
    }
    if !keywords.is_empty() {
        tally.evidence(format!("technical terms used: {}", keywords.join(", ")));
    }

    if structure.has(StructureComponent::Mechanism) {
        tally.reward(config.mechanism_bonus, "Explains the underlying mechanism");
    }
    if structure.has(StructureComponent::TradeOff) {
        tally.reward(config.trade_off_bonus, "Discusses trade-offs or limitations");
    }

    for flag in matched_terms(transcript, &question.red_flags) {
        tally.penalize(
            IssueKind::Misconception,
            config.red_flag_penalty,
            format!("Potential misconception: {flag}"),
        );
        tally.evidence(flag);
    }

    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StructureConfig, Vocabulary};
    use crate::coverage;
    use crate::lexical::LexicalAnalyzer;
    use crate::model::Difficulty;
    use crate::structure::StructureAnalyzer;

    fn profile(transcript: &str) -> LexicalProfile {
        LexicalAnalyzer::new(&Vocabulary::default()).analyze(transcript)
    }

    fn structure(transcript: &str) -> StructureAnalysis {
        StructureAnalyzer::new(&StructureConfig::default())
            .unwrap()
            .analyze(&profile(transcript), transcript)
    }

    fn clarity(transcript: &str) -> DimensionResult {
        score_clarity(
            &profile(transcript),
            &structure(transcript),
            &ClarityConfig::default(),
        )
    }

    fn confidence(transcript: &str) -> DimensionResult {
        score_confidence(&profile(transcript), &ConfidenceConfig::default())
    }

    fn question() -> QuestionContext {
        QuestionContext::new(
            "hashmap",
            "How does a HashMap work?",
            "Data Structures",
            Difficulty::Medium,
            vec!["buckets".into(), "hash function".into()],
        )
        .with_keywords(&["array", "bucket", "hash", "collision", "load factor"])
        .with_red_flags(&["sorted order"])
    }

    fn technical(transcript: &str) -> DimensionResult {
        let q = question();
        let cov = coverage::analyze(transcript, &q.expected_concepts, &q.aliases);
        score_technical(
            &profile(transcript),
            &structure(transcript),
            &cov,
            &q,
            transcript,
            &TechnicalConfig::default(),
        )
    }

    #[test]
    fn empty_input_scores_zero_everywhere() {
        assert_eq!(clarity(""), DimensionResult::no_answer());
        assert_eq!(confidence(""), DimensionResult::no_answer());
        let result = technical("");
        assert_eq!(result.score, 0);
        assert_eq!(result.issues, vec!["No answer provided"]);
        assert_eq!(result.worst_issue, Some(IssueKind::NoAnswer));
    }

    #[test]
    fn clarity_penalizes_frequent_fillers() {
        // 3 fillers in 21 words
        let result = clarity(
            "Um the map uses buckets. Um each key is hashed into one. Uh then we look in that bucket for it.",
        );
        assert!(result.issues.contains(&"Excessive filler words reduce clarity".to_string()));
        assert!(result.evidence.iter().any(|e| e.starts_with("3 filler words in")));
        assert_eq!(result.worst_issue, Some(IssueKind::FillerWords));
    }

    #[test]
    fn clarity_rewards_transitions_and_structure() {
        let text = "A hash map is a key-value store. First it works by hashing each key into a bucket. \
                    For example, user ids map to profiles. However, collisions cost time. \
                    In summary, lookups are fast on average.";
        let result = clarity(text);
        // base 7 + transitions 1 + strong structure 2
        assert_eq!(result.score, 10);
        assert!(result.strengths.contains(&"Well-structured answer".to_string()));
        assert!(result.issues.is_empty());
        assert_eq!(result.worst_issue, None);
    }

    #[test]
    fn clarity_flags_short_unstructured_answer() {
        let result = clarity("Keys go in slots");
        // base 7 - few sentences 2 - no transitions 1 - weak structure 1
        assert_eq!(result.score, 3);
        assert_eq!(result.worst_issue, Some(IssueKind::FewSentences));
    }

    #[test]
    fn confidence_penalizes_hedging_and_brevity() {
        let result = confidence("I think it is maybe a heap. Probably.");
        assert!(result.issues.contains(&"Frequent hedging undermines confidence".to_string()));
        assert!(result.issues.contains(&"Answer is too brief to sound confident".to_string()));
        // base 7 - 3 hedging - 3 brief
        assert_eq!(result.score, 1);
        assert_eq!(result.worst_issue, Some(IssueKind::Hedging));
    }

    #[test]
    fn confidence_rewards_assertive_substantive_answer() {
        let text = "A hash map definitely gives constant time lookups on average. \
            It computes a hash of the key and uses that value to pick a bucket in an array. \
            Each bucket holds a small list of entries, and a lookup walks that list comparing keys. \
            When the table fills past its load factor, it allocates a larger array and moves every entry. \
            That resize costs linear time, but it happens rarely, so inserts stay cheap over many operations.";
        let result = confidence(text);
        // base 7 + no hedges 1 + assertive 1 + substantive 1
        assert_eq!(result.score, 10);
        assert!(result.strengths.contains(&"Uses active voice".to_string()));
    }

    #[test]
    fn clarity_penalizes_long_sentences() {
        let sentence = "the table keeps every entry in an array of slots and each slot holds a short \
            chain of entries whose keys share the same hash value so lookups scan only that chain";
        let text = format!("{sentence}. {sentence}. {sentence}.");
        let result = clarity(&text);
        assert!(result.issues.contains(&"Sentences are too long to follow easily".to_string()));
        assert!(result.evidence.contains(&"32.0 words per sentence".to_string()));
        assert!(!result.strengths.contains(&"Complete sentences of manageable length".to_string()));
    }

    #[test]
    fn confidence_penalizes_heavy_passive_voice() {
        let result = confidence("The key is hashed. The entry is stored. The table is resized.");
        assert!(result.issues.contains(&"Heavy use of passive voice".to_string()));
        assert!(result.evidence.contains(&"3 passive constructions".to_string()));
        // base 7 + no hedges 1 - heavy passive 2 - brief 3
        assert_eq!(result.score, 3);
        assert_eq!(result.worst_issue, Some(IssueKind::TooBrief));
    }

    #[test]
    fn confidence_penalizes_some_passive_voice() {
        // one passive in three sentences
        let result = confidence("The key is hashed. We pick a bucket. We scan the list.");
        assert!(result.issues.contains(&"Some passive constructions".to_string()));
        assert!(!result.issues.contains(&"Heavy use of passive voice".to_string()));
        assert!(result.evidence.contains(&"1 passive constructions".to_string()));
    }

    #[test]
    fn confidence_penalizes_verbose_answer() {
        let text = "Each bucket holds a short chain of entries for its keys. ".repeat(25);
        let result = confidence(&text);
        assert!(result.issues.contains(&"Answer is overly long".to_string()));
        assert!(result.evidence.contains(&"275 words".to_string()));
        // base 7 + no hedges 1 + substantive 1 - verbose 1
        assert_eq!(result.score, 8);
        assert_eq!(result.worst_issue, Some(IssueKind::Verbose));
    }

    #[test]
    fn technical_flags_low_coverage() {
        let result = technical("It stores things in a tree.");
        assert!(result.issues.contains(&"Insufficient coverage of key concepts".to_string()));
        assert!(result.issues.contains(&"Limited technical terminology".to_string()));
        assert_eq!(result.worst_issue, Some(IssueKind::LowCoverage));

        // 50% sits between the low and high coverage thresholds
        let half = technical("It stores keys in buckets.");
        assert!(!half.issues.contains(&"Insufficient coverage of key concepts".to_string()));
        assert!(!half.strengths.contains(&"Comprehensive coverage of key concepts".to_string()));
    }

    #[test]
    fn technical_rewards_strong_vocabulary() {
        let result = technical(
            "Each key is hashed into one of the buckets of an array, and a collision past the load factor triggers growth.",
        );
        assert!(result.strengths.contains(&"Strong technical vocabulary".to_string()));
        assert!(!result.strengths.contains(&"Uses relevant technical terms".to_string()));
        assert!(result
            .evidence
            .contains(&"technical terms used: array, bucket, hash, collision, load factor".to_string()));
    }

    #[test]
    fn technical_driven_by_coverage() {
        let result = technical("We use buckets and a hash function to place each key in an array.");
        // full coverage 6, three category terms 1
        assert!(result.strengths.contains(&"Covered concept: buckets".to_string()));
        assert!(result.strengths.contains(&"Comprehensive coverage of key concepts".to_string()));
        assert_eq!(result.score, 7);
    }

    #[test]
    fn technical_lists_missing_concepts_as_issues() {
        let result = technical("It stores things in buckets.");
        assert!(result.issues.contains(&"Missing concept: hash function".to_string()));
        assert!(result.evidence.contains(&"hash function".to_string()));
    }

    #[test]
    fn technical_penalizes_red_flags() {
        let clean = technical("It stores keys in buckets.");
        let flagged = technical("It stores keys in buckets in sorted order.");
        assert_eq!(flagged.score + 2, clean.score);
        assert!(flagged.issues.contains(&"Potential misconception: sorted order".to_string()));
        assert_eq!(flagged.worst_issue, Some(IssueKind::Misconception));
    }

    #[test]
    fn scores_never_exceed_ten() {
        let mut config = ClarityConfig::default();
        config.base_score = 40;
        let text = "A plain answer.";
        let result = score_clarity(&profile(text), &structure(text), &config);
        assert_eq!(result.score, MAX_SCORE);

        config.base_score = -40;
        let result = score_clarity(&profile(text), &structure(text), &config);
        assert_eq!(result.score, 0);
    }
}
