//! The feedback engine.
//!
//! Evaluation is a fixed pipeline: lexical profile, structure, coverage
//! (plus the reference-answer comparison when the question has one), the
//! three dimension scorers, aggregation, then report assembly. Each stage is
//! a pure function of the transcript, the question and the configuration,
//! and the engine holds no mutable state, so one engine can be shared
//! across threads.

use crate::aggregate;
use crate::config::{EngineConfig, ScoringConfig};
use crate::coverage;
use crate::error::EngineError;
use crate::ideal;
use crate::lexical::LexicalAnalyzer;
use crate::model::QuestionContext;
use crate::report::FeedbackReport;
use crate::scoring::{score_clarity, score_confidence, score_technical};
use crate::structure::StructureAnalyzer;

/// Scores transcripts against question contexts.
#[derive(Debug, Clone)]
pub struct FeedbackEngine {
    lexical: LexicalAnalyzer,
    structure: StructureAnalyzer,
    scoring: ScoringConfig,
}

impl FeedbackEngine {
    /// Build an engine, validating the configuration and compiling its patterns.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            lexical: LexicalAnalyzer::new(&config.vocabulary),
            structure: StructureAnalyzer::new(&config.structure)?,
            scoring: config.scoring,
        })
    }

    /// An engine with the built-in vocabulary, patterns and heuristics.
    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::new(EngineConfig::default())
    }

    /// Evaluate one transcript.
    ///
    /// An empty transcript is not an error: it yields zero scores and a
    /// suggestion to record an answer. The only failures are a question
    /// context missing required fields and, in principle, a report that
    /// fails its own consistency checks.
    pub fn evaluate(
        &self,
        transcript: &str,
        question: &QuestionContext,
    ) -> Result<FeedbackReport, EngineError> {
        question.validate()?;

        let profile = self.lexical.analyze(transcript);
        let structure = self.structure.analyze(&profile, transcript);
        let mut coverage = coverage::analyze(transcript, &question.expected_concepts, &question.aliases);
        coverage.ideal_comparison = question
            .ideal_answer
            .as_deref()
            .filter(|reference| !reference.trim().is_empty())
            .map(|reference| ideal::compare(transcript, reference));

        let clarity = score_clarity(&profile, &structure, &self.scoring.clarity);
        let confidence = score_confidence(&profile, &self.scoring.confidence);
        let technical = score_technical(
            &profile,
            &structure,
            &coverage,
            question,
            transcript,
            &self.scoring.technical,
        );
        let (overall, suggestions) =
            aggregate::aggregate(&clarity, &confidence, &technical, &self.scoring.aggregate);

        tracing::debug!(
            question = %question.id,
            words = profile.word_count,
            sentences = profile.sentence_count,
            clarity = clarity.score,
            confidence = confidence.score,
            technical = technical.score,
            overall,
            "evaluated transcript"
        );

        FeedbackReport::builder(transcript)
            .clarity(clarity)
            .confidence(confidence)
            .technical(technical)
            .overall(overall)
            .structure(structure)
            .coverage(coverage)
            .suggestions(suggestions)
            .build()
    }
}
