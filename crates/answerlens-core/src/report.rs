//! The assembled feedback report.

use serde::{Deserialize, Serialize};

use crate::coverage::CoverageAnalysis;
use crate::error::EngineError;
use crate::scoring::{DimensionResult, MAX_SCORE};
use crate::structure::StructureAnalysis;

/// Final output of one evaluation.
///
/// Serializes to a stable JSON layout: the field names here are part of the
/// public contract and the report carries no timestamps or random ids, so
/// equal inputs give byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub transcript: String,
    pub clarity_score: DimensionResult,
    pub confidence_score: DimensionResult,
    pub technical_score: DimensionResult,
    pub overall_score: u8,
    pub structure_analysis: StructureAnalysis,
    pub coverage_analysis: CoverageAnalysis,
    pub suggestions: Vec<String>,
}

impl FeedbackReport {
    pub fn builder(transcript: impl Into<String>) -> FeedbackReportBuilder {
        FeedbackReportBuilder::new(transcript)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::MalformedReport(e.to_string()))
    }
}

/// Collects the parts of a report and checks them before assembly.
#[derive(Debug, Clone, Default)]
pub struct FeedbackReportBuilder {
    transcript: String,
    clarity: Option<DimensionResult>,
    confidence: Option<DimensionResult>,
    technical: Option<DimensionResult>,
    overall: Option<u8>,
    structure: Option<StructureAnalysis>,
    coverage: Option<CoverageAnalysis>,
    suggestions: Vec<String>,
}

impl FeedbackReportBuilder {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            ..Self::default()
        }
    }

    pub fn clarity(mut self, result: DimensionResult) -> Self {
        self.clarity = Some(result);
        self
    }

    pub fn confidence(mut self, result: DimensionResult) -> Self {
        self.confidence = Some(result);
        self
    }

    pub fn technical(mut self, result: DimensionResult) -> Self {
        self.technical = Some(result);
        self
    }

    pub fn overall(mut self, score: u8) -> Self {
        self.overall = Some(score);
        self
    }

    pub fn structure(mut self, analysis: StructureAnalysis) -> Self {
        self.structure = Some(analysis);
        self
    }

    pub fn coverage(mut self, analysis: CoverageAnalysis) -> Self {
        self.coverage = Some(analysis);
        self
    }

    pub fn suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn build(self) -> Result<FeedbackReport, EngineError> {
        let clarity_score = required(self.clarity, "clarity score")?;
        let confidence_score = required(self.confidence, "confidence score")?;
        let technical_score = required(self.technical, "technical score")?;
        let overall_score = required(self.overall, "overall score")?;
        let structure_analysis = required(self.structure, "structure analysis")?;
        let coverage_analysis = required(self.coverage, "coverage analysis")?;

        for (name, score) in [
            ("clarity", clarity_score.score),
            ("confidence", confidence_score.score),
            ("technical", technical_score.score),
            ("overall", overall_score),
            ("structure", structure_analysis.structure_score),
        ] {
            if score > MAX_SCORE {
                return Err(EngineError::MalformedReport(format!(
                    "{name} score {score} is outside 0-{MAX_SCORE}"
                )));
            }
        }
        check_coverage(&coverage_analysis)?;

        Ok(FeedbackReport {
            transcript: self.transcript,
            clarity_score,
            confidence_score,
            technical_score,
            overall_score,
            structure_analysis,
            coverage_analysis,
            suggestions: self.suggestions,
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, EngineError> {
    value.ok_or_else(|| EngineError::MalformedReport(format!("missing {name}")))
}

fn check_coverage(coverage: &CoverageAnalysis) -> Result<(), EngineError> {
    if coverage.coverage_percentage > 100 {
        return Err(EngineError::MalformedReport(format!(
            "coverage percentage {} exceeds 100",
            coverage.coverage_percentage
        )));
    }
    if coverage.total_covered != coverage.covered_concepts.len()
        || coverage.total_covered + coverage.missing_concepts.len() != coverage.total_expected
    {
        return Err(EngineError::MalformedReport(
            "coverage totals do not match concept lists".into(),
        ));
    }
    if let Some(both) = coverage
        .covered_concepts
        .iter()
        .find(|c| coverage.missing_concepts.contains(c))
    {
        return Err(EngineError::MalformedReport(format!(
            "concept '{both}' is both covered and missing"
        )));
    }
    Ok(())
}
