//! Detection of canonical answer structure.

use std::collections::BTreeMap;
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::config::StructureConfig;
use crate::error::EngineError;
use crate::lexical::LexicalProfile;

/// A canonical part of a well-formed technical answer.
///
/// Variant order is the canonical answer order and is also the key order
/// of `StructureAnalysis::structure_detected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureComponent {
    Definition,
    Mechanism,
    Example,
    TradeOff,
    Conclusion,
}

impl fmt::Display for StructureComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureComponent::Definition => "definition",
            StructureComponent::Mechanism => "mechanism",
            StructureComponent::Example => "example",
            StructureComponent::TradeOff => "trade_off",
            StructureComponent::Conclusion => "conclusion",
        };
        f.write_str(name)
    }
}

/// How well consecutive ideas are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalFlow {
    Poor,
    Fair,
    Good,
}

impl LogicalFlow {
    /// "good" needs two transitions across at least three sentences;
    /// a single transition is "fair".
    pub fn classify(transition_count: usize, sentence_count: usize) -> Self {
        if transition_count >= 2 && sentence_count >= 3 {
            LogicalFlow::Good
        } else if transition_count >= 1 {
            LogicalFlow::Fair
        } else {
            LogicalFlow::Poor
        }
    }
}

impl fmt::Display for LogicalFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalFlow::Poor => write!(f, "poor"),
            LogicalFlow::Fair => write!(f, "fair"),
            LogicalFlow::Good => write!(f, "good"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub structure_detected: BTreeMap<StructureComponent, bool>,
    /// 0-10.
    pub structure_score: u8,
    pub logical_flow: LogicalFlow,
    pub total_sentences: usize,
    pub issues: Vec<String>,
}

impl StructureAnalysis {
    /// Whether `component` was detected. Unconfigured components count as absent.
    pub fn has(&self, component: StructureComponent) -> bool {
        self.structure_detected.get(&component).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    component: StructureComponent,
    patterns: Vec<Regex>,
    missing_issue: String,
}

/// Detects structure components with compiled, case-insensitive patterns.
#[derive(Debug, Clone)]
pub struct StructureAnalyzer {
    rules: Vec<CompiledRule>,
    poor_flow_issue: String,
}

impl StructureAnalyzer {
    pub fn new(config: &StructureConfig) -> Result<Self, EngineError> {
        let mut rules: Vec<CompiledRule> = Vec::with_capacity(config.components.len());
        for rule in &config.components {
            if rules.iter().any(|r| r.component == rule.component) {
                return Err(EngineError::InvalidConfig(format!(
                    "structure component '{}' is configured twice",
                    rule.component
                )));
            }
            let patterns = rule
                .patterns
                .iter()
                .map(|p| {
                    RegexBuilder::new(p)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| {
                            EngineError::InvalidConfig(format!(
                                "bad pattern for '{}': {e}",
                                rule.component
                            ))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rules.push(CompiledRule {
                component: rule.component,
                patterns,
                missing_issue: rule.missing_issue.clone(),
            });
        }
        Ok(Self {
            rules,
            poor_flow_issue: config.poor_flow_issue.clone(),
        })
    }

    pub fn analyze(&self, profile: &LexicalProfile, transcript: &str) -> StructureAnalysis {
        let mut structure_detected = BTreeMap::new();
        let mut issues = Vec::new();
        let mut detected = 0usize;

        for rule in &self.rules {
            let found = rule.patterns.iter().any(|p| p.is_match(transcript));
            structure_detected.insert(rule.component, found);
            if found {
                detected += 1;
            } else {
                issues.push(rule.missing_issue.clone());
            }
        }

        let structure_score = if self.rules.is_empty() {
            0
        } else {
            (10.0 * detected as f64 / self.rules.len() as f64).round() as u8
        };

        let logical_flow = LogicalFlow::classify(profile.transition_count, profile.sentence_count);
        if logical_flow == LogicalFlow::Poor {
            issues.push(self.poor_flow_issue.clone());
        }

        StructureAnalysis {
            structure_detected,
            structure_score,
            logical_flow,
            total_sentences: profile.sentence_count,
            issues,
        }
    }
}
