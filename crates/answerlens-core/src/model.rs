//! Question data model.
//!
//! A `QuestionContext` is produced by a `QuestionStore` and is read-only to
//! the engine. Everything question-specific the engine needs (expected
//! concepts, their surface forms, category keywords, red flags) travels
//! inside it, so the engine itself stays question-agnostic.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How hard a question is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A single interview question and the knowledge it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionContext {
    /// Unique identifier within its question bank.
    pub id: String,
    /// The question as asked.
    pub text: String,
    /// Category name (e.g. "Data Structures").
    pub category: String,
    pub difficulty: Difficulty,
    /// Concepts a complete answer should mention, in display order.
    pub expected_concepts: Vec<String>,
    /// Extra surface forms per concept. The concept name itself always counts.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Technical vocabulary for the question's category.
    #[serde(default)]
    pub technical_keywords: Vec<String>,
    /// Phrases that signal a misconception.
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// Reference answer, when the question bank provides one.
    #[serde(default)]
    pub ideal_answer: Option<String>,
}

impl QuestionContext {
    /// Create a context with no aliases, keywords or red flags.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
        expected_concepts: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
            difficulty,
            expected_concepts,
            aliases: BTreeMap::new(),
            technical_keywords: Vec::new(),
            red_flags: Vec::new(),
            ideal_answer: None,
        }
    }

    /// Register additional surface forms for a concept.
    pub fn with_aliases(mut self, concept: &str, forms: &[&str]) -> Self {
        self.aliases
            .entry(concept.to_string())
            .or_default()
            .extend(forms.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.technical_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_red_flags(mut self, flags: &[&str]) -> Self {
        self.red_flags = flags.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Check the fields the engine relies on.
    ///
    /// Blank concept names or surface forms are rejected because an empty
    /// substring would match every transcript.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidInput("question id is empty".into()));
        }
        if self.text.trim().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "question '{}' has no text",
                self.id
            )));
        }
        if self.category.trim().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "question '{}' has no category",
                self.id
            )));
        }
        if let Some(blank) = self.expected_concepts.iter().find(|c| c.trim().is_empty()) {
            return Err(EngineError::InvalidInput(format!(
                "question '{}' has a blank expected concept ({blank:?})",
                self.id
            )));
        }
        for (concept, forms) in &self.aliases {
            if forms.iter().any(|f| f.trim().is_empty()) {
                return Err(EngineError::InvalidInput(format!(
                    "question '{}' has a blank alias for '{concept}'",
                    self.id
                )));
            }
        }
        if self.red_flags.iter().any(|f| f.trim().is_empty()) {
            return Err(EngineError::InvalidInput(format!(
                "question '{}' has a blank red flag",
                self.id
            )));
        }
        Ok(())
    }
}

/// Raw question shape as it appears in serialized question banks, where
/// `expected_concepts` may be absent. Converting rejects that case: an
/// undefined concept list is not the same as an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub expected_concepts: Option<Vec<String>>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub ideal_answer: Option<String>,
}

impl QuestionRecord {
    /// Convert into a context, attaching the category keywords.
    pub fn into_context(self, technical_keywords: Vec<String>) -> Result<QuestionContext, EngineError> {
        let Some(expected_concepts) = self.expected_concepts else {
            return Err(EngineError::InvalidInput(format!(
                "question '{}' does not define expected_concepts",
                self.id
            )));
        };
        let context = QuestionContext {
            id: self.id,
            text: self.text,
            category: self.category,
            difficulty: self.difficulty,
            expected_concepts,
            aliases: self.aliases,
            technical_keywords,
            red_flags: self.red_flags,
            ideal_answer: self.ideal_answer,
        };
        context.validate()?;
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashmap_question() -> QuestionContext {
        QuestionContext::new(
            "hashmap",
            "How does a HashMap work?",
            "Data Structures",
            Difficulty::Medium,
            vec!["buckets".into(), "collision handling".into()],
        )
    }

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("med".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut q = hashmap_question();
        assert!(q.validate().is_ok());

        q.expected_concepts.push("  ".into());
        assert!(matches!(q.validate(), Err(EngineError::InvalidInput(_))));

        let q = hashmap_question().with_aliases("buckets", &[""]);
        assert!(q.validate().is_err());

        let mut q = hashmap_question();
        q.id = String::new();
        assert!(q.validate().is_err());

        let mut q = hashmap_question();
        q.category = " ".into();
        let err = q.validate().unwrap_err();
        assert_eq!(err, EngineError::InvalidInput("question 'hashmap' has no category".into()));
    }

    #[test]
    fn record_without_concepts_is_invalid_input() {
        let record: QuestionRecord = toml::from_str(
            r#"
id = "q1"
text = "What is a process?"
category = "OS"
difficulty = "easy"
"#,
        )
        .unwrap();
        let err = record.into_context(vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(msg) if msg.contains("expected_concepts")));
    }

    #[test]
    fn record_with_empty_concepts_is_accepted() {
        let record: QuestionRecord = toml::from_str(
            r#"
id = "q1"
text = "What is a process?"
category = "OS"
difficulty = "easy"
expected_concepts = []
"#,
        )
        .unwrap();
        let ctx = record.into_context(vec!["pid".into()]).unwrap();
        assert!(ctx.expected_concepts.is_empty());
        assert_eq!(ctx.technical_keywords, vec!["pid"]);
    }
}
