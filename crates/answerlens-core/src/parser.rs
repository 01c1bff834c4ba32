//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, validates them,
//! and serves them through `QuestionStore`.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::coverage::concept_key;
use crate::model::{Difficulty, QuestionContext, QuestionRecord};
use crate::traits::{QuestionFilter, QuestionStore};

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlQuestionBankFile {
    question_bank: TomlQuestionBankHeader,
    #[serde(default)]
    categories: BTreeMap<String, TomlCategory>,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCategory {
    #[serde(default)]
    keywords: Vec<String>,
}

/// A named collection of questions with per-category technical vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Technical keywords per category name.
    pub categories: BTreeMap<String, Vec<String>>,
    /// Questions in file order. Each carries its category's keywords.
    pub questions: Vec<QuestionContext>,
}

impl QuestionBank {
    pub fn question(&self, id: &str) -> Option<&QuestionContext> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl QuestionStore for QuestionBank {
    fn get_question(&self, id: Option<&str>) -> Result<QuestionContext> {
        match id {
            Some(id) => self
                .question(id)
                .cloned()
                .with_context(|| format!("question '{id}' not found in bank '{}'", self.id)),
            None => self
                .questions
                .first()
                .cloned()
                .with_context(|| format!("question bank '{}' has no questions", self.id)),
        }
    }

    fn filter(&self, filter: &QuestionFilter) -> Vec<QuestionContext> {
        self.questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect()
    }

    fn categories(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .questions
            .iter()
            .map(|q| q.category.as_str())
            .chain(self.categories.keys().map(String::as_str))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    fn difficulties(&self) -> Vec<Difficulty> {
        let levels: BTreeSet<Difficulty> = self.questions.iter().map(|q| q.difficulty).collect();
        levels.into_iter().collect()
    }

    fn count(&self, filter: &QuestionFilter) -> usize {
        self.questions.iter().filter(|q| filter.matches(q)).count()
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlQuestionBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let categories: BTreeMap<String, Vec<String>> = parsed
        .categories
        .into_iter()
        .map(|(name, category)| (name, category.keywords))
        .collect();

    let questions = parsed
        .questions
        .into_iter()
        .map(|record| {
            let keywords = categories.get(&record.category).cloned().unwrap_or_default();
            let id = record.id.clone();
            record
                .into_context(keywords)
                .with_context(|| format!("invalid question '{id}' in {}", source_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.question_bank.id,
        name: parsed.question_bank.name,
        description: parsed.question_bank.description,
        categories,
        questions,
    })
}

/// Recursively load all `.toml` question bank files from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            banks.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring mistakes.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |id: &str, message: String| {
        warnings.push(ValidationWarning {
            question_id: Some(id.to_string()),
            message,
        });
    };

    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(&q.id) {
            warn(&q.id, format!("duplicate question ID: {}", q.id));
        }
    }

    for q in &bank.questions {
        if q.expected_concepts.is_empty() {
            warn(
                &q.id,
                "expected_concepts is empty; technical coverage will always be 0%".into(),
            );
        }
        if !bank.categories.contains_key(&q.category) {
            warn(
                &q.id,
                format!("category '{}' defines no technical keywords", q.category),
            );
        }
        let mut seen_concepts = HashSet::new();
        for concept in &q.expected_concepts {
            if !seen_concepts.insert(concept_key(concept)) {
                warn(
                    &q.id,
                    format!("'{concept}' repeats an earlier expected concept and counts once"),
                );
            }
            if q.red_flags.iter().any(|f| concept_key(f) == concept_key(concept)) {
                warn(
                    &q.id,
                    format!("'{concept}' is both an expected concept and a red flag"),
                );
            }
        }
        for concept in q.aliases.keys() {
            let key = concept_key(concept);
            if !q.expected_concepts.iter().any(|c| concept_key(c) == key) {
                warn(
                    &q.id,
                    format!("aliases given for '{concept}', which is not an expected concept"),
                );
            }
        }
    }

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question bank contains no questions".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[question_bank]
id = "core"
name = "Core CS"
description = "Fundamentals"

[categories."Data Structures"]
keywords = ["array", "bucket", "hash"]

[[questions]]
id = "hashmap"
text = "How does a HashMap work?"
category = "Data Structures"
difficulty = "medium"
expected_concepts = ["hash function", "buckets", "collision handling"]
red_flags = ["sorted order"]
ideal_answer = "A HashMap hashes keys into buckets."

[questions.aliases]
"collision handling" = ["collide", "chaining"]

[[questions]]
id = "process-thread"
text = "Process versus thread?"
category = "Operating Systems"
difficulty = "easy"
expected_concepts = ["address space"]
"#;

    fn bank() -> QuestionBank {
        parse_question_bank_str(VALID_TOML, &PathBuf::from("bank.toml")).unwrap()
    }

    #[test]
    fn parse_valid_toml() {
        let bank = bank();
        assert_eq!(bank.id, "core");
        assert_eq!(bank.questions.len(), 2);
        let q = &bank.questions[0];
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.technical_keywords, vec!["array", "bucket", "hash"]);
        assert_eq!(q.aliases["collision handling"], vec!["collide", "chaining"]);
        assert_eq!(q.red_flags, vec!["sorted order"]);
        assert!(q.ideal_answer.is_some());
        assert!(bank.questions[1].technical_keywords.is_empty());
    }

    #[test]
    fn store_lookup_and_default() {
        let bank = bank();
        assert_eq!(bank.get_question(None).unwrap().id, "hashmap");
        assert_eq!(bank.get_question(Some("process-thread")).unwrap().id, "process-thread");
        let err = bank.get_question(Some("nope")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn store_filters_and_lists() {
        let bank = bank();
        assert_eq!(bank.count(&QuestionFilter::default()), 2);
        assert_eq!(bank.categories(), vec!["Data Structures", "Operating Systems"]);
        assert_eq!(bank.difficulties(), vec![Difficulty::Easy, Difficulty::Medium]);
        let easy = bank.filter(&QuestionFilter {
            category: None,
            difficulty: Some(Difficulty::Easy),
        });
        assert_eq!(easy.len(), 1);
        assert_eq!(easy[0].id, "process-thread");
        let systems = QuestionFilter {
            category: Some("Operating Systems".into()),
            difficulty: Some(Difficulty::Hard),
        };
        assert_eq!(bank.count(&systems), 0);
    }

    #[test]
    fn missing_concepts_field_is_an_error() {
        let toml = r#"
[question_bank]
id = "bad"
name = "Bad"

[[questions]]
id = "q1"
text = "What is DNS?"
category = "Networking"
difficulty = "easy"
"#;
        let err = parse_question_bank_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("expected_concepts"));
    }

    #[test]
    fn validate_flags_authoring_mistakes() {
        let toml = r#"
[question_bank]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
text = "First?"
category = "Misc"
difficulty = "easy"
expected_concepts = []

[[questions]]
id = "same"
text = "Second?"
category = "Misc"
difficulty = "hard"
expected_concepts = ["latency"]
red_flags = ["Latency"]
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("dupes.toml")).unwrap();
        let warnings = validate_question_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("no technical keywords")));
        assert!(warnings.iter().any(|w| w.message.contains("red flag")));
    }

    #[test]
    fn validate_matches_concepts_ignoring_case() {
        let toml = r#"
[question_bank]
id = "case"
name = "Case"

[categories.Databases]
keywords = ["index"]

[[questions]]
id = "indexing"
text = "Why index a table?"
category = "Databases"
difficulty = "medium"
expected_concepts = ["Load Factor", "index", "Index"]

[questions.aliases]
"load factor" = ["fill ratio"]
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("case.toml")).unwrap();
        let warnings = validate_question_bank(&bank);
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert!(warnings[0].message.contains("'Index' repeats an earlier expected concept"));
    }

    #[test]
    fn clean_bank_has_only_category_warning() {
        let warnings = validate_question_bank(&bank());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].question_id.as_deref(), Some("process-thread"));
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_question_bank_str("not [valid toml }{", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("core.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[[[").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_question_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "core");
    }
}
