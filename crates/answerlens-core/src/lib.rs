//! answerlens-core — Deterministic scoring and feedback for interview answers.
//!
//! Given the transcript of a spoken answer and the question it answers,
//! `FeedbackEngine` produces a `FeedbackReport`: clarity, confidence and
//! technical-correctness scores with evidence, detected answer structure,
//! concept coverage, and prioritized suggestions.
//!
//! ```
//! use answerlens_core::{Difficulty, FeedbackEngine, QuestionContext};
//!
//! let question = QuestionContext::new(
//!     "hashmap",
//!     "How does a HashMap work?",
//!     "Data Structures",
//!     Difficulty::Medium,
//!     vec!["hash function".into(), "buckets".into()],
//! );
//! let engine = FeedbackEngine::with_defaults().unwrap();
//! let report = engine
//!     .evaluate("A HashMap uses a hash function to pick one of its buckets.", &question)
//!     .unwrap();
//! assert_eq!(report.coverage_analysis.coverage_percentage, 100);
//! ```

pub mod aggregate;
pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod ideal;
pub mod lexical;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod structure;
pub mod traits;

pub use config::EngineConfig;
pub use engine::FeedbackEngine;
pub use error::{EngineError, TranscriptionError};
pub use model::{Difficulty, QuestionContext};
pub use report::FeedbackReport;
pub use scoring::DimensionResult;
pub use traits::{QuestionStore, Transcriber};

/// Evaluate with the default configuration.
pub fn evaluate(transcript: &str, question: &QuestionContext) -> Result<FeedbackReport, EngineError> {
    FeedbackEngine::with_defaults()?.evaluate(transcript, question)
}
