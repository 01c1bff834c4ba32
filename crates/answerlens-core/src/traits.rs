//! Seams to the engine's collaborators.
//!
//! The engine never calls either trait itself: callers fetch a question and
//! a transcript, then hand both to `FeedbackEngine::evaluate`. Speech-to-text
//! backends live in `answerlens-providers`; question banks in `parser`.

use async_trait::async_trait;

use crate::error::TranscriptionError;
use crate::model::{Difficulty, QuestionContext};

/// Trait for speech-to-text backends.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Turn recorded audio into plain text.
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError>;
}

/// Criteria for narrowing a question store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Match categories case-insensitively.
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &QuestionContext) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| c.eq_ignore_ascii_case(&question.category));
        let difficulty_ok = self.difficulty.is_none_or(|d| d == question.difficulty);
        category_ok && difficulty_ok
    }
}

/// Source of question contexts.
pub trait QuestionStore: Send + Sync {
    /// Fetch a question by id, or the store's default question when `id` is `None`.
    fn get_question(&self, id: Option<&str>) -> anyhow::Result<QuestionContext>;

    /// Questions matching `filter`, in store order.
    fn filter(&self, filter: &QuestionFilter) -> Vec<QuestionContext>;

    /// Distinct category names, sorted.
    fn categories(&self) -> Vec<String>;

    /// Distinct difficulties present, in ascending order.
    fn difficulties(&self) -> Vec<Difficulty>;

    /// Number of questions matching `filter`.
    fn count(&self, filter: &QuestionFilter) -> usize {
        self.filter(filter).len()
    }
}
