//! Lexical analysis of a transcript.
//!
//! Splits the transcript into sentences and words and counts marker phrases
//! from a fixed `Vocabulary`. Counting is purely lexical: a marker matches
//! when its words appear consecutively, compared case-insensitively.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::Vocabulary;

/// Words ending in "-ed"/"-en" that are not past participles.
const NOT_PARTICIPLES: &[&str] = &[
    "when", "then", "often", "even", "open", "token", "seven", "eleven", "indeed", "need",
    "speed", "seed", "feed", "embed",
];

/// Counts and excerpts derived from one transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalProfile {
    pub sentence_count: usize,
    pub word_count: usize,
    pub filler_count: usize,
    pub hedge_count: usize,
    pub passive_count: usize,
    pub transition_count: usize,
    pub confident_count: usize,
    /// Words not consumed by a filler or hedge match.
    pub content_word_count: usize,
    pub avg_sentence_length: f64,
    pub sentences: Vec<String>,
    /// Distinct markers in the order they first appear.
    pub fillers_found: Vec<String>,
    pub hedges_found: Vec<String>,
    pub transitions_found: Vec<String>,
    pub confident_found: Vec<String>,
}

impl LexicalProfile {
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Filler words per word, 0 for an empty transcript.
    pub fn filler_ratio(&self) -> f64 {
        ratio(self.filler_count, self.word_count)
    }

    /// Hedges per sentence, 0 when there are no sentences.
    pub fn hedge_rate(&self) -> f64 {
        ratio(self.hedge_count, self.sentence_count)
    }

    /// Passive constructions per sentence, 0 when there are no sentences.
    pub fn passive_rate(&self) -> f64 {
        ratio(self.passive_count, self.sentence_count)
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// A marker phrase pre-split into lowercase words.
#[derive(Debug, Clone)]
struct Phrase {
    text: String,
    words: Vec<String>,
}

impl Phrase {
    fn compile(list: &[String]) -> Vec<Phrase> {
        list.iter()
            .map(|p| Phrase {
                text: p.trim().to_lowercase(),
                words: tokenize(p),
            })
            .filter(|p| !p.words.is_empty())
            .collect()
    }

    fn matches_at(&self, words: &[String], start: usize) -> bool {
        words.len() >= start + self.words.len()
            && self.words.iter().zip(&words[start..]).all(|(a, b)| a == b)
    }
}

/// Result of scanning a word sequence for one marker list.
struct MarkerScan {
    count: usize,
    found: Vec<String>,
    consumed: Vec<bool>,
}

fn scan(phrases: &[Phrase], words: &[String]) -> MarkerScan {
    let mut hits: Vec<(usize, &str)> = Vec::new();
    let mut consumed = vec![false; words.len()];

    for phrase in phrases {
        for start in 0..words.len() {
            if phrase.matches_at(words, start) {
                hits.push((start, &phrase.text));
                for flag in &mut consumed[start..start + phrase.words.len()] {
                    *flag = true;
                }
            }
        }
    }

    hits.sort();
    let mut seen = HashSet::new();
    let found = hits
        .iter()
        .filter(|(_, text)| seen.insert(*text))
        .map(|(_, text)| text.to_string())
        .collect();

    MarkerScan {
        count: hits.len(),
        found,
        consumed,
    }
}

/// Lowercased words, split on anything that is not alphanumeric or an apostrophe.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Sentences split on terminal punctuation, dropping fragments with no words.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}

/// Tokenizes transcripts and counts vocabulary markers.
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    fillers: Vec<Phrase>,
    hedges: Vec<Phrase>,
    transitions: Vec<Phrase>,
    confident: Vec<Phrase>,
    auxiliaries: HashSet<String>,
    irregular_participles: HashSet<String>,
}

impl LexicalAnalyzer {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let lowered = |list: &[String]| -> HashSet<String> {
            list.iter().map(|w| w.trim().to_lowercase()).collect()
        };
        Self {
            fillers: Phrase::compile(&vocabulary.fillers),
            hedges: Phrase::compile(&vocabulary.hedges),
            transitions: Phrase::compile(&vocabulary.transitions),
            confident: Phrase::compile(&vocabulary.confident_markers),
            auxiliaries: lowered(&vocabulary.passive_auxiliaries),
            irregular_participles: lowered(&vocabulary.irregular_participles),
        }
    }

    pub fn analyze(&self, transcript: &str) -> LexicalProfile {
        let sentences = split_sentences(transcript);
        let words = tokenize(transcript);
        if words.is_empty() {
            return LexicalProfile::default();
        }

        let fillers = scan(&self.fillers, &words);
        let hedges = scan(&self.hedges, &words);
        let transitions = scan(&self.transitions, &words);
        let confident = scan(&self.confident, &words);

        let content_word_count = fillers
            .consumed
            .iter()
            .zip(&hedges.consumed)
            .filter(|(f, h)| !**f && !**h)
            .count();

        let avg_sentence_length = ratio(words.len(), sentences.len());

        LexicalProfile {
            sentence_count: sentences.len(),
            word_count: words.len(),
            filler_count: fillers.count,
            hedge_count: hedges.count,
            passive_count: self.count_passives(&words),
            transition_count: transitions.count,
            confident_count: confident.count,
            content_word_count,
            avg_sentence_length,
            sentences,
            fillers_found: fillers.found,
            hedges_found: hedges.found,
            transitions_found: transitions.found,
            confident_found: confident.found,
        }
    }

    /// Auxiliary verb followed by a past participle, allowing one "-ly"
    /// adverb in between ("is usually stored").
    fn count_passives(&self, words: &[String]) -> usize {
        let mut count = 0;
        for (i, word) in words.iter().enumerate() {
            if !self.auxiliaries.contains(word) {
                continue;
            }
            let next = match words.get(i + 1) {
                Some(next) if next.ends_with("ly") => words.get(i + 2),
                other => other,
            };
            if next.is_some_and(|w| self.is_participle(w)) {
                count += 1;
            }
        }
        count
    }

    fn is_participle(&self, word: &str) -> bool {
        if self.irregular_participles.contains(word) {
            return true;
        }
        word.len() > 3
            && (word.ends_with("ed") || word.ends_with("en"))
            && !NOT_PARTICIPLES.contains(&word)
    }
}
