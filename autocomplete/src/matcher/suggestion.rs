//! Suggestion for a completion or spelling correction.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::cmp::Ordering::Equal;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Candidate word with the evidence used to rank it
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// similarity to the typed input, between 0 and 1
    pub score: f32,
    /// usage count of the dictionary entry
    pub usage_count: u64,
    /// whether the word literally continues the typed input
    pub prefix_match: bool,
}

impl Suggestion {
    /// creates a suggestion
    pub fn new(value: SmolStr, score: f32, usage_count: u64, prefix_match: bool) -> Suggestion {
        Suggestion {
            value,
            score,
            usage_count,
            prefix_match,
        }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the similarity score
    pub fn score(&self) -> f32 {
        self.score
    }

    /// gets the usage count
    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    /// returns whether the suggestion starts with the typed input
    pub fn prefix_match(&self) -> bool {
        self.prefix_match
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best first: prefix continuations, then higher score, then more frequent,
/// then alphabetical.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .prefix_match
            .cmp(&self.prefix_match)
            .then_with(|| other.score.partial_cmp(&self.score).unwrap_or(Equal))
            .then_with(|| other.usage_count.cmp(&self.usage_count))
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Equal
    }
}

impl Eq for Suggestion {}
