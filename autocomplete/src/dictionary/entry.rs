//! A single dictionary word with its usage counter.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Word or phrase known to the store
pub struct DictionaryEntry {
    /// the canonical (normalized) text, never empty
    pub text: SmolStr,
    /// how many times the entry was added or used
    pub usage_count: u64,
}

impl DictionaryEntry {
    /// creates an entry seen once
    pub fn new(text: SmolStr) -> DictionaryEntry {
        DictionaryEntry {
            text,
            usage_count: 1,
        }
    }

    /// gets the canonical text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// gets the usage count
    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }
}
