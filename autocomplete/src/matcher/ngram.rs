//! Typo-tolerant matching over character n-grams.
use hashbrown::HashSet;
use smol_str::SmolStr;

use super::index::{grams, jaccard, GramIndex, PrefixIndex};
use super::ranker::rank;
use super::suggestion::Suggestion;
use super::{MatcherConfig, MatcherKind, SuggestionProvider};
use crate::dictionary::EntryStore;
use crate::error::ConfigurationError;
use crate::normalize::normalize_query;

/// Ranks entries by n-gram overlap with the typed input.
///
/// Transpositions, omissions and insertions only disturb the grams around
/// the error, so the intended word keeps most of its overlap from the first
/// characters on. Entries that literally continue the input always outrank
/// fuzzy ones.
#[derive(Debug, Clone)]
pub struct NGramMatcher {
    store: EntryStore,
    grams: GramIndex,
    prefixes: PrefixIndex,
    n_best: Option<usize>,
}

impl NGramMatcher {
    /// Creates an empty matcher using windows of `config.ngram_size`.
    pub fn new(config: &MatcherConfig) -> Result<NGramMatcher, ConfigurationError> {
        if config.ngram_size == 0 {
            return Err(ConfigurationError::InvalidNgramSize(config.ngram_size));
        }

        Ok(NGramMatcher {
            store: EntryStore::with_phrases(config.allow_phrases),
            grams: GramIndex::new(config.ngram_size),
            prefixes: PrefixIndex::default(),
            n_best: config.n_best,
        })
    }

    /// Window length of the index.
    pub fn ngram_size(&self) -> usize {
        self.grams.size()
    }

    fn candidate_keys<'a>(
        &'a self,
        query: &'a str,
        query_grams: &HashSet<SmolStr>,
    ) -> HashSet<&'a SmolStr> {
        // A query shorter than the window has no grams of its own, so fall
        // back to the keys it is a prefix of.
        if query.chars().count() < self.grams.size() {
            self.prefixes.with_prefix(query).collect()
        } else {
            self.grams.candidates(query_grams)
        }
    }
}

impl SuggestionProvider for NGramMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::NGram
    }

    fn store(&self) -> &EntryStore {
        &self.store
    }

    fn add_entry(&mut self, text: &str) -> bool {
        let key = match self.store.add_entry(text) {
            Some(entry) if entry.usage_count == 1 => entry.text.clone(),
            Some(_) => return true,
            None => return false,
        };

        self.grams.insert(key.clone());
        self.prefixes.insert(key);
        true
    }

    fn remove_entry(&mut self, text: &str) -> bool {
        match self.store.remove_entry(text) {
            Some(entry) => {
                self.grams.remove(&entry.text);
                self.prefixes.remove(&entry.text);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.store.clear();
        self.grams.clear();
        self.prefixes.clear();
    }

    fn suggest(&self, partial_input: &str) -> Vec<Suggestion> {
        let query = normalize_query(partial_input);
        if query.is_empty() {
            return vec![];
        }

        let query_grams = grams(&query, self.grams.size());
        let candidates = self
            .candidate_keys(&query, &query_grams)
            .into_iter()
            .filter_map(|key| {
                let entry = self.store.get_entry(key)?;
                let score = self
                    .grams
                    .grams_of(key)
                    .map(|entry_grams| jaccard(entry_grams, &query_grams))
                    .unwrap_or(0.0);

                Some(Suggestion::new(
                    SmolStr::clone(&entry.text),
                    score,
                    entry.usage_count,
                    key.starts_with(query.as_str()),
                ))
            })
            .collect::<Vec<_>>();

        log::trace!(
            "ngram: {} of {} entries share grams with {:?}",
            candidates.len(),
            self.grams.len(),
            query
        );

        rank(candidates, self.n_best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(words: &[&str]) -> NGramMatcher {
        let mut m = NGramMatcher::new(&MatcherConfig::default()).unwrap();
        for w in words {
            m.add_entry(w);
        }
        m
    }

    #[test]
    fn omitted_character() {
        let m = matcher(&["hello"]);
        let suggestions = m.suggest("helo");

        assert_eq!(suggestions[0].value(), "hello");
        assert!((suggestions[0].score() - 0.75).abs() < f32::EPSILON);
        assert!(!suggestions[0].prefix_match());
    }

    #[test]
    fn transposition() {
        let m = matcher(&["receive", "receipt", "deceive"]);
        let top = m.get_suggestions("recieve");
        assert_eq!(top, vec!["receive", "deceive", "receipt"]);
    }

    #[test]
    fn prefix_boost() {
        let m = matcher(&["helm", "hello", "shell"]);
        let suggestions = m.suggest("hel");

        assert!(suggestions[0].prefix_match());
        assert!(suggestions[1].prefix_match());
        assert_eq!(suggestions[2].value(), "shell");
        assert!(!suggestions[2].prefix_match());
    }

    #[test]
    fn short_query_uses_prefixes() {
        let m = matcher(&["receive", "receipt", "deceive"]);
        assert_eq!(m.get_suggestions("r"), vec!["receipt", "receive"]);
        assert!(m.get_suggestions("x").is_empty());
    }

    #[test]
    fn usage_breaks_ties() {
        let m = matcher(&["cart", "care", "care"]);
        assert_eq!(m.get_suggestions("car"), vec!["care", "cart"]);
    }

    #[test]
    fn deterministic() {
        let m = matcher(&["bat", "cat", "hat", "mat", "rat", "sat", "vat"]);
        let first = m.get_suggestions("zat");
        assert_eq!(first.len(), 7);
        for _ in 0..10 {
            assert_eq!(m.get_suggestions("zat"), first);
        }
        assert_eq!(first[0], "bat");
    }

    #[test]
    fn removal_updates_index() {
        let mut m = matcher(&["hello", "help"]);
        assert!(m.remove_entry("hello"));
        assert_eq!(m.get_suggestions("helo"), vec!["help"]);
        assert_eq!(m.get_suggestions("h"), vec!["help"]);
    }

    #[test]
    fn trigrams() {
        let config = MatcherConfig {
            ngram_size: 3,
            ..MatcherConfig::default()
        };
        let mut m = NGramMatcher::new(&config).unwrap();
        m.add_entry("ox");
        m.add_entry("oxen");

        assert_eq!(m.ngram_size(), 3);
        assert_eq!(m.get_suggestions("ox"), vec!["ox", "oxen"]);
        assert_eq!(m.get_suggestions("oxe"), vec!["oxen"]);
    }

    #[test]
    fn zero_window_rejected() {
        let config = MatcherConfig {
            ngram_size: 0,
            ..MatcherConfig::default()
        };
        assert!(matches!(
            NGramMatcher::new(&config),
            Err(ConfigurationError::InvalidNgramSize(0))
        ));
    }
}
