//! Exact-prefix completion.
use smol_str::SmolStr;

use super::index::PrefixIndex;
use super::ranker::rank;
use super::suggestion::Suggestion;
use super::{MatcherConfig, MatcherKind, SuggestionProvider};
use crate::dictionary::EntryStore;
use crate::normalize::normalize_query;

/// Suggests every entry that starts with the typed input, most used first.
///
/// Has no tolerance for typos: one wrong character and the target is gone
/// for the rest of the word.
#[derive(Debug, Clone)]
pub struct BasicMatcher {
    store: EntryStore,
    index: PrefixIndex,
    n_best: Option<usize>,
}

impl BasicMatcher {
    /// Creates an empty matcher.
    pub fn new(config: &MatcherConfig) -> BasicMatcher {
        BasicMatcher {
            store: EntryStore::with_phrases(config.allow_phrases),
            index: PrefixIndex::default(),
            n_best: config.n_best,
        }
    }
}

impl SuggestionProvider for BasicMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::Basic
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

        self.index.insert(key);
        true
    }

    fn remove_entry(&mut self, text: &str) -> bool {
        match self.store.remove_entry(text) {
            Some(entry) => {
                self.index.remove(&entry.text);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.store.clear();
        self.index.clear();
    }

    fn suggest(&self, partial_input: &str) -> Vec<Suggestion> {
        let query = normalize_query(partial_input);
        if query.is_empty() {
            return vec![];
        }

        let candidates = self
            .index
            .with_prefix(&query)
            .filter_map(|key| self.store.get_entry(key))
            .map(|entry| Suggestion::new(SmolStr::clone(&entry.text), 1.0, entry.usage_count, true))
            .collect::<Vec<_>>();

        log::trace!(
            "basic: {} of {} entries match {:?}",
            candidates.len(),
            self.index.len(),
            query
        );

        rank(candidates, self.n_best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(words: &[&str]) -> BasicMatcher {
        let mut m = BasicMatcher::new(&MatcherConfig::default());
        for w in words {
            m.add_entry(w);
        }
        m
    }

    #[test]
    fn alphabetical_ties() {
        let m = matcher(&["cat", "catalog", "dog"]);
        assert_eq!(m.get_suggestions("ca"), vec!["cat", "catalog"]);
        assert_eq!(m.get_suggestions("CA"), vec!["cat", "catalog"]);
        assert_eq!(m.get_suggestions("d"), vec!["dog"]);
    }

    #[test]
    fn usage_first() {
        let m = matcher(&["cat", "catalog", "dog", "catalog"]);
        assert_eq!(m.get_suggestions("cat"), vec!["catalog", "cat"]);
    }

    #[test]
    fn no_typo_tolerance() {
        let m = matcher(&["receive"]);
        assert!(m.get_suggestions("rec").contains(&SmolStr::new("receive")));
        assert!(m.get_suggestions("reci").is_empty());
    }

    #[test]
    fn empty_input() {
        let m = matcher(&["cat"]);
        assert!(m.get_suggestions("").is_empty());
        assert!(m.get_suggestions("   ").is_empty());
    }

    #[test]
    fn removal_updates_index() {
        let mut m = matcher(&["cat", "catalog"]);
        assert!(m.remove_entry("Cat"));
        assert!(!m.remove_entry("cat"));
        assert_eq!(m.get_suggestions("ca"), vec!["catalog"]);

        m.clear();
        assert!(m.get_suggestions("ca").is_empty());
        assert!(m.store().is_empty());
    }

    #[test]
    fn n_best() {
        let config = MatcherConfig {
            n_best: Some(1),
            ..MatcherConfig::default()
        };
        let mut m = BasicMatcher::new(&config);
        m.add_entry("cat");
        m.add_entry("catalog");
        assert_eq!(m.get_suggestions("ca"), vec!["cat"]);
    }
}
