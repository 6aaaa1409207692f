//! Key indexes derived from an [`EntryStore`](crate::dictionary::EntryStore).
use std::collections::BTreeSet;
use std::ops::Bound;

use hashbrown::{HashMap, HashSet};
use smol_str::SmolStr;

/// Sorted set of keys answering "which keys start with this prefix".
#[derive(Debug, Clone, Default)]
pub(crate) struct PrefixIndex {
    keys: BTreeSet<SmolStr>,
}

impl PrefixIndex {
    pub fn insert(&mut self, key: SmolStr) {
        self.keys.insert(key);
    }

    pub fn remove(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SmolStr> + 'a {
        self.keys
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |key| key.starts_with(prefix))
    }
}

/// Contiguous character windows of length `n`.
///
/// A word shorter than the window is its own single gram, so that every
/// non-empty word can be reached through the index.
pub(crate) fn grams(word: &str, n: usize) -> HashSet<SmolStr> {
    let chars = word.chars().collect::<Vec<_>>();

    if chars.is_empty() {
        return HashSet::new();
    }

    if chars.len() < n {
        return std::iter::once(SmolStr::new(word)).collect();
    }

    chars
        .windows(n)
        .map(|w| w.iter().copied().collect::<SmolStr>())
        .collect()
}

/// Inverted index from n-gram to the keys containing it.
#[derive(Debug, Clone)]
pub(crate) struct GramIndex {
    size: usize,
    postings: HashMap<SmolStr, HashSet<SmolStr>>,
    key_grams: HashMap<SmolStr, HashSet<SmolStr>>,
}

impl GramIndex {
    pub fn new(size: usize) -> GramIndex {
        GramIndex {
            size,
            postings: HashMap::new(),
            key_grams: HashMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn insert(&mut self, key: SmolStr) {
        if self.key_grams.contains_key(&key) {
            return;
        }

        let key_grams = grams(&key, self.size);
        for gram in key_grams.iter() {
            self.postings
                .entry(gram.clone())
                .or_insert_with(HashSet::new)
                .insert(key.clone());
        }
        self.key_grams.insert(key, key_grams);
    }

    pub fn remove(&mut self, key: &str) {
        let key_grams = match self.key_grams.remove(key) {
            Some(v) => v,
            None => return,
        };

        for gram in key_grams.iter() {
            if let Some(keys) = self.postings.get_mut(gram) {
                keys.remove(key);
                if keys.is_empty() {
                    self.postings.remove(gram);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.postings.clear();
        self.key_grams.clear();
    }

    pub fn len(&self) -> usize {
        self.key_grams.len()
    }

    /// Gram set of an indexed key.
    pub fn grams_of(&self, key: &str) -> Option<&HashSet<SmolStr>> {
        self.key_grams.get(key)
    }

    /// Keys sharing at least one gram with `query_grams`.
    pub fn candidates<'a>(&'a self, query_grams: &HashSet<SmolStr>) -> HashSet<&'a SmolStr> {
        query_grams
            .iter()
            .filter_map(|gram| self.postings.get(gram))
            .flatten()
            .collect()
    }
}

/// Jaccard overlap of two gram sets.
pub(crate) fn jaccard(a: &HashSet<SmolStr>, b: &HashSet<SmolStr>) -> f32 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}
