//! Provider handle for embeddings that learn words while being queried.
use std::sync::Arc;

use parking_lot::RwLock;
use smol_str::SmolStr;

use super::suggestion::Suggestion;
use super::SuggestionProvider;

/// Cloneable handle serialising writers and admitting concurrent readers.
#[derive(Clone)]
pub struct SharedProvider {
    inner: Arc<RwLock<Box<dyn SuggestionProvider>>>,
}

impl SharedProvider {
    /// Takes ownership of `provider`.
    pub fn new(provider: Box<dyn SuggestionProvider>) -> SharedProvider {
        SharedProvider {
            inner: Arc::new(RwLock::new(provider)),
        }
    }

    /// See [`SuggestionProvider::add_entry`].
    pub fn add_entry(&self, text: &str) -> bool {
        self.inner.write().add_entry(text)
    }

    /// See [`SuggestionProvider::remove_entry`].
    pub fn remove_entry(&self, text: &str) -> bool {
        self.inner.write().remove_entry(text)
    }

    /// See [`SuggestionProvider::suggest`].
    pub fn suggest(&self, partial_input: &str) -> Vec<Suggestion> {
        self.inner.read().suggest(partial_input)
    }

    /// See [`SuggestionProvider::get_suggestions`].
    pub fn get_suggestions(&self, partial_input: &str) -> Vec<SmolStr> {
        self.inner.read().get_suggestions(partial_input)
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.inner.read().store().len()
    }

    /// Whether no entry has been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SharedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let provider = self.inner.read();
        f.debug_struct("SharedProvider")
            .field("kind", &provider.kind())
            .field("entries", &provider.store().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{create_provider, MatcherConfig, MatcherKind};

    #[test]
    fn writers_and_readers() {
        let provider = create_provider(MatcherKind::NGram, &MatcherConfig::default()).unwrap();
        let shared = SharedProvider::new(provider);

        let handles = (0..4)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for word in ["alpha", "beta", "gamma", "delta"].iter() {
                        shared.add_entry(word);
                        let _ = shared.get_suggestions(&word[..2 + i % 2]);
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 4);
        assert_eq!(shared.get_suggestions("gam"), vec!["gamma"]);
        assert_eq!(shared.suggest("alpha")[0].usage_count(), 4);
    }
}
