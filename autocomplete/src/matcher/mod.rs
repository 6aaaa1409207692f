//! Matching strategies and the interface they share.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use self::suggestion::Suggestion;
use crate::dictionary::{read_dictionary, EntryStore};
use crate::dictionary::error::DictionaryError;
use crate::error::ConfigurationError;

pub mod basic;
mod index;
pub mod ngram;
pub mod ranker;
pub mod shared;
pub mod suggestion;

pub use self::basic::BasicMatcher;
pub use self::ngram::NGramMatcher;
pub use self::shared::SharedProvider;

/// Matching strategy to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Exact-prefix completion
    Basic,
    /// Typo-tolerant n-gram overlap
    NGram,
}

impl FromStr for MatcherKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<MatcherKind, ConfigurationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(MatcherKind::Basic),
            "ngram" => Ok(MatcherKind::NGram),
            _ => Err(ConfigurationError::UnknownMatcher(s.to_string())),
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            MatcherKind::Basic => write!(f, "basic"),
            MatcherKind::NGram => write!(f, "ngram"),
        }
    }
}

/// Tuning shared by all matching strategies.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Window length of the n-gram matcher
    pub ngram_size: usize,
    /// Cap on returned suggestions, `None` for all of them
    pub n_best: Option<usize>,
    /// Whether multi-word entries are indexed
    pub allow_phrases: bool,
}

impl MatcherConfig {
    /// Bigrams, no cap, single words only.
    pub const fn default() -> MatcherConfig {
        MatcherConfig {
            ngram_size: 2,
            n_best: None,
            allow_phrases: false,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> MatcherConfig {
        MatcherConfig::default()
    }
}

/// What a keyboard front-end or the evaluation harness needs from a matcher.
///
/// Suggestion queries never mutate, so a provider may be queried from
/// several threads as long as nobody adds or removes entries meanwhile.
pub trait SuggestionProvider: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> MatcherKind;

    /// The entries the provider indexes.
    fn store(&self) -> &EntryStore;

    /// Adds `text` or bumps its usage count; false if it normalizes to nothing.
    fn add_entry(&mut self, text: &str) -> bool;

    /// Removes `text` and everything indexed for it; false if absent.
    fn remove_entry(&mut self, text: &str) -> bool;

    /// Drops all entries.
    fn clear(&mut self);

    /// Scored candidates for `partial_input`, best first.
    fn suggest(&self, partial_input: &str) -> Vec<Suggestion>;

    /// Candidate words for `partial_input`, best first. Empty input yields
    /// no suggestions.
    fn get_suggestions(&self, partial_input: &str) -> Vec<SmolStr> {
        self.suggest(partial_input)
            .into_iter()
            .map(|s| s.value)
            .collect()
    }

    /// Adds every qualifying line of a dictionary file, returning how many
    /// lines were accepted.
    fn load_dictionary(&mut self, path: &Path) -> Result<usize, DictionaryError> {
        let words = read_dictionary(path)?;
        let added = words.iter().filter(|w| self.add_entry(w)).count();

        log::debug!(
            "{}: loaded {} of {} lines from {}, {} distinct entries",
            self.kind(),
            added,
            words.len(),
            path.display(),
            self.store().len()
        );

        Ok(added)
    }
}

/// Builds an empty provider of the requested kind.
pub fn create_provider(
    kind: MatcherKind,
    config: &MatcherConfig,
) -> Result<Box<dyn SuggestionProvider>, ConfigurationError> {
    Ok(match kind {
        MatcherKind::Basic => Box::new(BasicMatcher::new(config)),
        MatcherKind::NGram => Box::new(NGramMatcher::new(config)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn kinds() {
        assert_eq!("basic".parse::<MatcherKind>().unwrap(), MatcherKind::Basic);
        assert_eq!("NGram".parse::<MatcherKind>().unwrap(), MatcherKind::NGram);
        assert!(matches!(
            "levenshtein".parse::<MatcherKind>(),
            Err(ConfigurationError::UnknownMatcher(_))
        ));
        assert_eq!(MatcherKind::NGram.to_string(), "ngram");
    }

    #[test]
    fn config_from_json() {
        let cfg: MatcherConfig = serde_json::from_str(r#"{ "ngram_size": 3 }"#).unwrap();
        assert_eq!(cfg.ngram_size, 3);
        assert_eq!(cfg.n_best, None);
        assert!(!cfg.allow_phrases);

        let kind: MatcherKind = serde_json::from_str(r#""ngram""#).unwrap();
        assert_eq!(kind, MatcherKind::NGram);
    }

    #[test]
    fn load_dictionary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cat\ncatalog\n\nx\ntwo words\ndog\nCat").unwrap();

        for kind in [MatcherKind::Basic, MatcherKind::NGram].iter() {
            let mut provider = create_provider(*kind, &MatcherConfig::default()).unwrap();
            assert_eq!(provider.load_dictionary(file.path()).unwrap(), 4);
            assert_eq!(provider.store().len(), 3);
            assert_eq!(provider.store().get_entry("cat").unwrap().usage_count, 2);
            assert_eq!(provider.get_suggestions("ca"), vec!["cat", "catalog"]);
        }
    }

    #[test]
    fn load_missing_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = create_provider(MatcherKind::Basic, &MatcherConfig::default()).unwrap();

        assert!(matches!(
            provider.load_dictionary(&dir.path().join("en.dic")),
            Err(DictionaryError::NotFound(_))
        ));
    }
}
