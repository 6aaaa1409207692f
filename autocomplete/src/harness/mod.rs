//! Measures how early a matcher surfaces the intended word.
//!
//! A [`SpellingCorrectionTester`] replays a misspelling one character at a
//! time and records the first prefix length at which the target word shows
//! up among the first [`NUMBER_OF_SUGGESTIONS_TO_CHECK`] suggestions.
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use language_tags::LanguageTag;
use serde::{Deserialize, Serialize, Serializer};
use smol_str::SmolStr;

use crate::error::ConfigurationError;
use crate::matcher::{create_provider, MatcherConfig, MatcherKind, SuggestionProvider};
use crate::normalize::normalize_query;
use crate::paths::{dictionary_path, DEFAULT_DICTIONARIES_DIR};

/// How many suggestions a user can see and pick from at once.
pub const NUMBER_OF_SUGGESTIONS_TO_CHECK: usize = 4;

/// `characters_typed` value reported when the target never appeared.
pub const NEVER: i64 = -1;

/// A misspelt input and the word the user meant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisspellingTest {
    misspelling: SmolStr,
    target_word: SmolStr,
}

impl MisspellingTest {
    /// Pairs `misspelling` with the `target_word` it should lead to.
    pub fn new(misspelling: impl Into<SmolStr>, target_word: impl Into<SmolStr>) -> MisspellingTest {
        MisspellingTest {
            misspelling: misspelling.into(),
            target_word: target_word.into(),
        }
    }

    /// What the user typed.
    pub fn misspelling(&self) -> &str {
        &self.misspelling
    }

    /// What the user meant.
    pub fn target_word(&self) -> &str {
        &self.target_word
    }
}

/// Progress of one test sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing typed yet
    NotStarted,
    /// Checking the prefix of this many characters
    Scanning(usize),
    /// Target seen at this prefix length
    Found(usize),
    /// Every prefix checked without seeing the target
    Exhausted,
}

/// Outcome of one [`MisspellingTest`].
#[derive(Clone, Debug, Serialize)]
pub struct SpellingCorrectionTestResult<'a> {
    #[serde(serialize_with = "serialize_characters_typed")]
    characters_typed: Option<usize>,
    time_taken: Duration,
    source_test: &'a MisspellingTest,
}

fn serialize_characters_typed<S: Serializer>(
    value: &Option<usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.map(|v| v as i64).unwrap_or(NEVER))
}

impl<'a> SpellingCorrectionTestResult<'a> {
    /// Records the outcome of `source_test`.
    pub fn new(
        characters_typed: Option<usize>,
        time_taken: Duration,
        source_test: &'a MisspellingTest,
    ) -> SpellingCorrectionTestResult<'a> {
        SpellingCorrectionTestResult {
            characters_typed,
            time_taken,
            source_test,
        }
    }

    /// Prefix length at which the target appeared, or [`NEVER`].
    pub fn characters_typed(&self) -> i64 {
        self.characters_typed.map(|v| v as i64).unwrap_or(NEVER)
    }

    /// Prefix length at which the target appeared, if it did.
    pub fn found_at(&self) -> Option<usize> {
        self.characters_typed
    }

    /// Wall-clock time of the whole sweep.
    pub fn time_taken(&self) -> Duration {
        self.time_taken
    }

    /// The test this is the outcome of.
    pub fn source_test(&self) -> &'a MisspellingTest {
        self.source_test
    }
}

/// Which dictionary and matcher a [`SpellingCorrectionTester`] runs with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TesterConfig {
    /// Language tag naming the dictionary file
    pub language: String,
    /// Directory holding `<language>.dic`
    #[serde(default = "default_dictionaries_dir")]
    pub dictionaries_dir: PathBuf,
    /// Matching strategy under test
    pub matcher: MatcherKind,
    /// Tuning for the matcher
    #[serde(default)]
    pub matcher_config: MatcherConfig,
}

fn default_dictionaries_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DICTIONARIES_DIR)
}

impl TesterConfig {
    /// Default dictionaries directory and matcher tuning.
    pub fn new(language: impl Into<String>, matcher: MatcherKind) -> TesterConfig {
        TesterConfig {
            language: language.into(),
            dictionaries_dir: default_dictionaries_dir(),
            matcher,
            matcher_config: MatcherConfig::default(),
        }
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<TesterConfig, ConfigurationError> {
        let file = File::open(path).map_err(|e| ConfigurationError::File(path.to_path_buf(), e))?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Replays misspellings against one configured matcher.
pub struct SpellingCorrectionTester {
    provider: Box<dyn SuggestionProvider>,
}

impl SpellingCorrectionTester {
    /// Builds a `kind` matcher over the dictionary for `language` found in
    /// `dictionaries_dir`.
    ///
    /// Fails before any test can run if the language tag is invalid or its
    /// dictionary file does not exist.
    pub fn new(
        kind: MatcherKind,
        language: &str,
        dictionaries_dir: &Path,
    ) -> Result<SpellingCorrectionTester, ConfigurationError> {
        let mut config = TesterConfig::new(language, kind);
        config.dictionaries_dir = dictionaries_dir.to_path_buf();
        SpellingCorrectionTester::from_config(&config)
    }

    /// Same as [`SpellingCorrectionTester::new`], driven by a [`TesterConfig`].
    pub fn from_config(config: &TesterConfig) -> Result<SpellingCorrectionTester, ConfigurationError> {
        let tag = config
            .language
            .parse::<LanguageTag>()
            .map_err(|e| ConfigurationError::InvalidLanguage(config.language.clone(), e.to_string()))?;

        let mut provider = create_provider(config.matcher, &config.matcher_config)?;
        provider.load_dictionary(&dictionary_path(&config.dictionaries_dir, &tag))?;

        Ok(SpellingCorrectionTester { provider })
    }

    /// Wraps an already populated provider.
    pub fn with_provider(provider: Box<dyn SuggestionProvider>) -> SpellingCorrectionTester {
        SpellingCorrectionTester { provider }
    }

    /// The matcher being measured.
    pub fn provider(&self) -> &dyn SuggestionProvider {
        &*self.provider
    }

    fn is_suggested(&self, typed_so_far: &str, target: &str) -> bool {
        self.provider
            .get_suggestions(typed_so_far)
            .iter()
            .take(NUMBER_OF_SUGGESTIONS_TO_CHECK)
            .any(|suggestion| suggestion == target)
    }

    /// Types `test.misspelling()` one character at a time until the target
    /// word is among the visible suggestions.
    ///
    /// The target is put in the same canonical form as dictionary keys, so
    /// case, surrounding whitespace and long letter runs do not matter.
    pub fn run_test<'a>(&self, test: &'a MisspellingTest) -> SpellingCorrectionTestResult<'a> {
        let now = Instant::now();

        let target = normalize_query(test.target_word());
        let prefix_ends = test
            .misspelling()
            .char_indices()
            .map(|(i, ch)| i + ch.len_utf8())
            .collect::<Vec<_>>();

        let mut state = ScanState::NotStarted;
        loop {
            state = match state {
                ScanState::NotStarted if prefix_ends.is_empty() => ScanState::Exhausted,
                ScanState::NotStarted => ScanState::Scanning(1),
                ScanState::Scanning(n) => {
                    let typed_so_far = &test.misspelling()[..prefix_ends[n - 1]];
                    if self.is_suggested(typed_so_far, &target) {
                        ScanState::Found(n)
                    } else if n < prefix_ends.len() {
                        ScanState::Scanning(n + 1)
                    } else {
                        ScanState::Exhausted
                    }
                }
                ScanState::Found(_) | ScanState::Exhausted => break,
            };
        }

        let time_taken = now.elapsed();
        let characters_typed = match state {
            ScanState::Found(n) => Some(n),
            _ => None,
        };

        log::trace!(
            "{} -> {}: {:?} in {:?}",
            test.misspelling(),
            test.target_word(),
            characters_typed,
            time_taken
        );

        SpellingCorrectionTestResult::new(characters_typed, time_taken, test)
    }

    /// Runs each test in order.
    pub fn run_tests<'a>(&self, tests: &'a [MisspellingTest]) -> Vec<SpellingCorrectionTestResult<'a>> {
        tests.iter().map(|test| self.run_test(test)).collect()
    }
}
