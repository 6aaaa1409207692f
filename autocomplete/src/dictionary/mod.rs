//! Dictionary entry storage and dictionary file loading.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::HashMap;
use smol_str::SmolStr;

pub mod entry;
pub mod error;

pub use self::entry::DictionaryEntry;
use self::error::DictionaryError;
use crate::normalize::normalize;

/// Owns every dictionary entry, keyed by its normalized text.
///
/// Matchers keep indexes of the keys held here and nothing else, so the
/// store is the only source of truth for entry text and usage counts.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: HashMap<SmolStr, DictionaryEntry>,
    allow_phrases: bool,
}

impl EntryStore {
    /// Creates an empty store that accepts single words only.
    pub fn new() -> EntryStore {
        EntryStore::default()
    }

    /// Creates an empty store; multi-word entries are kept when
    /// `allow_phrases` is set.
    pub fn with_phrases(allow_phrases: bool) -> EntryStore {
        EntryStore {
            entries: HashMap::new(),
            allow_phrases,
        }
    }

    /// Whether multi-word entries are accepted.
    pub fn allows_phrases(&self) -> bool {
        self.allow_phrases
    }

    /// Normalizes `raw` and stores it, or bumps the usage count of the entry
    /// already stored under the same key.
    ///
    /// Returns `None` without touching the store when `raw` normalizes to
    /// nothing.
    pub fn add_entry(&mut self, raw: &str) -> Option<&DictionaryEntry> {
        let key = normalize(raw, self.allow_phrases);
        if key.is_empty() {
            return None;
        }

        let entry = self
            .entries
            .entry(key.clone())
            .and_modify(|e| e.usage_count += 1)
            .or_insert_with(|| DictionaryEntry::new(key));

        Some(entry)
    }

    /// Increments the usage count of an existing entry.
    pub fn record_usage(&mut self, raw: &str) -> Option<&DictionaryEntry> {
        let key = normalize(raw, self.allow_phrases);
        let entry = self.entries.get_mut(key.as_str())?;
        entry.usage_count += 1;
        Some(entry)
    }

    /// Removes the entry `raw` normalizes to.
    pub fn remove_entry(&mut self, raw: &str) -> Option<DictionaryEntry> {
        let key = normalize(raw, self.allow_phrases);
        self.entries.remove(key.as_str())
    }

    /// Looks up an entry by its already normalized key.
    pub fn get_entry(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    /// Whether an entry is stored under the normalized `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates all entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.values()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Reads the qualifying entries of a dictionary file, one per line.
///
/// A missing file is an error; malformed lines are not.
pub fn read_dictionary(path: &Path) -> Result<Vec<SmolStr>, DictionaryError> {
    if !path.is_file() {
        return Err(DictionaryError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| DictionaryError::Io(path.to_path_buf(), e))?;
    let words = read_dictionary_from(BufReader::new(file))
        .map_err(|e| DictionaryError::Io(path.to_path_buf(), e))?;

    log::debug!("Read {} entries from {}", words.len(), path.display());
    Ok(words)
}

/// Reads qualifying entries from any line-oriented UTF-8 source.
///
/// Entries must be longer than one character after trimming and must
/// normalize to a single word. Lines that are not valid UTF-8 are skipped.
pub fn read_dictionary_from<R: BufRead>(reader: R) -> Result<Vec<SmolStr>, std::io::Error> {
    let mut words = vec![];

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = match std::str::from_utf8(&line) {
            Ok(v) => v.trim(),
            Err(e) => {
                log::warn!("Skipping line {}: {}", index + 1, e);
                continue;
            }
        };

        if line.chars().count() <= 1 || normalize(line, false).is_empty() {
            continue;
        }

        words.push(SmolStr::new(line));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn uniqueness() {
        let mut store = EntryStore::new();
        for word in ["Cat", "cat", " CAT ", "dog", "caaat", "x", "", "two words"].iter() {
            store.add_entry(word);
        }

        assert_eq!(store.len(), 3);
        assert_eq!(store.get_entry("cat").map(|e| e.usage_count), Some(3));
        assert_eq!(store.get_entry("dog").map(|e| e.usage_count), Some(1));
        assert_eq!(store.get_entry("caat").map(|e| e.usage_count), Some(1));
        assert!(store.get_entry("x").is_none());
        assert!(store.get_entry("two words").is_none());

        let mut keys = store.entries().map(|e| e.text()).collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, vec!["caat", "cat", "dog"]);
    }

    #[test]
    fn phrases() {
        let mut store = EntryStore::with_phrases(true);
        assert!(store.add_entry("Thank  You").is_some());
        assert!(store.contains("thank you"));
    }

    #[test]
    fn usage_and_removal() {
        let mut store = EntryStore::new();
        store.add_entry("hello");
        assert_eq!(store.record_usage("HELLO").map(|e| e.usage_count), Some(2));
        assert!(store.record_usage("absent").is_none());

        assert_eq!(store.remove_entry("Hello").map(|e| e.usage_count), Some(2));
        assert!(store.is_empty());
        assert!(store.remove_entry("hello").is_none());
    }

    #[test]
    fn reader_skips_malformed_lines() {
        let mut data = b"hello\n\n   \na\n b \nworld\r\ntwo words\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b'\n']);
        data.extend_from_slice(b"last");

        let words = read_dictionary_from(Cursor::new(data)).unwrap();
        assert_eq!(words, vec!["hello", "world", "last"]);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.dic");

        match read_dictionary(&path) {
            Err(e @ DictionaryError::NotFound(_)) => {
                assert!(e.to_string().contains("nope.dic"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "receive\nreceipt\n\ndeceive").unwrap();

        let words = read_dictionary(file.path()).unwrap();
        assert_eq!(words, vec!["receive", "receipt", "deceive"]);
    }
}
