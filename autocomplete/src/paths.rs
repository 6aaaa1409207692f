//! Locating dictionary files by language tag.
use std::path::{Path, PathBuf};

pub use language_tags::LanguageTag;

/// Extension of plain-text dictionary files.
pub const DICTIONARY_FILE_EXT: &str = "dic";

/// Directory searched for dictionaries when none is configured.
pub const DEFAULT_DICTIONARIES_DIR: &str = "Dictionaries";

/// Where the dictionary for `tag` lives under `dir`, whether or not it exists.
pub fn dictionary_path(dir: &Path, tag: &LanguageTag) -> PathBuf {
    dir.join(format!("{tag}.{DICTIONARY_FILE_EXT}"))
}

/// Like [`dictionary_path`], but only if the file exists.
pub fn find_dictionary_path(dir: &Path, tag: &LanguageTag) -> Option<PathBuf> {
    let path = dictionary_path(dir, tag);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_tag() {
        let dir = tempfile::tempdir().unwrap();
        let tag: LanguageTag = "en".parse().unwrap();

        assert_eq!(dictionary_path(dir.path(), &tag), dir.path().join("en.dic"));
        assert_eq!(find_dictionary_path(dir.path(), &tag), None);

        std::fs::write(dir.path().join("en.dic"), "hello\n").unwrap();
        assert_eq!(
            find_dictionary_path(dir.path(), &tag),
            Some(dir.path().join("en.dic"))
        );
    }
}
