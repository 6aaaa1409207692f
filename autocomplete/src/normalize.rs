//! Canonical forms for dictionary entries and typed input.
//!
//! Every string that reaches a matcher, whether it comes from a dictionary
//! file or from the keyboard, goes through this module first so that both
//! sides compare like with like.
use itertools::Itertools;
use smol_str::SmolStr;

/// Longest run of one repeated character kept in a canonical form.
///
/// Longer runs ("greaaat") are typing noise; runs of two are kept since
/// doubled letters are ordinary orthography.
pub const MAX_REPEATED_CHARS: usize = 2;

/// Lower-cases each character independently of its neighbours or locale.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Reduces every run of identical characters to at most [`MAX_REPEATED_CHARS`].
pub fn collapse_repeats(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut last = None;
    let mut run = 0;

    for ch in word.chars() {
        if last == Some(ch) {
            run += 1;
        } else {
            last = Some(ch);
            run = 1;
        }

        if run <= MAX_REPEATED_CHARS {
            out.push(ch);
        }
    }

    out
}

/// Lower-case, collapse repeats and rejoin on single spaces.
///
/// Returns `None` when the input holds no words, or holds several and
/// phrases are not allowed.
fn canonicalize(raw: &str, is_phrase_allowed: bool) -> Option<String> {
    let lowered = lower_case(raw);
    let words = lowered
        .split_whitespace()
        .map(collapse_repeats)
        .collect::<Vec<_>>();

    match words.len() {
        0 => None,
        1 => words.into_iter().next(),
        _ if is_phrase_allowed => Some(words.into_iter().join(" ")),
        _ => None,
    }
}

/// Canonical key for a dictionary entry.
///
/// The empty string means "reject, do not index": it is returned for empty
/// or whitespace-only input, for multi-word input when `is_phrase_allowed`
/// is false, and for anything one character long or shorter after
/// canonicalization.
pub fn normalize(raw: &str, is_phrase_allowed: bool) -> SmolStr {
    match canonicalize(raw, is_phrase_allowed) {
        Some(key) if key.chars().count() > 1 => SmolStr::from(key),
        _ => SmolStr::default(),
    }
}

/// Canonical form of typed input.
///
/// Same as [`normalize`] with phrases allowed, except that a single
/// character survives: the first key press is a legitimate query.
pub fn normalize_query(raw: &str) -> SmolStr {
    canonicalize(raw, true)
        .map(SmolStr::from)
        .unwrap_or_default()
}
