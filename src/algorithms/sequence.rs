//! Sequence preparation
//!
//! Splits raw input into the ordered elements every metric compares.
//! Elements are borrowed `&str` slices of the input, so a character, a
//! grapheme cluster, a q-gram and a word all share one representation and
//! one comparator signature.
//!
//! # Q-gram Size
//!
//! - `Qval::Grams(0)` is invalid and rejected by [`Qval::validate`]
//! - `Qval::Grams(1)` behaves exactly like `Qval::Chars`
//! - Input shorter than `q` characters yields an empty sequence
//! - There is no upper bound on `q`

use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

/// A prepared sequence: borrowed elements of the raw input.
pub type Sequence<'a> = SmallVec<[&'a str; 64]>;

/// How raw input is split into comparable elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qval {
    /// Whitespace-separated words
    Words,
    /// One element per Unicode scalar value
    #[default]
    Chars,
    /// One element per extended grapheme cluster
    Graphemes,
    /// Overlapping windows of `q` characters
    Grams(usize),
}

impl Qval {
    /// Check that the q-gram size is usable.
    pub fn validate(self) -> Result<Self> {
        match self {
            Qval::Grams(0) => Err(MetricError::invalid("qval", "q-gram size must be at least 1")),
            other => Ok(other),
        }
    }

    /// Split `raw` into elements.
    #[must_use]
    pub fn prepare(self, raw: &str) -> Sequence<'_> {
        prepare(raw, self)
    }
}

/// Split `raw` into the elements selected by `qval`.
///
/// # Examples
/// ```
/// use seqdist::algorithms::sequence::{prepare, Qval};
///
/// assert_eq!(prepare("abc", Qval::Chars).as_slice(), &["a", "b", "c"]);
/// assert_eq!(prepare("abcd", Qval::Grams(2)).as_slice(), &["ab", "bc", "cd"]);
/// assert_eq!(prepare("hello  big world", Qval::Words).as_slice(), &["hello", "big", "world"]);
/// assert!(prepare("ab", Qval::Grams(3)).is_empty());
/// ```
#[must_use]
pub fn prepare(raw: &str, qval: Qval) -> Sequence<'_> {
    match qval {
        Qval::Words => raw.split_whitespace().collect(),
        Qval::Chars | Qval::Grams(1) => chars(raw),
        Qval::Graphemes => raw.graphemes(true).collect(),
        Qval::Grams(0) => SmallVec::new(),
        Qval::Grams(q) => qgrams(raw, q),
    }
}

fn chars(raw: &str) -> Sequence<'_> {
    raw.char_indices()
        .map(|(i, c)| &raw[i..i + c.len_utf8()])
        .collect()
}

fn qgrams(raw: &str, q: usize) -> Sequence<'_> {
    // Char boundaries including the end of the string
    let bounds: SmallVec<[usize; 64]> = raw
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(raw.len()))
        .collect();
    let char_count = bounds.len() - 1;

    if char_count < q {
        return SmallVec::new();
    }

    (0..=char_count - q)
        .map(|start| &raw[bounds[start]..bounds[start + q]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars() {
        assert_eq!(prepare("", Qval::Chars).len(), 0);
        assert_eq!(prepare("café", Qval::Chars).as_slice(), &["c", "a", "f", "é"]);
    }

    #[test]
    fn test_qgrams() {
        assert_eq!(prepare("test", Qval::Grams(2)).as_slice(), &["te", "es", "st"]);
        assert_eq!(prepare("test", Qval::Grams(4)).as_slice(), &["test"]);
        assert!(prepare("tes", Qval::Grams(4)).is_empty());
        assert_eq!(prepare("日本語", Qval::Grams(2)).as_slice(), &["日本", "本語"]);
    }

    #[test]
    fn test_single_gram_is_chars() {
        assert_eq!(prepare("abc", Qval::Grams(1)), prepare("abc", Qval::Chars));
    }

    #[test]
    fn test_graphemes() {
        // 👨‍👩‍👧 is several code points but one grapheme cluster
        let family = "👨\u{200d}👩\u{200d}👧";
        assert_eq!(prepare(family, Qval::Graphemes).len(), 1);
        assert!(prepare(family, Qval::Chars).len() > 1);
    }

    #[test]
    fn test_validate() {
        assert!(Qval::Grams(0).validate().is_err());
        assert_eq!(Qval::Grams(100).validate(), Ok(Qval::Grams(100)));
        assert_eq!(Qval::Grams(3).validate(), Ok(Qval::Grams(3)));
        assert_eq!(Qval::Words.validate(), Ok(Qval::Words));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Qval::Chars).unwrap(), "\"chars\"");
        let q: Qval = serde_json::from_str("{\"grams\":2}").unwrap();
        assert_eq!(q, Qval::Grams(2));
    }
}
