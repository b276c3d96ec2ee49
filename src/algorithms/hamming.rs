//! Hamming distance implementation
//!
//! Counts positions where corresponding elements differ.
//!
//! # Length Mismatch Behavior
//!
//! Sequences of different lengths are compared position-wise up to the
//! longest one; positions missing from a shorter sequence count as
//! mismatches. With `truncate` enabled comparison stops at the shortest
//! sequence instead, so trailing elements are ignored.
//!
//! # Complexity
//! - Time: O(n) where n is the longest sequence length
//! - Space: O(n) for prepared sequences

use super::sequence::{prepare, Qval, Sequence};
use super::{element_eq, Comparator, Metric, ScoreKind};
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};

/// Serializable parameters of [`Hamming`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HammingConfig {
    /// Element granularity
    pub qval: Qval,
    /// Stop at the shortest sequence instead of padding
    pub truncate: bool,
}

/// Hamming distance calculator
///
/// Works on two or more sequences. Through [`Metric`] it compares two
/// strings; [`Hamming::distance_many`] takes any number.
#[derive(Debug, Clone, Default)]
pub struct Hamming {
    pub qval: Qval,
    pub truncate: bool,
    pub comparator: Option<Comparator>,
}

impl Hamming {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: HammingConfig) -> Result<Self> {
        Ok(Self {
            qval: config.qval.validate()?,
            truncate: config.truncate,
            comparator: None,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> HammingConfig {
        HammingConfig {
            qval: self.qval,
            truncate: self.truncate,
        }
    }

    #[must_use]
    pub fn with_qval(mut self, qval: Qval) -> Self {
        self.qval = qval;
        self
    }

    #[must_use]
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    #[must_use]
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Mismatch count across all `sequences` aligned position-wise.
    ///
    /// # Errors
    /// Returns `NotEnoughSequences` when `sequences` is empty.
    pub fn distance_many(&self, sequences: &[&str]) -> Result<usize> {
        if sequences.is_empty() {
            return Err(MetricError::NotEnoughSequences { required: 1, got: 0 });
        }
        let prepared: Vec<Sequence<'_>> = sequences.iter().map(|s| prepare(s, self.qval)).collect();
        let slices: Vec<&[&str]> = prepared.iter().map(|s| s.as_slice()).collect();
        Ok(hamming_by(&slices, self.truncate, element_eq(self.comparator.as_ref())))
    }

    /// Longest prepared length among `sequences`.
    #[must_use]
    pub fn maximum_many(&self, sequences: &[&str]) -> usize {
        sequences
            .iter()
            .map(|s| prepare(s, self.qval).len())
            .max()
            .unwrap_or(0)
    }
}

impl Metric for Hamming {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Distance
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a = prepare(a, self.qval);
        let b = prepare(b, self.qval);
        hamming_by(&[a.as_slice(), b.as_slice()], self.truncate, element_eq(self.comparator.as_ref())) as f64
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        self.maximum_many(&[a, b]) as f64
    }

    fn name(&self) -> &'static str {
        "hamming"
    }
}

/// Count positions at which the sequences are not all equal to the first.
///
/// Positions past the end of any sequence count as mismatches unless
/// `truncate` is set, in which case only the common prefix length is
/// examined.
pub fn hamming_by<T, F>(sequences: &[&[T]], truncate: bool, eq: F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    let Some((first, rest)) = sequences.split_first() else {
        return 0;
    };

    let lengths = sequences.iter().map(|s| s.len());
    let len = if truncate {
        lengths.min().unwrap_or(0)
    } else {
        lengths.max().unwrap_or(0)
    };

    (0..len)
        .filter(|&i| match first.get(i) {
            None => true,
            Some(x) => rest
                .iter()
                .any(|s| s.get(i).map_or(true, |y| !eq(x, y))),
        })
        .count()
}

/// Padded Hamming distance between two strings, character by character.
#[must_use]
pub fn hamming_distance(a: &str, b: &str) -> usize {
    let a: Sequence<'_> = prepare(a, Qval::Chars);
    let b: Sequence<'_> = prepare(b, Qval::Chars);
    hamming_by(&[a.as_slice(), b.as_slice()], false, |x, y| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_basic() {
        assert_eq!(hamming_distance("", ""), 0);
        assert_eq!(hamming_distance("abc", "abc"), 0);
        assert_eq!(hamming_distance("test", "text"), 1);
        assert_eq!(hamming_distance("karolin", "kathrin"), 3);
    }

    #[test]
    fn test_hamming_different_lengths() {
        assert_eq!(hamming_distance("abc", "ab"), 1);
        assert_eq!(hamming_distance("", "abc"), 3);

        let truncating = Hamming::new().with_truncate(true);
        assert_eq!(truncating.distance("abc", "ab"), 0.0);
        assert_eq!(truncating.distance("abcd", "xbc"), 1.0);
    }

    #[test]
    fn test_hamming_many() {
        let h = Hamming::new();
        assert_eq!(h.distance_many(&["test", "text", "tent"]), Ok(1));
        assert_eq!(h.distance_many(&["test", "text", "tesx"]), Ok(2));
        assert_eq!(h.distance_many(&["abc"]), Ok(0));
        assert!(matches!(
            h.distance_many(&[]),
            Err(MetricError::NotEnoughSequences { .. })
        ));
    }

    #[test]
    fn test_hamming_contract() {
        let h = Hamming::new();
        assert_eq!(h.maximum("test", "texts"), 5.0);
        assert_eq!(h.similarity("test", "text"), 3.0);
        assert_eq!(h.normalized_distance("test", "text"), 0.25);
        assert_eq!(h.normalized_similarity("", ""), 1.0);
    }

    #[test]
    fn test_hamming_comparator() {
        let h = Hamming::new().with_comparator(Comparator::case_insensitive());
        assert_eq!(h.distance("TeSt", "test"), 0.0);
    }

    #[test]
    fn test_hamming_qgrams() {
        let h = Hamming::new().with_qval(Qval::Grams(2));
        // te es st vs te ex xt
        assert_eq!(h.distance("test", "text"), 2.0);
    }

    #[test]
    fn test_from_config_rejects_zero_qgram() {
        let config = HammingConfig {
            qval: Qval::Grams(0),
            truncate: false,
        };
        assert!(Hamming::from_config(config).is_err());
    }
}
