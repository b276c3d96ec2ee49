//! Edit-distance and alignment algorithms
//!
//! Each algorithm is implemented as standalone functions over slices for
//! composability, plus a configured metric type implementing [`Metric`].
//! Metric types are immutable after construction and can be shared freely
//! across threads.

pub mod damerau;
pub mod gotoh;
pub mod grid;
pub mod hamming;
pub mod jaro;
pub mod levenshtein;
pub mod mlipns;
pub mod needleman_wunsch;
pub mod phonetic;
pub mod sequence;
pub mod smith_waterman;
pub mod strcmp95;

pub use damerau::{DamerauLevenshtein, DamerauVariant};
pub use gotoh::Gotoh;
pub use hamming::Hamming;
pub use jaro::{Jaro, JaroWinkler};
pub use levenshtein::Levenshtein;
pub use mlipns::Mlipns;
pub use needleman_wunsch::NeedlemanWunsch;
pub use phonetic::Editex;
pub use sequence::{prepare, Qval, Sequence};
pub use smith_waterman::SmithWaterman;
pub use strcmp95::StrCmp95;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Whether a metric's native score grows with difference or with likeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// 0 means identical, larger means more different
    Distance,
    /// `maximum` means identical, smaller means less similar
    Similarity,
}

/// Common interface of every metric.
///
/// Implementors provide the native [`score`](Metric::score), its orientation
/// and cheap bounds; the remaining operations are derived:
///
/// - `distance = maximum - similarity` for similarity metrics
/// - `similarity = maximum - distance` for distance metrics
/// - `normalized_distance = distance / (maximum - minimum)`, clamped to [0, 1]
/// - `normalized_similarity = 1 - normalized_distance`
///
/// When `maximum - minimum` is not positive (both inputs empty) the inputs
/// are considered identical: normalized distance 0, normalized similarity 1.
pub trait Metric: Send + Sync {
    /// Orientation of [`score`](Metric::score)
    fn kind(&self) -> ScoreKind;

    /// Native score of the algorithm
    fn score(&self, a: &str, b: &str) -> f64;

    /// Best possible similarity (or worst possible distance) for these inputs.
    /// Must not run the full algorithm.
    fn maximum(&self, a: &str, b: &str) -> f64;

    /// Lowest score the metric can produce for these inputs.
    ///
    /// Zero for everything except global alignments, whose scores go
    /// negative when one sequence has to be padded with gaps.
    fn minimum(&self, _a: &str, _b: &str) -> f64 {
        0.0
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;

    fn distance(&self, a: &str, b: &str) -> f64 {
        match self.kind() {
            ScoreKind::Distance => self.score(a, b),
            ScoreKind::Similarity => self.maximum(a, b) - self.score(a, b),
        }
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self.kind() {
            ScoreKind::Distance => self.maximum(a, b) - self.score(a, b),
            ScoreKind::Similarity => self.score(a, b),
        }
    }

    fn normalized_distance(&self, a: &str, b: &str) -> f64 {
        let range = self.maximum(a, b) - self.minimum(a, b);
        if range <= 0.0 {
            return 0.0;
        }
        (self.distance(a, b) / range).clamp(0.0, 1.0)
    }

    fn normalized_similarity(&self, a: &str, b: &str) -> f64 {
        1.0 - self.normalized_distance(a, b)
    }
}

impl<M: Metric + ?Sized> Metric for Box<M> {
    fn kind(&self) -> ScoreKind {
        (**self).kind()
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        (**self).score(a, b)
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        (**self).maximum(a, b)
    }

    fn minimum(&self, a: &str, b: &str) -> f64 {
        (**self).minimum(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<M: Metric + ?Sized> Metric for Arc<M> {
    fn kind(&self) -> ScoreKind {
        (**self).kind()
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        (**self).score(a, b)
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        (**self).maximum(a, b)
    }

    fn minimum(&self, a: &str, b: &str) -> f64 {
        (**self).minimum(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Element equality predicate used in place of `==`.
///
/// Must be side-effect free: metrics call it from any thread.
#[derive(Clone)]
pub struct Comparator(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>);

impl Comparator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Elements are equal when their lowercase forms are equal
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self::new(|a, b| a == b || a.to_lowercase() == b.to_lowercase())
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, a: &str, b: &str) -> bool {
        (self.0)(a, b)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// Resolve an optional comparator into a plain predicate.
#[inline]
pub(crate) fn element_eq<'c>(comparator: Option<&'c Comparator>) -> impl Fn(&&str, &&str) -> bool + 'c {
    move |a: &&str, b: &&str| match comparator {
        Some(cmp) => cmp.matches(a, b),
        None => a == b,
    }
}

/// Element similarity used by the alignment metrics.
///
/// Defaults to identity: 1.0 for equal elements, 0.0 otherwise.
#[derive(Clone)]
pub struct SimilarityFn(Arc<dyn Fn(&str, &str) -> f64 + Send + Sync>);

impl SimilarityFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::substitution(1.0, 0.0)
    }

    /// Flat substitution scores, e.g. `substitution(1.0, -1.0)`
    #[must_use]
    pub fn substitution(match_score: f64, mismatch_score: f64) -> Self {
        Self::new(move |a, b| if a == b { match_score } else { mismatch_score })
    }

    /// Score elements with another metric's normalized similarity.
    ///
    /// This lets a token-level aligner compare words with a character-level
    /// edit metric.
    ///
    /// ```
    /// use seqdist::algorithms::{Levenshtein, Metric, NeedlemanWunsch, Qval, SimilarityFn};
    ///
    /// let nw = NeedlemanWunsch::new()
    ///     .with_qval(Qval::Words)
    ///     .with_sim_func(SimilarityFn::from_metric(Levenshtein::new()));
    /// assert!(nw.similarity("jon smith", "john smith") > 1.5);
    /// ```
    pub fn from_metric<M: Metric + 'static>(metric: M) -> Self {
        Self::new(move |a, b| metric.normalized_similarity(a, b))
    }

    #[inline]
    #[must_use]
    pub fn score(&self, a: &str, b: &str) -> f64 {
        (self.0)(a, b)
    }
}

impl Default for SimilarityFn {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for SimilarityFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SimilarityFn(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        kind: ScoreKind,
        score: f64,
        max: f64,
        min: f64,
    }

    impl Metric for Fixed {
        fn kind(&self) -> ScoreKind {
            self.kind
        }
        fn score(&self, _a: &str, _b: &str) -> f64 {
            self.score
        }
        fn maximum(&self, _a: &str, _b: &str) -> f64 {
            self.max
        }
        fn minimum(&self, _a: &str, _b: &str) -> f64 {
            self.min
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_distance_orientation() {
        let m = Fixed { kind: ScoreKind::Distance, score: 2.0, max: 8.0, min: 0.0 };
        assert_eq!(m.distance("", ""), 2.0);
        assert_eq!(m.similarity("", ""), 6.0);
        assert_eq!(m.normalized_distance("", ""), 0.25);
        assert_eq!(m.normalized_similarity("", ""), 0.75);
    }

    #[test]
    fn test_similarity_orientation_with_minimum() {
        let m = Fixed { kind: ScoreKind::Similarity, score: 0.0, max: 2.0, min: -2.0 };
        assert_eq!(m.distance("", ""), 2.0);
        assert_eq!(m.normalized_distance("", ""), 0.5);
        assert_eq!(m.normalized_similarity("", ""), 0.5);
    }

    #[test]
    fn test_zero_range_is_identical() {
        let m = Fixed { kind: ScoreKind::Distance, score: 0.0, max: 0.0, min: 0.0 };
        assert_eq!(m.normalized_distance("", ""), 0.0);
        assert_eq!(m.normalized_similarity("", ""), 1.0);
    }

    #[test]
    fn test_normalized_is_clamped() {
        let m = Fixed { kind: ScoreKind::Similarity, score: 5.0, max: 1.0, min: 0.0 };
        assert_eq!(m.normalized_similarity("", ""), 1.0);
        let m = Fixed { kind: ScoreKind::Similarity, score: -5.0, max: 1.0, min: 0.0 };
        assert_eq!(m.normalized_distance("", ""), 1.0);
    }

    #[test]
    fn test_comparator() {
        let cmp = Comparator::case_insensitive();
        assert!(cmp.matches("A", "a"));
        assert!(!cmp.matches("A", "b"));
        let eq = element_eq(Some(&cmp));
        assert!(eq(&"X", &"x"));
        let eq = element_eq(None);
        assert!(!eq(&"X", &"x"));
    }

    #[test]
    fn test_similarity_fn() {
        assert_eq!(SimilarityFn::default().score("a", "a"), 1.0);
        assert_eq!(SimilarityFn::default().score("a", "b"), 0.0);
        let sub = SimilarityFn::substitution(2.0, -1.0);
        assert_eq!(sub.score("a", "b"), -1.0);
    }

    #[test]
    fn test_boxed_metric_delegates() {
        let boxed: Box<dyn Metric> = Box::new(Fixed {
            kind: ScoreKind::Distance,
            score: 1.0,
            max: 4.0,
            min: 0.0,
        });
        assert_eq!(boxed.name(), "fixed");
        assert_eq!(boxed.normalized_distance("", ""), 0.25);
    }
}
