//! Smith-Waterman local alignment
//!
//! Same recurrence as Needleman-Wunsch, but every cell is floored at zero
//! and the result is the best cell anywhere in the matrix: the score of the
//! best-matching pair of substrings.

use super::needleman_wunsch::AlignmentConfig;
use super::sequence::{prepare, Qval, Sequence};
use super::{Metric, ScoreKind, SimilarityFn};
use crate::error::Result;
use smallvec::{smallvec, SmallVec};

/// Smith-Waterman similarity calculator
#[derive(Debug, Clone)]
pub struct SmithWaterman {
    pub gap_cost: f64,
    pub sim_func: SimilarityFn,
    pub qval: Qval,
}

impl Default for SmithWaterman {
    fn default() -> Self {
        Self {
            gap_cost: 1.0,
            sim_func: SimilarityFn::identity(),
            qval: Qval::Chars,
        }
    }
}

impl SmithWaterman {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: AlignmentConfig) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            gap_cost: config.gap_cost,
            sim_func: SimilarityFn::substitution(config.match_score, config.mismatch_score),
            qval: config.qval,
        })
    }

    #[must_use]
    pub fn with_gap_cost(mut self, gap_cost: f64) -> Self {
        self.gap_cost = gap_cost;
        self
    }

    #[must_use]
    pub fn with_sim_func(mut self, sim_func: SimilarityFn) -> Self {
        self.sim_func = sim_func;
        self
    }

    #[must_use]
    pub fn with_qval(mut self, qval: Qval) -> Self {
        self.qval = qval;
        self
    }
}

impl Metric for SmithWaterman {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        smith_waterman_by(&a, &b, self.gap_cost, |x, y| self.sim_func.score(x, y))
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        prepare(a, self.qval).len().min(prepare(b, self.qval).len()) as f64
    }

    fn name(&self) -> &'static str {
        "smith_waterman"
    }
}

/// Best local alignment score of two element slices.
pub fn smith_waterman_by<T, S>(a: &[T], b: &[T], gap_cost: f64, sim: S) -> f64
where
    S: Fn(&T, &T) -> f64,
{
    let n = b.len();

    let mut prev: SmallVec<[f64; 64]> = smallvec![0.0; n + 1];
    let mut curr: SmallVec<[f64; 64]> = smallvec![0.0; n + 1];
    let mut best = 0.0f64;

    for x in a {
        curr[0] = 0.0;

        for (j, y) in b.iter().enumerate() {
            let matched = prev[j] + sim(x, y);
            let deleted = prev[j + 1] - gap_cost;
            let inserted = curr[j] - gap_cost;
            let cell = matched.max(deleted).max(inserted).max(0.0);
            curr[j + 1] = cell;
            best = best.max(cell);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sw_identity() {
        let sw = SmithWaterman::new();
        assert!(approx_eq(sw.similarity("GATTACA", "GCATGCU"), 3.0));
        assert!(approx_eq(sw.similarity("hello world", "yellow"), 4.0));
        assert!(approx_eq(sw.similarity("abcxyz", "xyzabc"), 3.0));
        assert!(approx_eq(sw.similarity("TGTTACGG", "GGTTGACTA"), 4.0));
        assert!(approx_eq(sw.similarity("spam", "qwer"), 0.0));
    }

    #[test]
    fn test_sw_substitution_matrix() {
        let sw = SmithWaterman::new()
            .with_sim_func(SimilarityFn::substitution(3.0, -3.0))
            .with_gap_cost(2.0);
        assert!(approx_eq(sw.similarity("TGTTACGG", "GGTTGACTA"), 13.0));
    }

    #[test]
    fn test_sw_is_local() {
        // The best cell is not the bottom-right one
        let sw = SmithWaterman::new();
        assert!(approx_eq(sw.similarity("xxabcxx", "abc"), 3.0));
    }

    #[test]
    fn test_sw_contract() {
        let sw = SmithWaterman::new();
        assert_eq!(sw.minimum("abc", ""), 0.0);
        assert_eq!(sw.maximum("abc", "abcd"), 3.0);
        assert!(approx_eq(sw.normalized_similarity("abc", "abc"), 1.0));
        assert!(approx_eq(sw.normalized_similarity("", ""), 1.0));
        assert!(approx_eq(sw.normalized_distance("spam", "qwer"), 1.0));
    }
}
