//! Needleman-Wunsch global alignment
//!
//! Maximizes the total score of an end-to-end alignment where aligned
//! element pairs score `sim_func(a, b)` and every gap element costs
//! `gap_cost`.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(n) using two rolling rows (the score only, no traceback)

use super::sequence::{prepare, Qval, Sequence};
use super::{Metric, ScoreKind, SimilarityFn};
use crate::error::{check_cost, MetricError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Serializable parameters shared by the linear-gap aligners.
///
/// The element similarity is expressed as a flat substitution score;
/// arbitrary similarity functions are attached with `with_sim_func`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Cost of one gap element (default 1.0)
    pub gap_cost: f64,
    /// Score of aligning equal elements (default 1.0)
    pub match_score: f64,
    /// Score of aligning different elements (default 0.0)
    pub mismatch_score: f64,
    /// Element granularity
    pub qval: Qval,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            gap_cost: 1.0,
            match_score: 1.0,
            mismatch_score: 0.0,
            qval: Qval::Chars,
        }
    }
}

impl AlignmentConfig {
    pub(crate) fn validate(self) -> Result<Self> {
        check_cost("gap_cost", self.gap_cost)?;
        for (name, score) in [("match_score", self.match_score), ("mismatch_score", self.mismatch_score)] {
            if !score.is_finite() {
                return Err(MetricError::invalid(name, format!("must be a finite number, got {}", score)));
            }
        }
        self.qval.validate()?;
        Ok(self)
    }
}

/// Needleman-Wunsch similarity calculator
#[derive(Debug, Clone)]
pub struct NeedlemanWunsch {
    pub gap_cost: f64,
    pub sim_func: SimilarityFn,
    pub qval: Qval,
}

impl Default for NeedlemanWunsch {
    fn default() -> Self {
        Self {
            gap_cost: 1.0,
            sim_func: SimilarityFn::identity(),
            qval: Qval::Chars,
        }
    }
}

impl NeedlemanWunsch {
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

impl Metric for NeedlemanWunsch {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        needleman_wunsch_by(&a, &b, self.gap_cost, |x, y| self.sim_func.score(x, y))
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        prepare(a, self.qval).len().min(prepare(b, self.qval).len()) as f64
    }

    fn minimum(&self, a: &str, b: &str) -> f64 {
        let len_a = prepare(a, self.qval).len();
        let len_b = prepare(b, self.qval).len();
        -self.gap_cost * len_a.abs_diff(len_b) as f64
    }

    fn name(&self) -> &'static str {
        "needleman_wunsch"
    }
}

/// Global alignment score of two element slices.
///
/// `M[i][0] = -i*gap`, `M[0][j] = -j*gap`,
/// `M[i][j] = max(M[i-1][j-1] + sim, M[i-1][j] - gap, M[i][j-1] - gap)`.
pub fn needleman_wunsch_by<T, S>(a: &[T], b: &[T], gap_cost: f64, sim: S) -> f64
where
    S: Fn(&T, &T) -> f64,
{
    let n = b.len();

    let mut prev: SmallVec<[f64; 64]> = (0..=n).map(|j| -(j as f64) * gap_cost).collect();
    let mut curr: SmallVec<[f64; 64]> = SmallVec::with_capacity(n + 1);

    for (i, x) in a.iter().enumerate() {
        curr.clear();
        curr.push(-((i + 1) as f64) * gap_cost);

        for (j, y) in b.iter().enumerate() {
            let matched = prev[j] + sim(x, y);
            let deleted = prev[j + 1] - gap_cost;
            let inserted = curr[j] - gap_cost;
            curr.push(matched.max(deleted).max(inserted));
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_nw_identity() {
        let nw = NeedlemanWunsch::new();
        assert!(approx_eq(nw.similarity("GATTACA", "GCATGCU"), 3.0));
        assert!(approx_eq(nw.similarity("test", "text"), 3.0));
        assert!(approx_eq(nw.similarity("a", "bbbb"), -3.0));
        assert!(approx_eq(nw.similarity("ab", "abbb"), 0.0));
        assert!(approx_eq(nw.similarity("abc", ""), -3.0));
        assert!(approx_eq(nw.similarity("spam", "qwer"), 0.0));
        assert!(approx_eq(nw.similarity("", ""), 0.0));
    }

    #[test]
    fn test_nw_textbook_scoring() {
        let nw = NeedlemanWunsch::new().with_sim_func(SimilarityFn::substitution(1.0, -1.0));
        assert!(approx_eq(nw.similarity("GATTACA", "GCATGCU"), 0.0));
    }

    #[test]
    fn test_nw_bounds() {
        let nw = NeedlemanWunsch::new();
        assert_eq!(nw.maximum("GATTACA", "GCATGCU"), 7.0);
        assert_eq!(nw.minimum("a", "bbbb"), -3.0);
        assert!(approx_eq(nw.normalized_distance("a", "bbbb"), 1.0));
        assert!(approx_eq(nw.normalized_similarity("test", "test"), 1.0));
        assert!(approx_eq(nw.normalized_similarity("", ""), 1.0));
    }

    #[test]
    fn test_nw_gap_cost() {
        let nw = NeedlemanWunsch::new().with_gap_cost(0.5);
        assert!(approx_eq(nw.similarity("abc", ""), -1.5));
    }

    #[test]
    fn test_from_config() {
        let config = AlignmentConfig {
            match_score: 1.0,
            mismatch_score: -1.0,
            ..AlignmentConfig::default()
        };
        let nw = NeedlemanWunsch::from_config(config).map(|nw| nw.similarity("GATTACA", "GCATGCU"));
        assert_eq!(nw, Ok(0.0));

        let bad = AlignmentConfig {
            gap_cost: -1.0,
            ..AlignmentConfig::default()
        };
        assert!(NeedlemanWunsch::from_config(bad).is_err());
    }
}
