//! Gotoh affine-gap global alignment
//!
//! Needleman-Wunsch with affine gap costs: a gap of length `k` costs
//! `gap_open + (k - 1) * gap_ext`. Three score tables are kept:
//!
//! - `D`: alignment ends with an aligned pair
//! - `P`: alignment ends inside a gap in `b` (elements of `a` deleted)
//! - `Q`: alignment ends inside a gap in `a` (elements of `b` inserted)
//!
//! Unreachable states are `None` rather than a negative-infinity sentinel.

use super::sequence::{prepare, Qval, Sequence};
use super::{Metric, ScoreKind, SimilarityFn};
use crate::error::{check_cost, MetricError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Serializable parameters of [`Gotoh`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GotohConfig {
    /// Cost of the first element of a gap (default 1.0)
    pub gap_open: f64,
    /// Cost of every further element of a gap (default 0.4)
    pub gap_ext: f64,
    /// Score of aligning equal elements (default 1.0)
    pub match_score: f64,
    /// Score of aligning different elements (default 0.0)
    pub mismatch_score: f64,
    /// Element granularity
    pub qval: Qval,
}

impl Default for GotohConfig {
    fn default() -> Self {
        Self {
            gap_open: 1.0,
            gap_ext: 0.4,
            match_score: 1.0,
            mismatch_score: 0.0,
            qval: Qval::Chars,
        }
    }
}

/// Gotoh similarity calculator
#[derive(Debug, Clone)]
pub struct Gotoh {
    pub gap_open: f64,
    pub gap_ext: f64,
    pub sim_func: SimilarityFn,
    pub qval: Qval,
}

impl Default for Gotoh {
    fn default() -> Self {
        Self {
            gap_open: 1.0,
            gap_ext: 0.4,
            sim_func: SimilarityFn::identity(),
            qval: Qval::Chars,
        }
    }
}

impl Gotoh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: GotohConfig) -> Result<Self> {
        let gap_open = check_cost("gap_open", config.gap_open)?;
        let gap_ext = check_cost("gap_ext", config.gap_ext)?;
        for (name, score) in [("match_score", config.match_score), ("mismatch_score", config.mismatch_score)] {
            if !score.is_finite() {
                return Err(MetricError::invalid(name, format!("must be a finite number, got {}", score)));
            }
        }
        Ok(Self {
            gap_open,
            gap_ext,
            sim_func: SimilarityFn::substitution(config.match_score, config.mismatch_score),
            qval: config.qval.validate()?,
        })
    }

    #[must_use]
    pub fn with_gap_open(mut self, gap_open: f64) -> Self {
        self.gap_open = gap_open;
        self
    }

    #[must_use]
    pub fn with_gap_ext(mut self, gap_ext: f64) -> Self {
        self.gap_ext = gap_ext;
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

    fn gap(&self, len: usize) -> f64 {
        if len == 0 {
            0.0
        } else {
            -(self.gap_open + (len - 1) as f64 * self.gap_ext)
        }
    }
}

impl Metric for Gotoh {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        gotoh_by(&a, &b, self.gap_open, self.gap_ext, |x, y| self.sim_func.score(x, y))
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        prepare(a, self.qval).len().min(prepare(b, self.qval).len()) as f64
    }

    fn minimum(&self, a: &str, b: &str) -> f64 {
        let len_a = prepare(a, self.qval).len();
        let len_b = prepare(b, self.qval).len();
        self.gap(len_a.abs_diff(len_b))
    }

    fn name(&self) -> &'static str {
        "gotoh"
    }
}

#[inline]
fn best(x: Option<f64>, y: Option<f64>) -> Option<f64> {
    match (x, y) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

type Row = SmallVec<[Option<f64>; 64]>;

/// Affine-gap global alignment score of two element slices.
///
/// Boundaries: `D[0][0] = 0`, `P[i][0] = -(open + (i-1)*ext)`,
/// `Q[0][j] = -(open + (j-1)*ext)`, every other border cell unreachable.
/// Two rolling rows per table.
pub fn gotoh_by<T, S>(a: &[T], b: &[T], gap_open: f64, gap_ext: f64, sim: S) -> f64
where
    S: Fn(&T, &T) -> f64,
{
    let n = b.len();
    let gap = |len: usize| -(gap_open + (len - 1) as f64 * gap_ext);

    let mut d_prev: Row = std::iter::once(Some(0.0)).chain((1..=n).map(|_| None)).collect();
    let mut p_prev: Row = (0..=n).map(|_| None).collect();
    let mut q_prev: Row = std::iter::once(None).chain((1..=n).map(|j| Some(gap(j)))).collect();

    let mut d_curr: Row = SmallVec::with_capacity(n + 1);
    let mut p_curr: Row = SmallVec::with_capacity(n + 1);
    let mut q_curr: Row = SmallVec::with_capacity(n + 1);

    for (i, x) in a.iter().enumerate() {
        d_curr.clear();
        p_curr.clear();
        q_curr.clear();
        d_curr.push(None);
        p_curr.push(Some(gap(i + 1)));
        q_curr.push(None);

        for (j, y) in b.iter().enumerate() {
            let diagonal = best(best(d_prev[j], p_prev[j]), q_prev[j]);
            d_curr.push(diagonal.map(|s| s + sim(x, y)));
            p_curr.push(best(
                d_prev[j + 1].map(|s| s - gap_open),
                p_prev[j + 1].map(|s| s - gap_ext),
            ));
            q_curr.push(best(
                d_curr[j].map(|s| s - gap_open),
                q_curr[j].map(|s| s - gap_ext),
            ));
        }

        std::mem::swap(&mut d_prev, &mut d_curr);
        std::mem::swap(&mut p_prev, &mut p_curr);
        std::mem::swap(&mut q_prev, &mut q_curr);
    }

    // D[0][0] = 0 keeps the corner reachable for empty inputs
    best(best(d_prev[n], p_prev[n]), q_prev[n]).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_gotoh_defaults() {
        let g = Gotoh::new();
        assert!(approx_eq(g.similarity("GATTACA", "GCATGCU"), 3.0));
        assert!(approx_eq(g.similarity("test", "text"), 3.0));
        assert!(approx_eq(g.similarity("GATTACA", "GATTACA"), 7.0));
        assert!(approx_eq(g.similarity("spam", "qwer"), 0.0));
    }

    #[test]
    fn test_gotoh_affine_gaps() {
        let g = Gotoh::new();
        // One gap of three: -(1.0 + 2 * 0.4)
        assert!(approx_eq(g.similarity("abc", "abcdef"), 1.2));
        assert!(approx_eq(g.similarity("abcdef", "abc"), 1.2));
        assert!(approx_eq(g.similarity("", "abc"), -1.8));
        assert!(approx_eq(g.similarity("abc", ""), -1.8));
        assert!(approx_eq(g.similarity("", ""), 0.0));
    }

    #[test]
    fn test_gotoh_substitution_matrix() {
        let g = Gotoh::new()
            .with_gap_ext(0.5)
            .with_sim_func(SimilarityFn::substitution(1.0, -1.0));
        assert!(approx_eq(g.similarity("GATTACA", "GCATGCU"), 0.0));
        assert!(approx_eq(g.similarity("TGTTACGG", "GGTTGACTA"), 1.0));
    }

    #[test]
    fn test_gotoh_bounds() {
        let g = Gotoh::new();
        assert!(approx_eq(g.minimum("", "abc"), -1.8));
        assert_eq!(g.minimum("abc", "abc"), 0.0);
        assert_eq!(g.maximum("abc", "abcdef"), 3.0);
        assert!(approx_eq(g.normalized_distance("", "abc"), 1.0));
        assert!(approx_eq(g.normalized_similarity("GATTACA", "GATTACA"), 1.0));
    }

    #[test]
    fn test_from_config_validates_costs() {
        let bad = GotohConfig {
            gap_ext: f64::NAN,
            ..GotohConfig::default()
        };
        assert!(matches!(
            Gotoh::from_config(bad),
            Err(MetricError::InvalidParameter { name: "gap_ext", .. })
        ));
        assert!(Gotoh::from_config(GotohConfig::default()).is_ok());
    }
}
