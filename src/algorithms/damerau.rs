//! Damerau-Levenshtein distance implementation
//!
//! Extends Levenshtein with transposition of adjacent elements.
//! Particularly useful for typo detection where letter swaps are common.
//!
//! # Variants
//!
//! - [`DamerauVariant::Restricted`] (default): optimal string alignment. A
//!   transposed pair can not be edited again, so `CA -> ABC` costs 3.
//!   Three rolling rows, O(n) space.
//! - [`DamerauVariant::Unrestricted`]: true Damerau-Levenshtein
//!   (Lowrance-Wagner). `CA -> ABC` costs 2. Needs the full matrix.
//!
//! # Sequence Length Limits
//!
//! The unrestricted variant refuses sequences longer than
//! [`MAX_QUADRATIC_LENGTH`] elements per side with
//! [`MetricError::MatrixTooLarge`]. Through [`Metric`] such inputs fall back
//! to the restricted variant and a warning is logged.

use super::grid::{Grid, MAX_QUADRATIC_LENGTH};
use super::sequence::{prepare, Qval, Sequence};
use super::{element_eq, Comparator, Metric, ScoreKind};
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::warn;

/// Which transposition model to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamerauVariant {
    /// Optimal string alignment
    #[default]
    Restricted,
    /// True Damerau-Levenshtein
    Unrestricted,
}

/// Serializable parameters of [`DamerauLevenshtein`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DamerauConfig {
    /// Element granularity
    pub qval: Qval,
    /// Transposition model
    pub variant: DamerauVariant,
}

/// Damerau-Levenshtein distance calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are sequence lengths
/// - Space: O(n) restricted, O(m*n) unrestricted
#[derive(Debug, Clone, Default)]
pub struct DamerauLevenshtein {
    pub qval: Qval,
    pub comparator: Option<Comparator>,
    pub variant: DamerauVariant,
}

impl DamerauLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: DamerauConfig) -> Result<Self> {
        Ok(Self {
            qval: config.qval.validate()?,
            comparator: None,
            variant: config.variant,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> DamerauConfig {
        DamerauConfig {
            qval: self.qval,
            variant: self.variant,
        }
    }

    #[must_use]
    pub fn with_qval(mut self, qval: Qval) -> Self {
        self.qval = qval;
        self
    }

    #[must_use]
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: DamerauVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Distance under the configured variant.
    ///
    /// # Errors
    /// Returns `MatrixTooLarge` when the unrestricted variant is asked to
    /// compare sequences longer than [`MAX_QUADRATIC_LENGTH`].
    pub fn try_distance(&self, a: &str, b: &str) -> Result<usize> {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        let eq = element_eq(self.comparator.as_ref());
        match self.variant {
            DamerauVariant::Restricted => Ok(osa_by(&a, &b, eq)),
            DamerauVariant::Unrestricted => unrestricted_by(&a, &b, eq),
        }
    }
}

impl Metric for DamerauLevenshtein {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Distance
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        match self.try_distance(a, b) {
            Ok(d) => d as f64,
            Err(err) => {
                warn!(error = %err, "unrestricted Damerau-Levenshtein unavailable, using restricted variant");
                let a: Sequence<'_> = prepare(a, self.qval);
                let b: Sequence<'_> = prepare(b, self.qval);
                osa_by(&a, &b, element_eq(self.comparator.as_ref())) as f64
            }
        }
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        (prepare(a, self.qval).len() + prepare(b, self.qval).len()) as f64
    }

    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }
}

/// Optimal string alignment distance (restricted Damerau-Levenshtein).
///
/// Each substring is edited at most once. Three rolling rows.
pub fn osa_by<T, F>(a: &[T], b: &[T], eq: F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev2_row: SmallVec<[usize; 64]> = smallvec![0; n + 1];
    let mut prev_row: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut curr_row: SmallVec<[usize; 64]> = smallvec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = if eq(&a[i - 1], &b[j - 1]) { 0 } else { 1 };

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution

            if i > 1 && j > 1 && eq(&a[i - 1], &b[j - 2]) && eq(&a[i - 2], &b[j - 1]) {
                curr_row[j] = curr_row[j].min(prev2_row[j - 2] + 1); // transposition
            }
        }

        std::mem::swap(&mut prev2_row, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// True Damerau-Levenshtein distance with full transposition support.
///
/// Instead of a per-element "last row seen" map this keeps, for every column,
/// the last row whose element matched it, so any equality predicate works.
///
/// # Errors
/// Returns `MatrixTooLarge` if either sequence exceeds [`MAX_QUADRATIC_LENGTH`].
pub fn unrestricted_by<T, F>(a: &[T], b: &[T], eq: F) -> Result<usize>
where
    F: Fn(&T, &T) -> bool,
{
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return Ok(n);
    }
    if n == 0 {
        return Ok(m);
    }
    if m > MAX_QUADRATIC_LENGTH || n > MAX_QUADRATIC_LENGTH {
        return Err(MetricError::MatrixTooLarge {
            len_a: m,
            len_b: n,
            limit: MAX_QUADRATIC_LENGTH,
        });
    }

    let max_dist = m + n;

    // last_row[j]: last row i (1-based) with a[i-1] == b[j-1], 0 if none yet
    let mut last_row: SmallVec<[usize; 64]> = smallvec![0; n + 1];

    let mut d = Grid::new(m + 2, n + 2, 0usize);
    d[(0, 0)] = max_dist;
    for i in 0..=m {
        d[(i + 1, 0)] = max_dist;
        d[(i + 1, 1)] = i;
    }
    for j in 0..=n {
        d[(0, j + 1)] = max_dist;
        d[(1, j + 1)] = j;
    }

    for i in 1..=m {
        let mut db = 0usize;

        for j in 1..=n {
            let i1 = last_row[j];
            let j1 = db;

            let cost = if eq(&a[i - 1], &b[j - 1]) {
                db = j;
                0
            } else {
                1
            };

            d[(i + 1, j + 1)] = (d[(i, j)] + cost) // substitution
                .min(d[(i + 1, j)] + 1) // insertion
                .min(d[(i, j + 1)] + 1) // deletion
                .min(d[(i1, j1)] + (i - i1 - 1) + 1 + (j - j1 - 1)); // transposition
        }

        for j in 1..=n {
            if eq(&a[i - 1], &b[j - 1]) {
                last_row[j] = i;
            }
        }
    }

    Ok(d[(m + 1, n + 1)])
}

/// Optimal string alignment distance over characters.
///
/// Example where OSA differs from true Damerau-Levenshtein:
/// "CA" -> "ABC": OSA = 3 (sub C->A, sub A->B, ins C), true DL = 2
/// (transpose CA->AC, ins B).
#[inline]
#[must_use]
pub fn optimal_string_alignment(a: &str, b: &str) -> usize {
    let a: Sequence<'_> = prepare(a, Qval::Chars);
    let b: Sequence<'_> = prepare(b, Qval::Chars);
    osa_by(&a, &b, |x, y| x == y)
}

/// True Damerau-Levenshtein distance over characters.
///
/// # Errors
/// Returns `MatrixTooLarge` for inputs longer than [`MAX_QUADRATIC_LENGTH`] characters.
///
/// # Example
/// ```
/// use seqdist::algorithms::damerau::true_damerau_levenshtein;
///
/// assert_eq!(true_damerau_levenshtein("hello", "hallo"), Ok(1));
/// assert!(true_damerau_levenshtein(&"a".repeat(15000), "test").is_err());
/// ```
pub fn true_damerau_levenshtein(a: &str, b: &str) -> Result<usize> {
    let a: Sequence<'_> = prepare(a, Qval::Chars);
    let b: Sequence<'_> = prepare(b, Qval::Chars);
    unrestricted_by(&a, &b, |x, y| x == y)
}
