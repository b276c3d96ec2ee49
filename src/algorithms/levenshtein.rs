//! Levenshtein (edit) distance implementation
//!
//! Optimized with:
//! - Myers bit-parallel algorithm for O(⌈m/64⌉n) time when elements are
//!   compared by plain equality and the shorter sequence fits one word
//! - Two-row DP for everything else, including custom comparators
//! - Early termination with max distance threshold

use super::sequence::{prepare, Qval, Sequence};
use super::{element_eq, Comparator, Metric, ScoreKind};
use crate::error::Result;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::hash::Hash;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

// ============================================================================
// Myers Bit-Parallel Algorithm
// ============================================================================

/// Myers bit-parallel Levenshtein distance for patterns up to 64 elements.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
#[inline]
fn myers_64<T: Eq + Hash>(pattern: &[T], text: &[T], max_distance: Option<usize>) -> Option<usize> {
    let m = pattern.len();
    let n = text.len();

    if m == 0 {
        return within(n, max_distance);
    }
    if n == 0 {
        return within(m, max_distance);
    }
    if m > MYERS_BLOCK_SIZE {
        return levenshtein_bounded_by(pattern, text, max_distance, |a, b| a == b);
    }

    // Peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<&T, u64> = AHashMap::with_capacity(m.min(26));
    for (i, c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;

    let mask = 1u64 << (m - 1);

    for (j, tc) in text.iter().enumerate() {
        let eq = peq.get(tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let eq_and_vp = eq & vp;
        let xh = ((eq_and_vp.wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        // Each remaining text element can lower the score by at most one
        if let Some(max_d) = max_distance {
            let remaining = n - j - 1;
            if score.saturating_sub(remaining) > max_d {
                return None;
            }
        }

        // First row is 0,1,2,... so bit 0 of the shifted horizontal delta is +1
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    within(score, max_distance)
}

#[inline]
fn within(distance: usize, max_distance: Option<usize>) -> Option<usize> {
    match max_distance {
        Some(max_d) if distance > max_d => None,
        _ => Some(distance),
    }
}

// ============================================================================
// Dynamic Programming
// ============================================================================

/// Levenshtein distance between two element slices under `eq`.
///
/// Two-row DP over the recurrence
/// `D[i][j] = min(D[i-1][j] + 1, D[i][j-1] + 1, D[i-1][j-1] + (a[i] != b[j]))`.
#[must_use]
pub fn levenshtein_by<T, F>(a: &[T], b: &[T], eq: F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    levenshtein_bounded_by(a, b, None, eq).unwrap_or(0)
}

/// Levenshtein distance that gives up once every cell of a row exceeds
/// `max_distance`. Returns `None` when the distance is above the threshold.
pub fn levenshtein_bounded_by<T, F>(a: &[T], b: &[T], max_distance: Option<usize>, eq: F) -> Option<usize>
where
    F: Fn(&T, &T) -> bool,
{
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return within(n, max_distance);
    }
    if n == 0 {
        return within(m, max_distance);
    }
    if let Some(max_d) = max_distance {
        if m.abs_diff(n) > max_d {
            return None;
        }
    }

    let mut prev: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut curr: SmallVec<[usize; 64]> = SmallVec::with_capacity(n + 1);

    for i in 1..=m {
        curr.clear();
        curr.push(i);
        let mut row_min = i;

        for j in 1..=n {
            let cost = if eq(&a[i - 1], &b[j - 1]) { 0 } else { 1 };
            let val = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
            curr.push(val);
            row_min = row_min.min(val);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    within(prev[n], max_distance)
}

// ============================================================================
// Public API
// ============================================================================

/// Serializable parameters of [`Levenshtein`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevenshteinConfig {
    /// Element granularity
    pub qval: Qval,
    /// Stop computing once the distance is known to exceed this
    pub max_distance: Option<usize>,
}

/// Levenshtein distance calculator with optional early termination
///
/// # Complexity
/// - Time: O(m*n), or O(n) with the bit-parallel path
/// - Space: O(min(m,n)) using the two-row DP
#[derive(Debug, Clone, Default)]
pub struct Levenshtein {
    pub qval: Qval,
    pub comparator: Option<Comparator>,
    /// Maximum distance to compute (for early termination)
    pub max_distance: Option<usize>,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: LevenshteinConfig) -> Result<Self> {
        Ok(Self {
            qval: config.qval.validate()?,
            comparator: None,
            max_distance: config.max_distance,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> LevenshteinConfig {
        LevenshteinConfig {
            qval: self.qval,
            max_distance: self.max_distance,
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
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Compute distance with proper Option semantics.
    /// Returns `None` if distance exceeds max_distance threshold.
    /// Returns `Some(distance)` otherwise.
    #[must_use]
    pub fn compute(&self, a: &str, b: &str) -> Option<usize> {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        match &self.comparator {
            Some(cmp) => levenshtein_bounded_by(&a, &b, self.max_distance, element_eq(Some(cmp))),
            None => {
                // Shorter sequence as the Myers pattern
                let (pattern, text) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
                myers_64(pattern.as_slice(), text.as_slice(), self.max_distance)
            }
        }
    }
}

impl Metric for Levenshtein {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Distance
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        // Exceeding max_distance reports max_distance + 1 ("greater than threshold")
        match (self.compute(a, b), self.max_distance) {
            (Some(d), _) => d as f64,
            (None, Some(max_d)) => max_d.saturating_add(1) as f64,
            (None, None) => 0.0,
        }
    }

    fn maximum(&self, a: &str, b: &str) -> f64 {
        (prepare(a, self.qval).len() + prepare(b, self.qval).len()) as f64
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Compute Levenshtein distance over characters with optional max threshold.
///
/// Returns `None` if distance exceeds `max_distance` (early termination).
///
/// # Example
/// ```
/// use seqdist::algorithms::levenshtein::levenshtein_distance_bounded;
///
/// assert_eq!(levenshtein_distance_bounded("kitten", "sitting", None), Some(3));
/// assert_eq!(levenshtein_distance_bounded("abc", "abd", Some(2)), Some(1));
/// assert_eq!(levenshtein_distance_bounded("abcdef", "ghijkl", Some(3)), None);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_distance_bounded(a: &str, b: &str, max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    let lev = Levenshtein {
        max_distance,
        ..Levenshtein::default()
    };
    lev.compute(a, b)
}

/// Convenience function for simple distance calculation
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    levenshtein_distance_bounded(a, b, None).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("saturday", "sunday"), 3);
        assert_eq!(levenshtein("test", "text"), 1);
        assert_eq!(levenshtein("test", "nani"), 4);
    }

    #[test]
    fn test_levenshtein_unicode() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本語", "日本"), 1);
    }

    #[test]
    fn test_levenshtein_bounded_returns_none_when_exceeded() {
        assert_eq!(levenshtein_distance_bounded("abcdef", "ghijkl", Some(3)), None);
        assert_eq!(levenshtein_distance_bounded("abc", "abd", Some(2)), Some(1));
        assert_eq!(levenshtein_distance_bounded("abc", "abc", Some(0)), Some(0));
        assert_eq!(levenshtein_distance_bounded("", "abcd", Some(3)), None);
    }

    #[test]
    fn test_levenshtein_struct_compute() {
        let lev = Levenshtein::new().with_max_distance(2);
        assert_eq!(lev.compute("abc", "abd"), Some(1));
        assert_eq!(lev.compute("abc", "xyz"), None);
        assert_eq!(lev.distance("abc", "xyz"), 3.0);

        let lev = Levenshtein::new().with_max_distance(1);
        assert_eq!(lev.distance("abc", "xyz"), 2.0);

        assert_eq!(Levenshtein::new().compute("abc", "xyz"), Some(3));
    }

    #[test]
    fn test_levenshtein_largest_threshold() {
        let lev = Levenshtein::new().with_max_distance(usize::MAX);
        assert_eq!(lev.compute("kitten", "sitting"), Some(3));
        assert_eq!(lev.distance("kitten", "sitting"), 3.0);
        assert_eq!(levenshtein_distance_bounded("abc", "", Some(usize::MAX)), Some(3));
    }

    #[test]
    fn test_myers_matches_dp() {
        let pairs = [
            ("algorithm", "altruistic"),
            ("intention", "execution"),
            ("a", "b"),
            ("ab", "ba"),
            ("", "x"),
        ];
        for (a, b) in pairs {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            assert_eq!(
                myers_64(&a, &b, None),
                Some(levenshtein_by(&a, &b, |x, y| x == y)),
                "{:?} vs {:?}",
                a,
                b
            );
        }
        assert_eq!(levenshtein("algorithm", "altruistic"), 6);
        assert_eq!(levenshtein("intention", "execution"), 5);
    }

    #[test]
    fn test_long_pattern_falls_back_to_dp() {
        let a = "ab".repeat(50);
        let b = "ba".repeat(50);
        assert_eq!(levenshtein(&a, &b), 2);
    }

    #[test]
    fn test_levenshtein_contract() {
        let lev = Levenshtein::new();
        assert_eq!(lev.maximum("kitten", "sitting"), 13.0);
        assert_eq!(lev.similarity("kitten", "sitting"), 10.0);
        assert_eq!(lev.normalized_distance("", ""), 0.0);
        assert_eq!(lev.normalized_distance("abc", ""), 1.0);
    }

    #[test]
    fn test_levenshtein_words_and_comparator() {
        let words = Levenshtein::new().with_qval(Qval::Words);
        assert_eq!(words.distance("the quick fox", "the slow fox"), 1.0);

        let ci = Levenshtein::new().with_comparator(Comparator::case_insensitive());
        assert_eq!(ci.distance("HeLLo", "hello"), 0.0);
        assert_eq!(ci.distance("HeLLo", "help"), 2.0);
    }

    #[test]
    fn test_config_round_trip() {
        let lev = Levenshtein::new().with_qval(Qval::Grams(2)).with_max_distance(4);
        let rebuilt = Levenshtein::from_config(lev.config()).map(|l| l.config());
        assert_eq!(rebuilt, Ok(lev.config()));
    }
}
