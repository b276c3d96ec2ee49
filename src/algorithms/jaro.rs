//! Jaro and Jaro-Winkler similarity implementations
//!
//! Excellent for name matching and short strings.
//! Jaro-Winkler gives extra weight to common prefixes, and optionally to
//! long strings that share most of their elements.

use super::sequence::{prepare, Qval, Sequence};
use super::{Metric, ScoreKind};
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::warn;

/// Largest prefix weight that keeps the boosted score within [0, 1]
pub const MAX_PREFIX_WEIGHT: f64 = 0.25;

/// Number of leading elements the Winkler boost looks at
const MAX_PREFIX_LENGTH: usize = 4;

/// Serializable parameters of [`JaroWinkler`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroConfig {
    /// Element granularity
    pub qval: Qval,
    /// Apply the shared-prefix boost
    pub winklerize: bool,
    /// Apply the secondary boost for long, mostly-shared strings
    pub long_tolerance: bool,
    /// Prefix weight (typically 0.1, max 0.25)
    pub prefix_weight: f64,
}

impl Default for JaroConfig {
    fn default() -> Self {
        Self {
            qval: Qval::Chars,
            winklerize: true,
            long_tolerance: false,
            prefix_weight: 0.1,
        }
    }
}

fn clamp_prefix_weight(weight: f64) -> f64 {
    if !(0.0..=MAX_PREFIX_WEIGHT).contains(&weight) {
        warn!(prefix_weight = weight, "prefix_weight clamped to [0.0, 0.25]");
    }
    weight.clamp(0.0, MAX_PREFIX_WEIGHT)
}

/// Jaro similarity calculator
///
/// # Complexity
/// - Time: O(m*w) where w is the match window
/// - Space: O(m+n) for match flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaro {
    pub qval: Qval,
}

impl Jaro {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_qval(mut self, qval: Qval) -> Self {
        self.qval = qval;
        self
    }
}

impl Metric for Jaro {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        jaro_by(&a, &b, |x, y| x == y)
    }

    fn maximum(&self, _a: &str, _b: &str) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "jaro"
    }
}

/// Jaro-Winkler similarity calculator
///
/// Extends Jaro similarity by giving extra weight to common prefixes.
/// Best for names and short identifiers.
///
/// # Parameters
/// - `prefix_weight`: How much to boost prefix matches (0.0-0.25, typically 0.1)
/// - `winklerize`: Whether the prefix boost is applied at all
/// - `long_tolerance`: Extra boost for long strings with many common elements
#[derive(Debug, Clone, PartialEq)]
pub struct JaroWinkler {
    pub qval: Qval,
    pub winklerize: bool,
    pub long_tolerance: bool,
    /// Prefix weight (typically 0.1)
    pub prefix_weight: f64,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        let config = JaroConfig::default();
        Self {
            qval: config.qval,
            winklerize: config.winklerize,
            long_tolerance: config.long_tolerance,
            prefix_weight: config.prefix_weight,
        }
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration. An out-of-range prefix weight is clamped.
    pub fn from_config(config: JaroConfig) -> Result<Self> {
        if !config.prefix_weight.is_finite() {
            return Err(MetricError::invalid(
                "prefix_weight",
                format!("must be a finite number, got {}", config.prefix_weight),
            ));
        }
        Ok(Self {
            qval: config.qval.validate()?,
            winklerize: config.winklerize,
            long_tolerance: config.long_tolerance,
            prefix_weight: clamp_prefix_weight(config.prefix_weight),
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> JaroConfig {
        JaroConfig {
            qval: self.qval,
            winklerize: self.winklerize,
            long_tolerance: self.long_tolerance,
            prefix_weight: self.prefix_weight,
        }
    }

    #[must_use]
    pub fn with_qval(mut self, qval: Qval) -> Self {
        self.qval = qval;
        self
    }

    #[must_use]
    pub fn with_prefix_weight(mut self, weight: f64) -> Self {
        self.prefix_weight = clamp_prefix_weight(weight);
        self
    }

    #[must_use]
    pub fn with_winklerize(mut self, winklerize: bool) -> Self {
        self.winklerize = winklerize;
        self
    }

    #[must_use]
    pub fn with_long_tolerance(mut self, long_tolerance: bool) -> Self {
        self.long_tolerance = long_tolerance;
        self
    }

    fn boost(&self) -> Option<WinklerBoost> {
        self.winklerize.then_some(WinklerBoost {
            prefix_weight: self.prefix_weight,
            long_tolerance: self.long_tolerance,
        })
    }
}

impl Metric for JaroWinkler {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Sequence<'_> = prepare(a, self.qval);
        let b: Sequence<'_> = prepare(b, self.qval);
        jaro_winkler_by(&a, &b, self.boost(), |x, y| x == y)
    }

    fn maximum(&self, _a: &str, _b: &str) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// Matched element count and number of matched pairs that are out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JaroMatches {
    pub common: usize,
    pub transpositions: usize,
}

/// Match flags of both sequences after windowed matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchFlags {
    pub a: SmallVec<[bool; 64]>,
    pub b: SmallVec<[bool; 64]>,
    pub common: usize,
}

/// Each element of `a` claims the first unclaimed equal element of `b`
/// within `max(len)/2 - 1` positions.
pub(crate) fn flag_matches<T, F>(a: &[T], b: &[T], eq: &F) -> MatchFlags
where
    F: Fn(&T, &T) -> bool,
{
    let a_len = a.len();
    let b_len = b.len();

    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut flags = MatchFlags {
        a: smallvec![false; a_len],
        b: smallvec![false; b_len],
        common: 0,
    };

    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if flags.b[j] || !eq(&a[i], &b[j]) {
                continue;
            }
            flags.a[i] = true;
            flags.b[j] = true;
            flags.common += 1;
            break;
        }
    }

    flags
}

/// Number of matched pairs that are out of order.
pub(crate) fn count_transpositions<T, F>(a: &[T], b: &[T], flags: &MatchFlags, eq: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    let matched_a = (0..a.len()).filter(|&i| flags.a[i]);
    let matched_b = (0..b.len()).filter(|&j| flags.b[j]);
    // Both sides have exactly `common` flagged positions
    matched_a
        .zip(matched_b)
        .filter(|&(i, j)| !eq(&a[i], &b[j]))
        .count()
}

/// Windowed matching shared by the Jaro family.
pub fn jaro_matches<T, F>(a: &[T], b: &[T], eq: F) -> JaroMatches
where
    F: Fn(&T, &T) -> bool,
{
    let flags = flag_matches(a, b, &eq);
    JaroMatches {
        common: flags.common,
        transpositions: count_transpositions(a, b, &flags, &eq),
    }
}

/// Jaro similarity between two element slices.
///
/// Both empty is a perfect match (1.0); exactly one empty scores 0.0.
pub fn jaro_by<T, F>(a: &[T], b: &[T], eq: F) -> f64
where
    F: Fn(&T, &T) -> bool,
{
    jaro_winkler_by(a, b, None, eq)
}

/// Parameters of the Winkler boosts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinklerBoost {
    pub prefix_weight: f64,
    pub long_tolerance: bool,
}

/// Jaro similarity, boosted when `boost` is set.
///
/// The prefix boost applies when the Jaro score is above 0.7 and both
/// sequences are longer than 3 elements. The long-tolerance boost further
/// requires the longer sequence to exceed 4 elements and
/// `common > prefix + 1 && 2 * common >= longer + prefix`.
pub fn jaro_winkler_by<T, F>(a: &[T], b: &[T], boost: Option<WinklerBoost>, eq: F) -> f64
where
    F: Fn(&T, &T) -> bool,
{
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    let JaroMatches { common, transpositions } = jaro_matches(a, b, &eq);
    if common == 0 {
        return 0.0;
    }

    let m = common as f64;
    let mut weight = (m / a_len as f64 + m / b_len as f64 + (m - transpositions as f64 / 2.0) / m) / 3.0;

    let Some(boost) = boost else {
        return weight;
    };
    if weight <= 0.7 || a_len <= 3 || b_len <= 3 {
        return weight;
    }

    let prefix_len = a
        .iter()
        .zip(b.iter())
        .take(MAX_PREFIX_LENGTH)
        .take_while(|&(x, y)| eq(x, y))
        .count();
    weight += prefix_len as f64 * boost.prefix_weight * (1.0 - weight);

    let longer = a_len.max(b_len);
    if boost.long_tolerance && longer > 4 && common > prefix_len + 1 && 2 * common >= longer + prefix_len {
        weight += (1.0 - weight) * (common - prefix_len - 1) as f64
            / (a_len + b_len - 2 * prefix_len + 2) as f64;
    }

    weight
}

/// Calculate Jaro similarity between two strings, character by character.
#[inline]
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    Jaro::new().score(a, b)
}

/// Calculate Jaro-Winkler similarity with default parameters.
#[inline]
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    JaroWinkler::new().score(a, b)
}
