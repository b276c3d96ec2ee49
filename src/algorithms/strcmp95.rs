//! StrCmp95 similarity
//!
//! The U.S. Census Bureau record-linkage comparator: Jaro-Winkler with
//! partial credit for commonly confused characters (`0`/`O`, `1`/`I`,
//! `B`/`V`, ...) and an optional adjustment for long strings.
//!
//! Inputs are trimmed and ASCII-uppercased before comparison and are always
//! compared character by character.

use super::jaro::{count_transpositions, flag_matches};
use super::{Metric, ScoreKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Character pairs that earn partial credit when left unmatched.
const SIMILAR_PAIRS: [(char, char); 36] = [
    ('A', 'E'), ('A', 'I'), ('A', 'O'), ('A', 'U'), ('B', 'V'), ('E', 'I'),
    ('E', 'O'), ('E', 'U'), ('I', 'O'), ('I', 'U'), ('O', 'U'), ('I', 'Y'),
    ('E', 'Y'), ('C', 'G'), ('E', 'F'), ('W', 'U'), ('W', 'V'), ('X', 'K'),
    ('S', 'Z'), ('X', 'S'), ('Q', 'C'), ('U', 'V'), ('M', 'N'), ('L', 'I'),
    ('Q', 'O'), ('P', 'R'), ('I', 'J'), ('2', 'Z'), ('5', 'S'), ('8', 'B'),
    ('1', 'I'), ('1', 'L'), ('0', 'O'), ('0', 'Q'), ('C', 'K'), ('G', 'J'),
];

/// Credit for one similar pair, in tenths of a full match
const SIMILAR_PAIR_WEIGHT: u32 = 3;

/// Fixed Winkler prefix weight
const PREFIX_WEIGHT: f64 = 0.1;

#[inline]
fn similar(a: char, b: char) -> bool {
    SIMILAR_PAIRS
        .iter()
        .any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
}

/// Only codes 1..=90 take part in the partial-credit scan
#[inline]
fn in_range(c: char) -> bool {
    (1..91).contains(&(c as u32))
}

/// Serializable parameters of [`StrCmp95`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrCmp95Config {
    /// Apply the long-string adjustment
    pub long_strings: bool,
}

/// StrCmp95 similarity calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrCmp95 {
    pub long_strings: bool,
}

impl StrCmp95 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: StrCmp95Config) -> Result<Self> {
        Ok(Self {
            long_strings: config.long_strings,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> StrCmp95Config {
        StrCmp95Config {
            long_strings: self.long_strings,
        }
    }

    #[must_use]
    pub fn with_long_strings(mut self, long_strings: bool) -> Self {
        self.long_strings = long_strings;
        self
    }
}

impl Metric for StrCmp95 {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        strcmp95(a, b, self.long_strings)
    }

    fn maximum(&self, _a: &str, _b: &str) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "strcmp95"
    }
}

/// StrCmp95 similarity of two strings.
///
/// Both empty (after trimming) is a perfect match; one empty scores 0.
#[must_use]
pub fn strcmp95(a: &str, b: &str, long_strings: bool) -> f64 {
    let s1: SmallVec<[char; 64]> = a.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
    let s2: SmallVec<[char; 64]> = b.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
    let len1 = s1.len();
    let len2 = s2.len();

    if len1 == 0 && len2 == 0 {
        return 1.0;
    }
    if len1 == 0 || len2 == 0 {
        return 0.0;
    }

    let eq = |x: &char, y: &char| x == y;
    let mut flags = flag_matches(&s1, &s2, &eq);
    let common = flags.common;
    if common == 0 {
        return 0.0;
    }
    // Half the out-of-order pairs, rounded down
    let transpositions = count_transpositions(&s1, &s2, &flags, &eq) / 2;

    // Partial credit for unmatched but similar characters
    let min_len = len1.min(len2);
    let mut similar_weight = 0u32;
    if min_len > common {
        for i in (0..len1).filter(|&i| !flags.a[i] && in_range(s1[i])) {
            let hit = (0..len2).find(|&j| !flags.b[j] && in_range(s2[j]) && similar(s1[i], s2[j]));
            if let Some(j) = hit {
                similar_weight += SIMILAR_PAIR_WEIGHT;
                flags.b[j] = true;
            }
        }
    }
    let num_sim = f64::from(similar_weight) / 10.0 + common as f64;

    let mut weight = (num_sim / len1 as f64
        + num_sim / len2 as f64
        + (common - transpositions) as f64 / common as f64)
        / 3.0;

    if weight <= 0.7 {
        return weight;
    }

    // Up to four leading equal non-digit characters, ending at the first
    // disagreement as in Jaro-Winkler
    let prefix_len = s1
        .iter()
        .zip(s2.iter())
        .take(min_len.min(4))
        .take_while(|&(x, y)| x == y && !x.is_ascii_digit())
        .count();
    weight += prefix_len as f64 * PREFIX_WEIGHT * (1.0 - weight);

    // After the prefix at least two more must agree, and the agreeing
    // characters must cover more than half of the rest
    if long_strings
        && min_len > 4
        && common > prefix_len + 1
        && 2 * common >= min_len + prefix_len
        && !s1[0].is_ascii_digit()
    {
        let adjustment = (common - prefix_len - 1) as f64 / (len1 + len2 - prefix_len * 2 + 2) as f64;
        weight += (1.0 - weight) * adjustment;
    }

    weight
}
