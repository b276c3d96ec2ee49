//! MLIPNS (Modified Language-Independent Product Name Search)
//!
//! A threshold test layered over Hamming distance: sequences are declared
//! equal (similarity 1) when the share of mismatching positions drops to the
//! threshold after forgiving up to `max_mismatches` of them, and not equal
//! (similarity 0) otherwise.

use super::hamming::hamming_by;
use super::sequence::{prepare, Qval, Sequence};
use super::{Metric, ScoreKind};
use crate::error::{check_unit_interval, MetricError, Result};
use serde::{Deserialize, Serialize};

/// Serializable parameters of [`Mlipns`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlipnsConfig {
    /// Highest tolerated mismatch ratio (0.0 - 1.0, default 0.25)
    pub threshold: f64,
    /// How many mismatches may be forgiven (default 2)
    pub max_mismatches: usize,
    /// Element granularity
    pub qval: Qval,
}

impl Default for MlipnsConfig {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            max_mismatches: 2,
            qval: Qval::Chars,
        }
    }
}

/// MLIPNS similarity calculator
#[derive(Debug, Clone, PartialEq)]
pub struct Mlipns {
    pub threshold: f64,
    pub max_mismatches: usize,
    pub qval: Qval,
}

impl Default for Mlipns {
    fn default() -> Self {
        let config = MlipnsConfig::default();
        Self {
            threshold: config.threshold,
            max_mismatches: config.max_mismatches,
            qval: config.qval,
        }
    }
}

impl Mlipns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    pub fn from_config(config: MlipnsConfig) -> Result<Self> {
        Ok(Self {
            threshold: check_unit_interval("threshold", config.threshold)?,
            max_mismatches: config.max_mismatches,
            qval: config.qval.validate()?,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> MlipnsConfig {
        MlipnsConfig {
            threshold: self.threshold,
            max_mismatches: self.max_mismatches,
            qval: self.qval,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_mismatches(mut self, max_mismatches: usize) -> Self {
        self.max_mismatches = max_mismatches;
        self
    }

    #[must_use]
    pub fn with_qval(mut self, qval: Qval) -> Self {
        self.qval = qval;
        self
    }

    /// Whether `a` and `b` are declared equal.
    #[must_use]
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        let a = prepare(a, self.qval);
        let b = prepare(b, self.qval);
        mlipns_by(&[a.as_slice(), b.as_slice()], self.threshold, self.max_mismatches, |x, y| x == y)
    }

    /// Similarity (1.0 or 0.0) across any number of sequences.
    ///
    /// # Errors
    /// Returns `NotEnoughSequences` when `sequences` is empty.
    pub fn similarity_many(&self, sequences: &[&str]) -> Result<f64> {
        if sequences.is_empty() {
            return Err(MetricError::NotEnoughSequences { required: 1, got: 0 });
        }
        let prepared: Vec<Sequence<'_>> = sequences.iter().map(|s| prepare(s, self.qval)).collect();
        let slices: Vec<&[&str]> = prepared.iter().map(|s| s.as_slice()).collect();
        let equal = mlipns_by(&slices, self.threshold, self.max_mismatches, |x, y| x == y);
        Ok(if equal { 1.0 } else { 0.0 })
    }
}

impl Metric for Mlipns {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Similarity
    }

    fn score(&self, a: &str, b: &str) -> f64 {
        if self.is_match(a, b) {
            1.0
        } else {
            0.0
        }
    }

    fn maximum(&self, _a: &str, _b: &str) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "mlipns"
    }
}

/// Progress of the tolerance check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchState {
    Checking {
        mismatches: usize,
        ham: usize,
        len: usize,
    },
    Equal,
    NotEqual,
}

/// Run the MLIPNS tolerance check over position-aligned sequences.
///
/// Starting from the Hamming distance `ham` over the longest length `len`,
/// the sequences are equal as soon as `1 - (len - ham) / len <= threshold`.
/// Otherwise one mismatch is forgiven (`ham` and `len` both shrink) and the
/// check repeats, at most `max_mismatches + 1` times. All sequences empty
/// counts as equal; any empty sequence alongside a non-empty one does not.
pub fn mlipns_by<T, F>(sequences: &[&[T]], threshold: f64, max_mismatches: usize, eq: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    let len = sequences.iter().map(|s| s.len()).max().unwrap_or(0);
    if len == 0 {
        return true;
    }
    if sequences.iter().any(|s| s.is_empty()) {
        return false;
    }

    let mut state = MatchState::Checking {
        mismatches: 0,
        ham: hamming_by(sequences, false, eq),
        len,
    };

    loop {
        state = match state {
            MatchState::Equal => return true,
            MatchState::NotEqual => return false,
            MatchState::Checking { len: 0, .. } => MatchState::Equal,
            MatchState::Checking { mismatches, .. } if mismatches > max_mismatches => {
                MatchState::NotEqual
            }
            MatchState::Checking { mismatches, ham, len } => {
                let agreement = (len - ham) as f64 / len as f64;
                if 1.0 - agreement <= threshold {
                    MatchState::Equal
                } else {
                    MatchState::Checking {
                        mismatches: mismatches + 1,
                        ham: ham.saturating_sub(1),
                        len: len - 1,
                    }
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mlipns_basic() {
        let m = Mlipns::new();
        assert_eq!(m.similarity("test", "test"), 1.0);
        assert_eq!(m.similarity("test", "xxxx"), 0.0);
        assert_eq!(m.similarity("test", "text"), 1.0);
        assert_eq!(m.similarity("Tomato", "Tamato"), 1.0);
        assert_eq!(m.similarity("abc", "abcde"), 1.0);
    }

    #[test]
    fn test_mlipns_empty() {
        let m = Mlipns::new();
        assert_eq!(m.similarity("", ""), 1.0);
        assert_eq!(m.similarity("a", ""), 0.0);
        assert_eq!(m.distance("", "a"), 1.0);
    }

    #[test]
    fn test_mlipns_strict_threshold() {
        let strict = Mlipns::new().with_threshold(0.0).with_max_mismatches(0);
        assert!(!strict.is_match("test", "text"));
        assert!(strict.is_match("test", "test"));
    }

    #[test]
    fn test_mlipns_many() {
        let m = Mlipns::new();
        assert_eq!(m.similarity_many(&["test", "tesx", "tesy"]), Ok(1.0));
        assert_eq!(m.similarity_many(&["test", "xxxx", "yyyy"]), Ok(0.0));
        assert!(m.similarity_many(&[]).is_err());
    }

    #[test]
    fn test_from_config_validates_threshold() {
        let config = MlipnsConfig {
            threshold: 1.5,
            ..MlipnsConfig::default()
        };
        assert!(Mlipns::from_config(config).is_err());
        assert_eq!(
            Mlipns::from_config(MlipnsConfig::default()).map(|m| m.config()),
            Ok(MlipnsConfig::default())
        );
    }
}
