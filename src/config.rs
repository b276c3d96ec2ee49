//! Serializable metric configuration and name lookup.
//!
//! A [`MetricConfig`] names an algorithm together with its parameters and
//! can be stored as JSON (or any serde format), looked up by name, and
//! turned into a ready-to-use `Box<dyn Metric>`:
//!
//! ```
//! use seqdist::algorithms::Metric;
//! use seqdist::config::MetricConfig;
//!
//! let config: MetricConfig = serde_json::from_str(
//!     r#"{"algorithm": "gotoh", "gap_open": 2.0}"#,
//! ).unwrap();
//! let metric = config.build().unwrap();
//! assert_eq!(metric.name(), "gotoh");
//!
//! let jw = MetricConfig::from_name("jw").unwrap().build().unwrap();
//! assert!(jw.similarity("MARTHA", "MARHTA") > 0.96);
//! ```
//!
//! Comparators and similarity functions are closures and therefore not part
//! of the configuration; attach them to the concrete metric types instead.

use crate::algorithms::damerau::DamerauConfig;
use crate::algorithms::gotoh::GotohConfig;
use crate::algorithms::hamming::HammingConfig;
use crate::algorithms::jaro::JaroConfig;
use crate::algorithms::levenshtein::LevenshteinConfig;
use crate::algorithms::mlipns::MlipnsConfig;
use crate::algorithms::needleman_wunsch::AlignmentConfig;
use crate::algorithms::phonetic::EditexConfig;
use crate::algorithms::strcmp95::StrCmp95Config;
use crate::algorithms::{
    DamerauLevenshtein, Editex, Gotoh, Hamming, Jaro, JaroWinkler, Levenshtein, Metric, Mlipns,
    NeedlemanWunsch, Qval, SmithWaterman, StrCmp95,
};
use crate::error::{MetricError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical names accepted by [`MetricConfig::from_name`].
pub const ALGORITHM_NAMES: [&str; 11] = [
    "hamming",
    "mlipns",
    "levenshtein",
    "damerau_levenshtein",
    "jaro",
    "jaro_winkler",
    "needleman_wunsch",
    "smith_waterman",
    "gotoh",
    "strcmp95",
    "editex",
];

/// Algorithm selection with its parameters.
///
/// Serialized with an `algorithm` tag next to the parameter fields; omitted
/// parameters take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum MetricConfig {
    /// Position-wise mismatch count
    Hamming(HammingConfig),

    /// Hamming-based equal / not-equal test
    Mlipns(MlipnsConfig),

    /// Insertions, deletions and substitutions
    ///
    /// **Best for**: Typos, spelling errors, short strings
    Levenshtein(LevenshteinConfig),

    /// Levenshtein plus adjacent transpositions
    ///
    /// **Best for**: Keyboard errors, adjacent character swaps
    DamerauLevenshtein(DamerauConfig),

    /// Plain Jaro similarity
    Jaro {
        #[serde(default)]
        qval: Qval,
    },

    /// Jaro with prefix (and optional long-string) boosts
    ///
    /// **Best for**: Person names, titles, short identifiers
    JaroWinkler(JaroConfig),

    /// Global alignment, linear gaps
    NeedlemanWunsch(AlignmentConfig),

    /// Local alignment, linear gaps
    SmithWaterman(AlignmentConfig),

    /// Global alignment, affine gaps
    Gotoh(GotohConfig),

    /// Census Bureau comparator with OCR/phonetic partial credit
    #[serde(rename = "strcmp95")]
    StrCmp95(StrCmp95Config),

    /// Phonetic edit distance
    Editex(EditexConfig),
}

impl MetricConfig {
    /// Default configuration for an algorithm name.
    ///
    /// Accepts the canonical names in [`ALGORITHM_NAMES`] plus the aliases
    /// `damerau`, `jw`, `nw` and `sw`. Matching ignores ASCII case.
    ///
    /// # Errors
    /// Returns `UnknownAlgorithm` for anything else.
    pub fn from_name(name: &str) -> Result<Self> {
        let config = match name.to_ascii_lowercase().as_str() {
            "hamming" => Self::Hamming(HammingConfig::default()),
            "mlipns" => Self::Mlipns(MlipnsConfig::default()),
            "levenshtein" => Self::Levenshtein(LevenshteinConfig::default()),
            "damerau_levenshtein" | "damerau" => Self::DamerauLevenshtein(DamerauConfig::default()),
            "jaro" => Self::Jaro { qval: Qval::default() },
            "jaro_winkler" | "jw" => Self::JaroWinkler(JaroConfig::default()),
            "needleman_wunsch" | "nw" => Self::NeedlemanWunsch(AlignmentConfig::default()),
            "smith_waterman" | "sw" => Self::SmithWaterman(AlignmentConfig::default()),
            "gotoh" => Self::Gotoh(GotohConfig::default()),
            "strcmp95" => Self::StrCmp95(StrCmp95Config::default()),
            "editex" => Self::Editex(EditexConfig::default()),
            _ => return Err(MetricError::UnknownAlgorithm(name.to_string())),
        };
        Ok(config)
    }

    /// Canonical algorithm name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hamming(_) => "hamming",
            Self::Mlipns(_) => "mlipns",
            Self::Levenshtein(_) => "levenshtein",
            Self::DamerauLevenshtein(_) => "damerau_levenshtein",
            Self::Jaro { .. } => "jaro",
            Self::JaroWinkler(_) => "jaro_winkler",
            Self::NeedlemanWunsch(_) => "needleman_wunsch",
            Self::SmithWaterman(_) => "smith_waterman",
            Self::Gotoh(_) => "gotoh",
            Self::StrCmp95(_) => "strcmp95",
            Self::Editex(_) => "editex",
        }
    }

    /// Validate the parameters and construct the metric.
    ///
    /// # Errors
    /// Returns `InvalidParameter` when a parameter is out of range.
    pub fn build(&self) -> Result<Box<dyn Metric>> {
        let metric: Box<dyn Metric> = match *self {
            Self::Hamming(config) => Box::new(Hamming::from_config(config)?),
            Self::Mlipns(config) => Box::new(Mlipns::from_config(config)?),
            Self::Levenshtein(config) => Box::new(Levenshtein::from_config(config)?),
            Self::DamerauLevenshtein(config) => Box::new(DamerauLevenshtein::from_config(config)?),
            Self::Jaro { qval } => Box::new(Jaro::new().with_qval(qval.validate()?)),
            Self::JaroWinkler(config) => Box::new(JaroWinkler::from_config(config)?),
            Self::NeedlemanWunsch(config) => Box::new(NeedlemanWunsch::from_config(config)?),
            Self::SmithWaterman(config) => Box::new(SmithWaterman::from_config(config)?),
            Self::Gotoh(config) => Box::new(Gotoh::from_config(config)?),
            Self::StrCmp95(config) => Box::new(StrCmp95::from_config(config)?),
            Self::Editex(config) => Box::new(Editex::from_config(config)?),
        };
        Ok(metric)
    }
}

impl FromStr for MetricConfig {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::DamerauVariant;

    #[test]
    fn test_every_name_builds() {
        for name in ALGORITHM_NAMES {
            let config = MetricConfig::from_name(name).unwrap();
            assert_eq!(config.name(), name);
            let metric = config.build().unwrap();
            assert_eq!(metric.name(), name);
            assert_eq!(metric.normalized_similarity("abc", "abc"), 1.0, "{}", name);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(MetricConfig::from_name("jw").map(|c| c.name()), Ok("jaro_winkler"));
        assert_eq!(MetricConfig::from_name("damerau").map(|c| c.name()), Ok("damerau_levenshtein"));
        assert_eq!(MetricConfig::from_name("NW").map(|c| c.name()), Ok("needleman_wunsch"));
        assert_eq!("sw".parse::<MetricConfig>().map(|c| c.name()), Ok("smith_waterman"));
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = MetricConfig::from_name("soundex").unwrap_err();
        assert!(matches!(err, MetricError::UnknownAlgorithm(_)));
        assert!(err.to_string().contains("soundex"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = MetricConfig::DamerauLevenshtein(DamerauConfig {
            qval: Qval::Grams(2),
            variant: DamerauVariant::Unrestricted,
        });
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"algorithm\":\"damerau_levenshtein\""));
        let back: MetricConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_json_defaults_fill_in() {
        let config: MetricConfig = serde_json::from_str(r#"{"algorithm":"mlipns"}"#).unwrap();
        assert_eq!(config, MetricConfig::Mlipns(MlipnsConfig::default()));

        let config: MetricConfig = serde_json::from_str(r#"{"algorithm":"strcmp95","long_strings":true}"#).unwrap();
        assert_eq!(config, MetricConfig::StrCmp95(StrCmp95Config { long_strings: true }));

        let config: MetricConfig = serde_json::from_str(r#"{"algorithm":"jaro"}"#).unwrap();
        assert_eq!(config, MetricConfig::Jaro { qval: Qval::Chars });
    }

    #[test]
    fn test_build_validates() {
        let config = MetricConfig::Hamming(HammingConfig {
            qval: Qval::Grams(0),
            truncate: false,
        });
        assert!(matches!(config.build(), Err(MetricError::InvalidParameter { name: "qval", .. })));

        let config = MetricConfig::SmithWaterman(AlignmentConfig {
            gap_cost: f64::INFINITY,
            ..AlignmentConfig::default()
        });
        assert!(config.build().is_err());
    }
}
