//! seqdist - Edit-distance and alignment metrics
//!
//! String and sequence comparison for fuzzy matching, deduplication,
//! spell-correction and record linkage. Every metric implements the same
//! [`Metric`] contract, so they are interchangeable:
//!
//! ```
//! use seqdist::{JaroWinkler, Levenshtein, Metric};
//!
//! let metrics: Vec<Box<dyn Metric>> = vec![
//!     Box::new(Levenshtein::new()),
//!     Box::new(JaroWinkler::new()),
//! ];
//! for metric in &metrics {
//!     assert_eq!(metric.normalized_similarity("kitten", "kitten"), 1.0);
//!     assert!(metric.normalized_similarity("kitten", "sitting") < 1.0);
//! }
//! ```
//!
//! # Features
//! - Hamming, MLIPNS, Levenshtein, Damerau-Levenshtein (restricted and unrestricted)
//! - Jaro, Jaro-Winkler, StrCmp95, Editex
//! - Needleman-Wunsch, Smith-Waterman, Gotoh
//! - Character, grapheme, word and q-gram granularity ([`Qval`])
//! - Serializable configuration and lookup by name ([`MetricConfig`])
//! - Parallel batch processing ([`batch`])

pub mod algorithms;
pub mod batch;
pub mod config;
pub mod error;

pub use algorithms::{
    Comparator, DamerauLevenshtein, DamerauVariant, Editex, Gotoh, Hamming, Jaro, JaroWinkler,
    Levenshtein, Metric, Mlipns, NeedlemanWunsch, Qval, ScoreKind, SimilarityFn, SmithWaterman,
    StrCmp95,
};
pub use batch::{MatchResult, Score};
pub use config::MetricConfig;
pub use error::{MetricError, Result};
