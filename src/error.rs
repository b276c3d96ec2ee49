//! Error types for metric construction and batch evaluation.
//!
//! Scoring itself never fails: empty sequences and length mismatches have
//! well-defined results. Errors come from parameter misuse at construction
//! time, from full-matrix algorithms refusing inputs beyond their allocation
//! limit, and from the batch helpers.

use thiserror::Error;

/// Errors that can occur when building or applying a metric
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// A constructor parameter is outside the range the algorithm accepts
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the metric's configuration
        name: &'static str,
        /// Human-readable explanation
        reason: String,
    },

    /// Input is too long for an algorithm that needs a full O(m*n) matrix
    #[error(
        "Sequence length exceeds safe limit for O(m*n) algorithm: len_a={len_a}, len_b={len_b}, max={limit}"
    )]
    MatrixTooLarge {
        /// Length of the first sequence
        len_a: usize,
        /// Length of the second sequence
        len_b: usize,
        /// Maximum allowed length per side
        limit: usize,
    },

    /// A multi-sequence entry point received too few sequences
    #[error("At least {required} sequence(s) required, got {got}")]
    NotEnoughSequences {
        /// Minimum number of sequences
        required: usize,
        /// Number actually supplied
        got: usize,
    },

    /// Registry lookup by name failed
    #[error("Unknown algorithm: '{0}'")]
    UnknownAlgorithm(String),

    /// Paired batch inputs differ in length
    #[error("Batch inputs must have equal length: left={left}, right={right}")]
    LengthMismatch {
        /// Number of left-hand items
        left: usize,
        /// Number of right-hand items
        right: usize,
    },

    /// A dedicated worker pool could not be created
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),
}

impl MetricError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, MetricError>;

/// Reject NaN, infinities and negative values for a cost parameter.
pub(crate) fn check_cost(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(MetricError::invalid(
            name,
            format!("must be a finite number, got {}", value),
        ));
    }
    if value < 0.0 {
        return Err(MetricError::invalid(
            name,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Reject values outside [0.0, 1.0].
pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MetricError::invalid(
            name,
            format!("must be in range [0.0, 1.0], got {}", value),
        ));
    }
    Ok(value)
}
