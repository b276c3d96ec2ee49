//! Batch helpers
//!
//! Apply one metric across many inputs. Inputs of at least
//! [`PARALLEL_THRESHOLD`] items are scored on the rayon thread pool; smaller
//! inputs are scored sequentially to avoid the coordination overhead.
//! Output order always matches input order.

use crate::algorithms::Metric;
use crate::error::{check_unit_interval, MetricError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum input size for parallel processing.
///
/// For inputs smaller than this threshold, sequential processing is faster
/// due to the overhead of thread pool coordination.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Which contract operation a batch helper applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Score {
    /// The metric's native score
    Raw,
    Distance,
    Similarity,
    NormalizedDistance,
    #[default]
    NormalizedSimilarity,
}

impl Score {
    /// Apply this operation of `metric` to one pair.
    #[inline]
    pub fn apply<M: Metric + ?Sized>(self, metric: &M, a: &str, b: &str) -> f64 {
        match self {
            Score::Raw => metric.score(a, b),
            Score::Distance => metric.distance(a, b),
            Score::Similarity => metric.similarity(a, b),
            Score::NormalizedDistance => metric.normalized_distance(a, b),
            Score::NormalizedSimilarity => metric.normalized_similarity(a, b),
        }
    }
}

/// One scored choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub text: String,
    /// Normalized similarity to the query
    pub score: f64,
    /// Position of `text` among the choices
    pub index: usize,
}

fn map_indexed<S, T, F>(items: &[S], f: F) -> Vec<T>
where
    S: Sync,
    T: Send,
    F: Fn(usize, &S) -> T + Send + Sync,
{
    if items.len() >= PARALLEL_THRESHOLD {
        debug!(items = items.len(), "scoring in parallel");
        items.par_iter().enumerate().map(|(i, s)| f(i, s)).collect()
    } else {
        items.iter().enumerate().map(|(i, s)| f(i, s)).collect()
    }
}

/// Score `left[i]` against `right[i]` for every `i`.
///
/// # Errors
/// Returns `LengthMismatch` if the slices differ in length.
pub fn pairwise<M, S>(metric: &M, left: &[S], right: &[S], op: Score) -> Result<Vec<f64>>
where
    M: Metric + ?Sized,
    S: AsRef<str> + Sync,
{
    if left.len() != right.len() {
        return Err(MetricError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(map_indexed(left, |i, a| op.apply(metric, a.as_ref(), right[i].as_ref())))
}

/// Score matrix: `result[i][j]` is `op` applied to `queries[i]` and `choices[j]`.
///
/// `workers == 0` uses the global rayon pool; any other value runs on a
/// dedicated pool of that many threads.
///
/// # Errors
/// Returns `ThreadPool` if the dedicated pool can not be created.
pub fn cdist<M, S>(metric: &M, queries: &[S], choices: &[S], op: Score, workers: usize) -> Result<Vec<Vec<f64>>>
where
    M: Metric + ?Sized,
    S: AsRef<str> + Sync,
{
    let row = |query: &S| -> Vec<f64> {
        choices
            .iter()
            .map(|choice| op.apply(metric, query.as_ref(), choice.as_ref()))
            .collect()
    };

    if queries.len().saturating_mul(choices.len()) < PARALLEL_THRESHOLD {
        return Ok(queries.iter().map(row).collect());
    }

    if workers > 0 {
        debug!(workers, queries = queries.len(), choices = choices.len(), "cdist on dedicated pool");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| MetricError::ThreadPool(e.to_string()))?;
        Ok(pool.install(|| queries.par_iter().map(row).collect()))
    } else {
        debug!(queries = queries.len(), choices = choices.len(), "cdist on global pool");
        Ok(queries.par_iter().map(row).collect())
    }
}

fn scored<M, S>(metric: &M, query: &str, choices: &[S]) -> Vec<MatchResult>
where
    M: Metric + ?Sized,
    S: AsRef<str> + Sync,
{
    map_indexed(choices, |i, choice| MatchResult {
        text: choice.as_ref().to_string(),
        score: metric.normalized_similarity(query, choice.as_ref()),
        index: i,
    })
}

/// Best `limit` choices by normalized similarity, highest first.
///
/// Choices scoring below `min_score` are dropped. Equal scores keep input
/// order.
///
/// # Errors
/// Returns `InvalidParameter` if `min_score` is outside [0.0, 1.0].
pub fn extract<M, S>(metric: &M, query: &str, choices: &[S], limit: usize, min_score: f64) -> Result<Vec<MatchResult>>
where
    M: Metric + ?Sized,
    S: AsRef<str> + Sync,
{
    let min_score = check_unit_interval("min_score", min_score)?;
    let mut results: Vec<MatchResult> = scored(metric, query, choices)
        .into_iter()
        .filter(|r| r.score >= min_score)
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(limit);
    Ok(results)
}

/// The single best choice, if any reaches `min_score`.
///
/// On ties the earliest choice wins.
///
/// # Errors
/// Returns `InvalidParameter` if `min_score` is outside [0.0, 1.0].
pub fn extract_one<M, S>(metric: &M, query: &str, choices: &[S], min_score: f64) -> Result<Option<MatchResult>>
where
    M: Metric + ?Sized,
    S: AsRef<str> + Sync,
{
    let min_score = check_unit_interval("min_score", min_score)?;
    Ok(scored(metric, query, choices)
        .into_iter()
        .filter(|r| r.score >= min_score)
        .reduce(|best, r| if r.score > best.score { r } else { best }))
}
