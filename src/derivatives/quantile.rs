//! derivatives::quantile — per-row empirical quantiles across draws.
//!
//! Purpose
//! -------
//! Reduce an `n × S` matrix of draws (function values or derivatives) to a
//! [`ConfidenceBand`] by computing, independently for each row, the
//! empirical quantiles at a validated set of [`Probabilities`].
//!
//! Key behaviors
//! -------------
//! - Quantiles use linear interpolation between order statistics
//!   (Hyndman & Fan type 7): with sorted values `x₍₀₎ ≤ … ≤ x₍ₘ₋₁₎` and
//!   `h = (m − 1)·p`, `Q(p) = x₍⌊h⌋₎ + (h − ⌊h⌋)(x₍⌊h⌋+1₎ − x₍⌊h⌋₎)`.
//! - Undefined entries (`None` or NaN) are dropped row by row; a row with
//!   no remaining values becomes an undefined band row.
//! - With the `parallel` feature, rows are reduced on the rayon pool. Each
//!   row is independent, so results are identical to the serial path.
//!
//! Invariants & assumptions
//! ------------------------
//! - Deterministic for a given input; no randomness.
//! - Probabilities are non-decreasing, so defined band rows are
//!   non-decreasing across columns.
use crate::{
    derivatives::band::ConfidenceBand,
    errors::{ExtremaError, ExtremaResult},
};
use ndarray::{Array2, ArrayView1, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Probabilities — non-empty, non-decreasing values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities(Vec<f64>);

impl Probabilities {
    /// Validate a probability set.
    ///
    /// # Errors
    /// - `DimensionMismatch` for an empty set.
    /// - `InvalidProbability` for a value outside `[0, 1]` or a value smaller
    ///   than its predecessor.
    pub fn new(values: Vec<f64>) -> ExtremaResult<Self> {
        if values.is_empty() {
            return Err(ExtremaError::DimensionMismatch {
                context: "probability count",
                expected: 1,
                found: 0,
            });
        }
        let mut previous = 0.0;
        for &value in &values {
            if !(0.0..=1.0).contains(&value) || value < previous {
                return Err(ExtremaError::InvalidProbability { value });
            }
            previous = value;
        }
        Ok(Probabilities(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Probabilities {
    /// Median with a two-sided 95% interval: {0.025, 0.5, 0.975}.
    fn default() -> Self {
        Probabilities(vec![0.025, 0.5, 0.975])
    }
}

/// linear_quantile — type-7 quantile of an ascending, non-empty slice.
///
/// # Panics
/// Panics if `sorted` is empty. `p` is assumed to lie in `[0, 1]`.
pub fn linear_quantile(sorted: &[f64], p: f64) -> f64 {
    let m = sorted.len();
    if m == 1 {
        return sorted[0];
    }
    let h = (m - 1) as f64 * p;
    let lo = (h.floor() as usize).min(m - 1);
    let hi = (lo + 1).min(m - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// summarize_draws — per-row quantile band of an `n × S` matrix.
///
/// Accepts plain `f64` matrices (simulated curves) as well as
/// `Option<f64>` matrices (derivative draws with undefined edges).
///
/// # Errors
/// Never fails for a validated [`Probabilities`]; the `Result` mirrors the
/// other pipeline stages.
pub fn summarize_draws<T>(
    values: ArrayView2<'_, T>, probabilities: &Probabilities,
) -> ExtremaResult<ConfidenceBand>
where
    T: Copy + Into<Option<f64>> + Send + Sync,
{
    let n = values.nrows();
    let probs = probabilities.as_slice();

    #[cfg(feature = "parallel")]
    let rows: Vec<Option<Vec<f64>>> =
        (0..n).into_par_iter().map(|i| summarize_row(values.row(i), probs)).collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Option<Vec<f64>>> = (0..n).map(|i| summarize_row(values.row(i), probs)).collect();

    let band = Array2::from_shape_fn((n, probs.len()), |(i, j)| rows[i].as_ref().map(|q| q[j]));
    ConfidenceBand::new(probs.to_vec(), band)
}

// ---- Helper methods ----

fn summarize_row<T>(row: ArrayView1<'_, T>, probs: &[f64]) -> Option<Vec<f64>>
where
    T: Copy + Into<Option<f64>>,
{
    let mut defined: Vec<f64> = row
        .iter()
        .filter_map(|&v| Into::<Option<f64>>::into(v))
        .filter(|v| !v.is_nan())
        .collect();
    if defined.is_empty() {
        return None;
    }
    defined.sort_by(|a, b| a.total_cmp(b));
    Some(probs.iter().map(|&p| linear_quantile(&defined, p)).collect())
}
