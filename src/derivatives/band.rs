//! derivatives::band — pointwise confidence bands over the grid.
//!
//! A [`ConfidenceBand`] stores, for each grid point, the empirical quantiles
//! of the simulated draws at a fixed set of probabilities. Rows are
//! calibrated independently (no multiplicity correction). A row whose draws
//! were all undefined is stored as all `None`.
use crate::errors::{ExtremaError, ExtremaResult};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// ConfidenceBand — `n × m` quantile summary, one column per probability.
///
/// Invariants
/// ----------
/// - `values.ncols() == probabilities.len()`.
/// - Each row is either entirely `Some` or entirely `None`.
/// - For probabilities in non-decreasing order, defined rows are
///   non-decreasing left to right (lower ≤ median ≤ upper).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand {
    probabilities: Vec<f64>,
    values: Array2<Option<f64>>,
}

impl ConfidenceBand {
    /// Construct a band from explicit quantile values.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the column count differs from the number of
    ///   probabilities, or a row mixes defined and undefined entries.
    pub fn new(probabilities: Vec<f64>, values: Array2<Option<f64>>) -> ExtremaResult<Self> {
        if values.ncols() != probabilities.len() {
            return Err(ExtremaError::DimensionMismatch {
                context: "band columns vs probabilities",
                expected: probabilities.len(),
                found: values.ncols(),
            });
        }
        for row in values.rows() {
            let defined = row.iter().filter(|v| v.is_some()).count();
            if defined != 0 && defined != row.len() {
                return Err(ExtremaError::DimensionMismatch {
                    context: "defined entries in band row",
                    expected: row.len(),
                    found: defined,
                });
            }
        }
        Ok(ConfidenceBand { probabilities, values })
    }

    /// Build a two-column (lower, upper) band from per-point intervals.
    ///
    /// `None` entries mark undefined rows. Useful when bands come from
    /// outside this crate.
    ///
    /// # Errors
    /// `InvalidProbability` unless `0 ≤ lower_p ≤ upper_p ≤ 1`.
    pub fn from_intervals(
        intervals: &[Option<(f64, f64)>], lower_p: f64, upper_p: f64,
    ) -> ExtremaResult<Self> {
        for p in [lower_p, upper_p] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ExtremaError::InvalidProbability { value: p });
            }
        }
        if lower_p > upper_p {
            return Err(ExtremaError::InvalidProbability { value: upper_p });
        }
        let values = Array2::from_shape_fn((intervals.len(), 2), |(i, j)| {
            intervals[i].map(|(lo, hi)| if j == 0 { lo } else { hi })
        });
        Ok(ConfidenceBand { probabilities: vec![lower_p, upper_p], values })
    }

    pub fn n_points(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn values(&self) -> ArrayView2<'_, Option<f64>> {
        self.values.view()
    }

    pub fn column(&self, col: usize) -> ArrayView1<'_, Option<f64>> {
        self.values.column(col)
    }

    /// Quantiles at `row`, or `None` if the row is undefined.
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        self.values.row(row).iter().copied().collect()
    }

    /// Outermost (first, last) values at `row`, or `None` if undefined.
    pub fn bounds(&self, row: usize) -> Option<(f64, f64)> {
        let last = self.n_columns().checked_sub(1)?;
        Some((self.values[[row, 0]]?, self.values[[row, last]]?))
    }

    /// Keep only the first and last columns, i.e. the interval bounds.
    ///
    /// # Errors
    /// `BoundColumns` if the band has fewer than two columns.
    pub fn outer_bounds(&self) -> ExtremaResult<ConfidenceBand> {
        let m = self.n_columns();
        if m < 2 {
            return Err(ExtremaError::BoundColumns { band: "confidence", found: m });
        }
        let values = Array2::from_shape_fn((self.n_points(), 2), |(i, j)| {
            let col = if j == 0 { 0 } else { m - 1 };
            self.values[[i, col]]
        });
        Ok(ConfidenceBand {
            probabilities: vec![self.probabilities[0], self.probabilities[m - 1]],
            values,
        })
    }
}
