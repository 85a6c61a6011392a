//! grid — evenly spaced evaluation grid shared by every pipeline stage.
//!
//! The finite-difference estimators in `derivatives` assume the grid step is
//! the exact spacing between neighbouring rows, so the grid validates
//! uniform spacing once at construction and exposes the step it measured.
use crate::errors::{ExtremaError, ExtremaResult};
use ndarray::Array1;

/// Relative tolerance (in units of the step) when checking that gaps agree.
pub const SPACING_RTOL: f64 = 1e-8;

/// Rounding allowance per gap, in ulps of the larger coordinate.
const SPACING_ULPS: f64 = 4.0;

/// Smallest grid that has at least one interior point.
pub const MIN_GRID_POINTS: usize = 3;

/// EvaluationGrid — strictly increasing, uniformly spaced x positions.
///
/// Invariants
/// ----------
/// - `points.len() >= 3`.
/// - Every point is finite.
/// - `|points[i + 1] - points[i] - step| <= SPACING_RTOL · step + 4 ε · max(|points[i]|, |points[i + 1]|)`
///   for all `i`: relative to the step, plus the rounding unavoidable at the
///   magnitude of the coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationGrid {
    points: Array1<f64>,
    step: f64,
}

impl EvaluationGrid {
    /// Build a grid from explicit positions.
    ///
    /// The step is taken as the mean gap `(x_n - x_1) / (n - 1)` so that
    /// small rounding differences between gaps do not bias derivatives.
    ///
    /// # Errors
    /// - `InvalidGrid` if fewer than three points are given, the points are
    ///   not strictly increasing, or the spacing is not uniform.
    /// - `NonFiniteValue` if any point is NaN or infinite.
    pub fn new(points: Array1<f64>) -> ExtremaResult<Self> {
        let n = points.len();
        if n < MIN_GRID_POINTS {
            return Err(ExtremaError::InvalidGrid {
                reason: "at least 3 points are required for centered differences",
            });
        }
        for (index, &value) in points.iter().enumerate() {
            if !value.is_finite() {
                return Err(ExtremaError::NonFiniteValue { context: "evaluation grid", index, value });
            }
        }

        let step = (points[n - 1] - points[0]) / ((n - 1) as f64);
        if step <= 0.0 {
            return Err(ExtremaError::InvalidGrid { reason: "points must be strictly increasing" });
        }
        for window in points.windows(2) {
            let gap = window[1] - window[0];
            if gap <= 0.0 {
                return Err(ExtremaError::InvalidGrid {
                    reason: "points must be strictly increasing",
                });
            }
            let rounding = SPACING_ULPS * f64::EPSILON * window[0].abs().max(window[1].abs());
            if (gap - step).abs() > SPACING_RTOL * step + rounding {
                return Err(ExtremaError::InvalidGrid { reason: "spacing must be uniform" });
            }
        }

        Ok(EvaluationGrid { points, step })
    }

    /// Build `n` evenly spaced points from `start` to `end` inclusive.
    ///
    /// # Errors
    /// Same as [`EvaluationGrid::new`]; in particular `start >= end` or
    /// `n < 3` are rejected.
    pub fn linspace(start: f64, end: f64, n: usize) -> ExtremaResult<Self> {
        if n < MIN_GRID_POINTS {
            return Err(ExtremaError::InvalidGrid {
                reason: "at least 3 points are required for centered differences",
            });
        }
        EvaluationGrid::new(Array1::linspace(start, end, n))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Grid spacing δ.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &Array1<f64> {
        &self.points
    }
}
