//! derivatives::finite_diff — centered differences across simulated curves.
//!
//! Purpose
//! -------
//! Approximate first and second derivatives of every simulated curve on a
//! uniform grid with the centered two-point rules
//!
//! ```text
//! f'(xᵢ)  ≈ (yᵢ₊₁ − yᵢ₋₁) / (2δ)
//! f''(xᵢ) ≈ (yᵢ₊₁ + yᵢ₋₁ − 2yᵢ) / δ²
//! ```
//!
//! applied independently to each column (draw) of an `n × S` matrix.
//!
//! Key behaviors
//! -------------
//! - Interior rows `1..n-1` (0-based) carry `Some(value)`.
//! - Rows `0` and `n-1` have no symmetric neighbours and are emitted as
//!   `None` in every column. They are never filled with a number here; the
//!   detector resolves them later by edge substitution on sign codes.
//!
//! Invariants & assumptions
//! ------------------------
//! - `step` must be the exact grid spacing. A mismatched `step` silently
//!   rescales every derivative and is not detectable from the values
//!   alone; callers that hold an [`EvaluationGrid`](crate::grid::EvaluationGrid)
//!   should pass `grid.step()`.
//! - The input has at least three rows.
//!
//! Testing notes
//! -------------
//! - Linear and quadratic inputs, whose derivatives are known in closed
//!   form, check both stencils; edge rows are checked to be `None`.
use crate::errors::{ExtremaError, ExtremaResult};
use ndarray::{Array2, ArrayView2, s};

/// Which derivative a [`DerivativeMatrix`] approximates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeOrder {
    First,
    Second,
}

/// DerivativeMatrix — `n × S` derivative draws with undefined edge rows.
///
/// Entries are `Option<f64>`; `None` marks a structurally undefined value.
/// For matrices produced by this module exactly the first and last rows are
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeMatrix {
    values: Array2<Option<f64>>,
    order: DerivativeOrder,
}

impl DerivativeMatrix {
    pub fn view(&self) -> ArrayView2<'_, Option<f64>> {
        self.values.view()
    }

    pub fn order(&self) -> DerivativeOrder {
        self.order
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// `true` when at least one draw in `row` is defined.
    pub fn row_is_defined(&self, row: usize) -> bool {
        self.values.row(row).iter().any(Option::is_some)
    }
}

/// first_derivative — centered first difference of each column.
///
/// # Errors
/// - `InvalidStepSize` if `step` is not finite and strictly positive.
/// - `DimensionMismatch` if `values` has fewer than three rows.
pub fn first_derivative(values: ArrayView2<'_, f64>, step: f64) -> ExtremaResult<DerivativeMatrix> {
    estimate_derivative(values, step, DerivativeOrder::First)
}

/// second_derivative — centered second difference of each column.
///
/// # Errors
/// Same as [`first_derivative`].
pub fn second_derivative(values: ArrayView2<'_, f64>, step: f64) -> ExtremaResult<DerivativeMatrix> {
    estimate_derivative(values, step, DerivativeOrder::Second)
}

/// estimate_derivative — dispatch on [`DerivativeOrder`].
pub fn estimate_derivative(
    values: ArrayView2<'_, f64>, step: f64, order: DerivativeOrder,
) -> ExtremaResult<DerivativeMatrix> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ExtremaError::InvalidStepSize { step });
    }
    let (n, n_draws) = values.dim();
    if n < 3 {
        return Err(ExtremaError::DimensionMismatch {
            context: "rows needed for centered differences",
            expected: 3,
            found: n,
        });
    }

    let prev = values.slice(s![..n - 2, ..]);
    let curr = values.slice(s![1..n - 1, ..]);
    let next = values.slice(s![2.., ..]);
    let interior = match order {
        DerivativeOrder::First => (&next - &prev) / (2.0 * step),
        DerivativeOrder::Second => (&next + &prev - &curr * 2.0) / (step * step),
    };

    let values = Array2::from_shape_fn((n, n_draws), |(i, j)| {
        if i == 0 || i == n - 1 { None } else { Some(interior[[i - 1, j]]) }
    });
    Ok(DerivativeMatrix { values, order })
}
