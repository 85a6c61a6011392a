//! posterior::model — the fitted-curve collaborator seen by the pipeline.
//!
//! Purpose
//! -------
//! Describe the smooth regression model as a black box: a Gaussian
//! posterior over basis coefficients plus an operator that evaluates the
//! basis on any grid. How the model was chosen and fitted is not this
//! crate's concern.
//!
//! Key behaviors
//! -------------
//! - [`CurveModel`] exposes the posterior mean `β̂` (length `k`), the
//!   posterior covariance `V` (`k × k`), and the design matrix `X(grid)`
//!   (`n × k`).
//! - [`PolynomialPosterior`] is a minimal concrete model over the monomial
//!   basis `1, x, …, x^{k-1}`. It lets the full pipeline run without an
//!   external fitting library, e.g. in tests or with coefficients and
//!   covariances computed elsewhere.
//!
//! Invariants & assumptions
//! ------------------------
//! - `design_matrix(grid)` returns exactly `grid.len()` rows and
//!   `coefficients().len()` columns.
//! - The covariance is symmetric positive semi-definite; the sampler checks
//!   symmetry and factorability, not this trait.
use crate::{errors::ExtremaResult, grid::EvaluationGrid, posterior::sampler::validate_posterior};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// CurveModel — posterior mean/covariance and basis evaluation.
///
/// Implementors wrap whatever smoother produced the posterior (penalized
/// splines, GAMs, Gaussian-process projections, …).
pub trait CurveModel {
    /// Posterior mean coefficient vector `β̂`.
    fn coefficients(&self) -> ArrayView1<'_, f64>;

    /// Posterior covariance `V` of the coefficients.
    fn covariance(&self) -> ArrayView2<'_, f64>;

    /// Evaluate the basis on `grid`, one row per grid point.
    fn design_matrix(&self, grid: &EvaluationGrid) -> ExtremaResult<Array2<f64>>;

    fn n_coefficients(&self) -> usize {
        self.coefficients().len()
    }
}

/// PolynomialPosterior — Gaussian posterior over monomial coefficients.
///
/// Fields
/// ------
/// - `mean`: `Array1<f64>`
///   Coefficients of `1, x, x², …` in that order.
/// - `covariance`: `Array2<f64>`
///   `k × k` posterior covariance, `k = mean.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialPosterior {
    mean: Array1<f64>,
    covariance: Array2<f64>,
}

impl PolynomialPosterior {
    /// Construct a validated polynomial posterior.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `mean` is empty.
    /// - `NonSquareCovariance` if `covariance` is not square.
    /// - `DimensionMismatch` if its size differs from `mean.len()`.
    /// - `NonFiniteValue` for NaN/±∞ entries in either input.
    pub fn new(mean: Array1<f64>, covariance: Array2<f64>) -> ExtremaResult<Self> {
        validate_posterior(mean.view(), covariance.view())?;
        Ok(PolynomialPosterior { mean, covariance })
    }

    /// Polynomial degree, `k - 1`.
    pub fn degree(&self) -> usize {
        self.mean.len() - 1
    }
}

impl CurveModel for PolynomialPosterior {
    fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    fn covariance(&self) -> ArrayView2<'_, f64> {
        self.covariance.view()
    }

    fn design_matrix(&self, grid: &EvaluationGrid) -> ExtremaResult<Array2<f64>> {
        let k = self.mean.len();
        let points = grid.points();
        Ok(Array2::from_shape_fn((grid.len(), k), |(i, j)| points[i].powi(j as i32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExtremaError;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify that the monomial design matrix has the documented layout.
    //
    // Given
    // -----
    // - A quadratic posterior (k = 3) and the grid {0, 1, 2}.
    //
    // Expect
    // ------
    // - Rows are [1, x, x²] for each grid point.
    fn polynomial_design_matrix_is_monomial_basis() {
        // Arrange
        let model =
            PolynomialPosterior::new(array![0.0, 0.0, 1.0], Array2::zeros((3, 3))).expect("valid");
        let grid = EvaluationGrid::linspace(0.0, 2.0, 3).expect("valid grid");

        // Act
        let x = model.design_matrix(&grid).expect("design");

        // Assert
        assert_eq!(x.dim(), (3, 3));
        assert_relative_eq!(x[[2, 0]], 1.0);
        assert_relative_eq!(x[[2, 1]], 2.0);
        assert_relative_eq!(x[[2, 2]], 4.0);
        assert_eq!(model.degree(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure shape validation rejects non-square and mismatched covariances.
    //
    // Given
    // -----
    // - A 2-vector mean with a 2×3 covariance, then with a 3×3 covariance.
    //
    // Expect
    // ------
    // - `NonSquareCovariance`, then `DimensionMismatch`.
    fn polynomial_posterior_rejects_bad_covariance_shapes() {
        let non_square = PolynomialPosterior::new(array![0.0, 1.0], Array2::zeros((2, 3)));
        let mismatched = PolynomialPosterior::new(array![0.0, 1.0], Array2::eye(3));

        assert!(matches!(
            non_square,
            Err(ExtremaError::NonSquareCovariance { rows: 2, cols: 3 })
        ));
        assert!(matches!(
            mismatched,
            Err(ExtremaError::DimensionMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The model constructor and the sampler apply the same posterior checks.
    //
    // Given
    // -----
    // - An empty mean, an infinite mean entry, and an infinite covariance
    //   entry.
    //
    // Expect
    // ------
    // - Identical errors from `PolynomialPosterior::new` and
    //   `sample_coefficients`.
    fn polynomial_posterior_validates_like_the_sampler() {
        use crate::posterior::sampler::sample_coefficients;
        use rand::SeedableRng;
        use rand_xoshiro::Xoshiro256PlusPlus;

        let cases = vec![
            (Array1::<f64>::zeros(0), Array2::<f64>::zeros((0, 0))),
            (array![0.0, f64::INFINITY], Array2::eye(2)),
            (array![0.0, 1.0], array![[1.0, f64::INFINITY], [0.0, 1.0]]),
        ];
        for (mean, covariance) in cases {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
            let from_sampler = sample_coefficients(mean.view(), covariance.view(), 10, &mut rng)
                .expect_err("invalid posterior");

            let from_model = PolynomialPosterior::new(mean, covariance).expect_err("invalid posterior");

            assert_eq!(from_model, from_sampler);
        }
    }
}
