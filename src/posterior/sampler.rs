//! posterior::sampler — multivariate-normal draws of basis coefficients.
//!
//! Purpose
//! -------
//! Draw `S` coefficient vectors `β⁽ˢ⁾ ~ N(β̂, V)` from the posterior of a
//! fitted curve. Each draw is one plausible realization of the curve and is
//! the unit through which estimation uncertainty reaches the derivative
//! bands downstream.
//!
//! Key behaviors
//! -------------
//! - Validate the mean/covariance pair (square, matching, finite,
//!   symmetric) before any randomness is consumed.
//! - Factor `V = L Lᵀ` by Cholesky; when `V` is only positive
//!   semi-definite, fall back to the symmetric-eigen square root
//!   `L = Q diag(√λ⁺)` with tiny negative eigenvalues clamped to zero.
//! - Transform standard-normal vectors `z` into `β̂ + L z`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Randomness comes only from the caller's generator; seeding it is the
//!   caller's responsibility. The same seed yields the same draws.
//! - Output is `S × k`: one row per draw, one column per coefficient.
//!
//! Conventions
//! -----------
//! - Linear algebra runs in `nalgebra`; inputs and outputs stay `ndarray`.
//!   Conversions happen at the boundary of [`covariance_factor`].
use crate::errors::{ExtremaError, ExtremaResult};
use nalgebra::{Cholesky, DMatrix};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::{Rng, distributions::Distribution};
use statrs::distribution::Normal;

/// Relative tolerance for the covariance symmetry check.
pub const SYMMETRY_RTOL: f64 = 1e-8;

/// Eigenvalues below `-EIGEN_RTOL · max|λ|` mark the covariance as indefinite.
pub const EIGEN_RTOL: f64 = 1e-10;

/// sample_coefficients — draw from `N(mean, covariance)`.
///
/// Parameters
/// ----------
/// - `mean`: `ArrayView1<f64>`
///   Posterior mean, length `k ≥ 1`.
/// - `covariance`: `ArrayView2<f64>`
///   Symmetric PSD `k × k` posterior covariance.
/// - `n_draws`: `usize`
///   Number of draws `S ≥ 1`.
/// - `rng`: `&mut R`
///   Source of randomness.
///
/// Returns
/// -------
/// `ExtremaResult<Array2<f64>>`
///   `S × k` matrix of jointly normal draws.
///
/// Errors
/// ------
/// - `InvalidDrawCount` when `n_draws == 0`.
/// - `NonSquareCovariance` / `DimensionMismatch` for incompatible shapes.
/// - `NonFiniteValue` for NaN/±∞ entries.
/// - `CovarianceFactorization` when the covariance is asymmetric or
///   indefinite beyond tolerance.
pub fn sample_coefficients<R: Rng + ?Sized>(
    mean: ArrayView1<'_, f64>, covariance: ArrayView2<'_, f64>, n_draws: usize, rng: &mut R,
) -> ExtremaResult<Array2<f64>> {
    if n_draws == 0 {
        return Err(ExtremaError::InvalidDrawCount { n_draws });
    }
    validate_posterior(mean, covariance)?;

    let k = mean.len();
    let factor = covariance_factor(covariance)?;
    let normal = Normal::new(0.0, 1.0)?;

    let z = Array2::from_shape_fn((n_draws, k), |_| normal.sample(&mut *rng));
    let mut draws = z.dot(&factor.t());
    draws += &mean;

    tracing::debug!(n_draws, k, "sampled posterior coefficients");
    Ok(draws)
}

/// covariance_factor — `L` with `L Lᵀ = covariance`.
///
/// Tries Cholesky first. If that fails (singular or numerically PSD
/// covariance), falls back to `Q diag(√max(λ, 0))` from the symmetric
/// eigendecomposition.
///
/// # Errors
/// `CovarianceFactorization` if the matrix is asymmetric or has an
/// eigenvalue below `-EIGEN_RTOL · max|λ|`.
pub fn covariance_factor(covariance: ArrayView2<'_, f64>) -> ExtremaResult<Array2<f64>> {
    let k = covariance.nrows();
    let scale = covariance.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);
    for i in 0..k {
        for j in 0..i {
            if (covariance[[i, j]] - covariance[[j, i]]).abs() > SYMMETRY_RTOL * scale {
                return Err(ExtremaError::CovarianceFactorization {
                    reason: "covariance is not symmetric",
                });
            }
        }
    }

    let cov_nalg = DMatrix::from_fn(k, k, |i, j| covariance[[i, j]]);
    if let Some(chol) = Cholesky::new(cov_nalg.clone()) {
        let l = chol.l();
        return Ok(Array2::from_shape_fn((k, k), |(i, j)| l[(i, j)]));
    }

    tracing::warn!(k, "Cholesky factorization failed; using eigen square root");
    let eigen = cov_nalg.symmetric_eigen();
    let max_abs = eigen.eigenvalues.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if eigen.eigenvalues.iter().any(|&lambda| lambda < -EIGEN_RTOL * max_abs.max(1.0)) {
        return Err(ExtremaError::CovarianceFactorization {
            reason: "covariance is not positive semi-definite",
        });
    }
    let roots: Vec<f64> = eigen.eigenvalues.iter().map(|&lambda| lambda.max(0.0).sqrt()).collect();
    let q = &eigen.eigenvectors;
    Ok(Array2::from_shape_fn((k, k), |(i, j)| q[(i, j)] * roots[j]))
}

// ---- Helper methods ----

/// Shape and finiteness checks shared by every consumer of a posterior
/// (mean, covariance) pair.
pub(crate) fn validate_posterior(
    mean: ArrayView1<'_, f64>, covariance: ArrayView2<'_, f64>,
) -> ExtremaResult<()> {
    let (rows, cols) = covariance.dim();
    if rows != cols {
        return Err(ExtremaError::NonSquareCovariance { rows, cols });
    }
    if mean.is_empty() {
        return Err(ExtremaError::DimensionMismatch {
            context: "posterior mean length",
            expected: 1,
            found: 0,
        });
    }
    if rows != mean.len() {
        return Err(ExtremaError::DimensionMismatch {
            context: "covariance size vs mean length",
            expected: mean.len(),
            found: rows,
        });
    }
    if let Some((index, &value)) = mean.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ExtremaError::NonFiniteValue { context: "posterior mean", index, value });
    }
    if let Some((index, &value)) = covariance.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ExtremaError::NonFiniteValue { context: "posterior covariance", index, value });
    }
    Ok(())
}
