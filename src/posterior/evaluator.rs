//! posterior::evaluator — map coefficient draws onto the evaluation grid.
//!
//! `SimulationMatrix = X · Bᵀ`, where `X` is the `n × k` design matrix and
//! `B` the `S × k` coefficient draws, giving one column per simulated curve.
use crate::{
    errors::{ExtremaError, ExtremaResult},
    grid::EvaluationGrid,
    posterior::{model::CurveModel, sampler::sample_coefficients},
};
use ndarray::{Array2, ArrayView2};
use rand::Rng;

/// `n × S` simulated function values; rows are grid points, columns draws.
pub type SimulationMatrix = Array2<f64>;

/// evaluate_draws — multiply the design matrix by a `k × S` sample matrix.
///
/// # Errors
/// `DimensionMismatch` if `design.ncols() != samples.nrows()`.
pub fn evaluate_draws(
    design: ArrayView2<'_, f64>, samples: ArrayView2<'_, f64>,
) -> ExtremaResult<SimulationMatrix> {
    if design.ncols() != samples.nrows() {
        return Err(ExtremaError::DimensionMismatch {
            context: "design columns vs sample rows",
            expected: design.ncols(),
            found: samples.nrows(),
        });
    }
    Ok(design.dot(&samples))
}

/// simulate_curve — sample the posterior and evaluate every draw on `grid`.
///
/// Runs the sampler and the evaluator back to back, checking that the
/// model's design matrix has one row per grid point.
///
/// # Errors
/// Propagates sampler and evaluator errors; `DimensionMismatch` if the
/// design matrix row count differs from `grid.len()`.
pub fn simulate_curve<M, R>(
    model: &M, grid: &EvaluationGrid, n_draws: usize, rng: &mut R,
) -> ExtremaResult<SimulationMatrix>
where
    M: CurveModel + ?Sized,
    R: Rng + ?Sized,
{
    let design = model.design_matrix(grid)?;
    if design.nrows() != grid.len() {
        return Err(ExtremaError::DimensionMismatch {
            context: "design rows vs grid length",
            expected: grid.len(),
            found: design.nrows(),
        });
    }
    let draws = sample_coefficients(model.coefficients(), model.covariance(), n_draws, rng)?;
    evaluate_draws(design.view(), draws.t())
}
