//! pipeline::run — orchestrate sampling, differencing, summaries, detection.
//!
//! Purpose
//! -------
//! Execute the full extremum-detection chain for one curve model:
//!
//! 1. simulate `S` curves on the grid from the coefficient posterior,
//! 2. take first and second centered differences of every curve,
//! 3. summarize function values and both derivatives into quantile bands,
//! 4. reduce the derivative bands to (lower, upper) and run the detector.
//!
//! Key behaviors
//! -------------
//! - [`run_pipeline`] owns generator construction (`Xoshiro256PlusPlus`,
//!   seeded from `opts.seed` or OS entropy). [`run_pipeline_with_rng`]
//!   accepts any caller-supplied generator instead.
//! - Every stage emits a `tracing` debug event with its output shape.
//! - All randomness is consumed in step 1; steps 2–4 are deterministic.
//!
//! Invariants & assumptions
//! ------------------------
//! - The model's design matrix has one row per grid point.
//! - `opts` was built through [`PipelineOptions::new`] or `Default`, so it
//!   carries at least one draw and two probabilities.
use crate::{
    derivatives::{
        band::ConfidenceBand,
        finite_diff::{first_derivative, second_derivative},
        quantile::summarize_draws,
    },
    errors::ExtremaResult,
    extrema::detector::{CandidateMask, detect_candidates},
    grid::EvaluationGrid,
    pipeline::options::PipelineOptions,
    posterior::{evaluator::simulate_curve, model::CurveModel},
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// PipelineOutcome — bands and candidates from one pipeline run.
///
/// All bands are `n × m` with `m = opts.probabilities.len()`; derivative
/// bands have undefined first and last rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub grid: EvaluationGrid,
    pub function_band: ConfidenceBand,
    pub first_derivative_band: ConfidenceBand,
    pub second_derivative_band: ConfidenceBand,
    pub candidates: CandidateMask,
}

impl PipelineOutcome {
    /// Grid locations of the flagged points, in ascending order.
    pub fn candidate_points(&self) -> Vec<f64> {
        self.candidates
            .as_slice()
            .iter()
            .zip(self.grid.points().iter())
            .filter_map(|(&flag, &x)| flag.then_some(x))
            .collect()
    }
}

/// run_pipeline — full detection run with an internally seeded generator.
///
/// # Errors
/// Propagates every stage's error: shape mismatches between model and
/// grid, covariance factorization failures, and detector errors.
pub fn run_pipeline<M>(
    model: &M, grid: &EvaluationGrid, opts: &PipelineOptions,
) -> ExtremaResult<PipelineOutcome>
where
    M: CurveModel + ?Sized,
{
    let mut rng = match opts.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };
    run_pipeline_with_rng(model, grid, opts, &mut rng)
}

/// run_pipeline_with_rng — full detection run drawing from `rng`.
///
/// `opts.seed` is ignored; the generator state fully determines the draws.
pub fn run_pipeline_with_rng<M, R>(
    model: &M, grid: &EvaluationGrid, opts: &PipelineOptions, rng: &mut R,
) -> ExtremaResult<PipelineOutcome>
where
    M: CurveModel + ?Sized,
    R: Rng + ?Sized,
{
    let simulated = simulate_curve(model, grid, opts.n_draws, rng)?;
    tracing::debug!(
        n_points = simulated.nrows(),
        n_draws = simulated.ncols(),
        n_coefficients = model.n_coefficients(),
        "simulated posterior curves"
    );

    let step = grid.step();
    let d1 = first_derivative(simulated.view(), step)?;
    let d2 = second_derivative(simulated.view(), step)?;
    tracing::debug!(step, "estimated first and second derivatives");

    let function_band = summarize_draws(simulated.view(), &opts.probabilities)?;
    let first_derivative_band = summarize_draws(d1.view(), &opts.probabilities)?;
    let second_derivative_band = summarize_draws(d2.view(), &opts.probabilities)?;
    tracing::debug!(
        n_points = function_band.n_points(),
        n_columns = function_band.n_columns(),
        "summarized quantile bands"
    );

    let candidates = detect_candidates(
        &first_derivative_band.outer_bounds()?,
        &second_derivative_band.outer_bounds()?,
        opts.policy,
    )?;

    Ok(PipelineOutcome {
        grid: grid.clone(),
        function_band,
        first_derivative_band,
        second_derivative_band,
        candidates,
    })
}
