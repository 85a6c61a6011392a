//! pipeline — end-to-end extremum detection for a curve model.
//!
//! Purpose
//! -------
//! Provide one entry point that chains the posterior sampler, the
//! finite-difference estimator, the quantile summarizer, and the candidate
//! detector, configured by [`PipelineOptions`].
//!
//! Downstream usage
//! ----------------
//! - Build a [`CurveModel`](crate::posterior::CurveModel) (for example a
//!   [`PolynomialPosterior`](crate::posterior::PolynomialPosterior)) and an
//!   [`EvaluationGrid`](crate::grid::EvaluationGrid), then call
//!   [`run_pipeline`]. Callers that manage their own generator use
//!   [`run_pipeline_with_rng`].

pub mod options;
pub mod run;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::options::{DEFAULT_N_DRAWS, DEFAULT_SEED, PipelineOptions};
pub use self::run::{PipelineOutcome, run_pipeline, run_pipeline_with_rng};

pub mod prelude {
    pub use super::options::PipelineOptions;
    pub use super::run::{PipelineOutcome, run_pipeline, run_pipeline_with_rng};
}
