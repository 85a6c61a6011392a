//! posterior — from a fitted curve's posterior to simulated curves.
//!
//! Purpose
//! -------
//! Turn a Gaussian posterior over basis coefficients into a matrix of
//! simulated curves on an evaluation grid. These simulated curves carry the
//! fit's estimation uncertainty into every derivative summary downstream.
//!
//! Key behaviors
//! -------------
//! - [`CurveModel`] is the seam to the external smoother: posterior mean,
//!   posterior covariance, and basis evaluation on a grid.
//! - [`sample_coefficients`] draws `S` coefficient vectors from
//!   `N(β̂, V)` using a caller-supplied (seedable) generator.
//! - [`evaluate_draws`] multiplies the `n × k` design matrix by the
//!   `k × S` draws; [`simulate_curve`] chains both steps.
//!
//! Invariants & assumptions
//! ------------------------
//! - The posterior covariance is symmetric positive semi-definite.
//! - All randomness is consumed here and nowhere else in the crate.
//!
//! Downstream usage
//! ----------------
//! - `derivatives` consumes the resulting [`SimulationMatrix`]; the
//!   `pipeline` module threads the generator and draw count through.

pub mod evaluator;
pub mod model;
pub mod sampler;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::evaluator::{SimulationMatrix, evaluate_draws, simulate_curve};
pub use self::model::{CurveModel, PolynomialPosterior};
pub use self::sampler::{covariance_factor, sample_coefficients};

pub mod prelude {
    pub use super::evaluator::{SimulationMatrix, evaluate_draws, simulate_curve};
    pub use super::model::{CurveModel, PolynomialPosterior};
    pub use super::sampler::sample_coefficients;
}
