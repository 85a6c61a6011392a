//! derivatives — finite-difference derivative draws and their quantile bands.
//!
//! Purpose
//! -------
//! Carry posterior uncertainty from simulated curves into derivative
//! space. Every simulated curve is differenced on the grid, and the
//! resulting draws are summarized pointwise into confidence bands.
//!
//! Key behaviors
//! -------------
//! - [`first_derivative`] / [`second_derivative`] apply centered two-point
//!   stencils to each column, returning a [`DerivativeMatrix`] whose edge
//!   rows are explicitly undefined.
//! - [`summarize_draws`] reduces any `n × S` matrix (plain or with
//!   undefined entries) to a [`ConfidenceBand`] at the requested
//!   [`Probabilities`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The step passed to the stencils equals the grid spacing.
//! - Band rows are calibrated independently; no simultaneous coverage is
//!   claimed.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`finite_diff`] check the stencils against closed-form
//!   derivatives of linear and quadratic curves.
//! - Unit tests in [`quantile`] check interpolation, degenerate rows, and
//!   undefined-row propagation.

pub mod band;
pub mod finite_diff;
pub mod quantile;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::band::ConfidenceBand;
pub use self::finite_diff::{
    DerivativeMatrix, DerivativeOrder, estimate_derivative, first_derivative, second_derivative,
};
pub use self::quantile::{Probabilities, linear_quantile, summarize_draws};

pub mod prelude {
    pub use super::band::ConfidenceBand;
    pub use super::finite_diff::{DerivativeMatrix, first_derivative, second_derivative};
    pub use super::quantile::{Probabilities, summarize_draws};
}
