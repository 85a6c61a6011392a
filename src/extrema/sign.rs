//! extrema::sign — tri-state sign codes of interval bands.
//!
//! Purpose
//! -------
//! Summarize each row of a (lower, upper) band as a [`SignCode`]: the
//! interval lies entirely above zero, entirely below zero, or straddles it.
//! The detector works exclusively on these codes.
//!
//! Key behaviors
//! -------------
//! - [`SignCode::from_bounds`] is a pure function of the two bounds; draw
//!   order and the median never enter.
//! - [`sign_codes`] maps every band row to `Some(code)`, or `None` for an
//!   undefined row. An undefined row is never read as a straddle.
//! - [`substitute_edge_signs`] is the named post-processing step for
//!   finite-difference edge effects: the first code is replaced by the
//!   second and the last by the second-to-last. Any interior row that is
//!   still undefined afterwards is an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Zero bounds count as straddling: a code is nonzero only when both
//!   bounds are strictly on the same side of zero.
use crate::{
    derivatives::band::ConfidenceBand,
    errors::{ExtremaError, ExtremaResult},
};

/// SignCode — where a confidence interval sits relative to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignCode {
    /// Both bounds strictly negative (−1).
    Negative,
    /// Bounds of opposite sign, or touching zero (0).
    Straddle,
    /// Both bounds strictly positive (+1).
    Positive,
}

impl SignCode {
    pub fn from_bounds(lower: f64, upper: f64) -> SignCode {
        if lower > 0.0 && upper > 0.0 {
            SignCode::Positive
        } else if lower < 0.0 && upper < 0.0 {
            SignCode::Negative
        } else {
            SignCode::Straddle
        }
    }

    /// Numeric value in {−1, 0, +1}.
    pub fn value(self) -> i8 {
        match self {
            SignCode::Negative => -1,
            SignCode::Straddle => 0,
            SignCode::Positive => 1,
        }
    }

    pub fn is_straddle(self) -> bool {
        self == SignCode::Straddle
    }
}

/// sign_codes — per-row sign codes of a band's outermost columns.
///
/// Undefined rows map to `None`.
pub fn sign_codes(band: &ConfidenceBand) -> Vec<Option<SignCode>> {
    (0..band.n_points())
        .map(|i| band.bounds(i).map(|(lower, upper)| SignCode::from_bounds(lower, upper)))
        .collect()
}

/// substitute_edge_signs — resolve the two edge codes from their neighbours.
///
/// Output `[0]` takes the code at index 1 and output `[n-1]` takes the code
/// at index `n-2`, whether or not the edges were defined. All interior codes
/// are passed through.
///
/// # Errors
/// - `DimensionMismatch` if fewer than three codes are given.
/// - `UndefinedRow { row }` for the first interior row that is `None`.
pub fn substitute_edge_signs(codes: &[Option<SignCode>]) -> ExtremaResult<Vec<SignCode>> {
    let n = codes.len();
    if n < 3 {
        return Err(ExtremaError::DimensionMismatch {
            context: "sign codes needed for edge substitution",
            expected: 3,
            found: n,
        });
    }

    let mut resolved = Vec::with_capacity(n);
    for (row, code) in codes.iter().enumerate().take(n - 1).skip(1) {
        resolved.push(code.ok_or(ExtremaError::UndefinedRow { row })?);
    }
    let first = resolved[0];
    let last = resolved[resolved.len() - 1];
    resolved.insert(0, first);
    resolved.push(last);
    Ok(resolved)
}
