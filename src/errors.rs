//! errors — crate-wide error type for the extremum-detection pipeline.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`ExtremaError`], and result alias,
//! [`ExtremaResult`], shared by every stage of the pipeline: grid
//! construction, posterior sampling, curve evaluation, finite differences,
//! quantile summaries, and candidate detection.
//!
//! Key behaviors
//! -------------
//! - Group failures into three classes: shape mismatches between stages,
//!   unsupported detection policies, and undefined rows that reach a
//!   sign computation.
//! - Carry enough payload (shapes, offending names, row indices) for a
//!   caller to diagnose the failure from the `Display` message alone.
//! - Wrap `statrs` distribution construction errors so that `?` works
//!   across the sampling boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - All variants are unrecoverable for a single pipeline invocation; the
//!   computation is deterministic given its inputs, so no retry exists.
//! - Variants are small and cloneable so they can be matched in tests and
//!   propagated through higher-level orchestration code.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads.

/// Crate-wide result alias.
pub type ExtremaResult<T> = Result<T, ExtremaError>;

/// ExtremaError — validation and runtime failures across the pipeline.
///
/// Variants
/// --------
/// The first three variants form the shape-mismatch class; callers that
/// only care about the class use [`ExtremaError::is_shape_mismatch`].
///
/// - `DimensionMismatch { context, expected, found }`
///   Two structurally coupled inputs disagree on a dimension (e.g. the
///   design matrix has `k` columns but the sample matrix has `k'` rows).
/// - `NonSquareCovariance { rows, cols }`
///   The posterior covariance is not a square matrix. Kept apart from
///   `DimensionMismatch` because both sizes come from the same input.
/// - `BoundColumns { band, found }`
///   A band passed to the detector does not have exactly two bound columns.
/// - `UnsupportedPolicy { name }`
///   A detection policy name outside `"two-deriv"` / `"crossing"`.
/// - `UndefinedRow { row }`
///   An interior band row has no defined draws and would otherwise enter a
///   sign computation.
/// - `InvalidGrid { reason }`, `InvalidStepSize { step }`,
///   `InvalidProbability { value }`, `InvalidDrawCount { n_draws }`,
///   `NonFiniteValue { context, index, value }`
///   Argument validation failures.
/// - `CovarianceFactorization { reason }`
///   Neither Cholesky nor the eigen square root produced a usable factor.
/// - `Distribution { text }`
///   Wrapper for `statrs::StatsError`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtremaError {
    // ---- Shape mismatches ----
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    NonSquareCovariance {
        rows: usize,
        cols: usize,
    },
    BoundColumns {
        band: &'static str,
        found: usize,
    },

    // ---- Detection policy ----
    UnsupportedPolicy {
        name: String,
    },

    // ---- Undefined rows ----
    UndefinedRow {
        row: usize,
    },

    // ---- Argument validation ----
    InvalidGrid {
        reason: &'static str,
    },
    InvalidStepSize {
        step: f64,
    },
    InvalidProbability {
        value: f64,
    },
    InvalidDrawCount {
        n_draws: usize,
    },
    NonFiniteValue {
        context: &'static str,
        index: usize,
        value: f64,
    },

    // ---- Numerical ----
    CovarianceFactorization {
        reason: &'static str,
    },
    Distribution {
        text: String,
    },
}

impl ExtremaError {
    /// `true` for `DimensionMismatch`, `NonSquareCovariance`, and
    /// `BoundColumns`.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            ExtremaError::DimensionMismatch { .. }
                | ExtremaError::NonSquareCovariance { .. }
                | ExtremaError::BoundColumns { .. }
        )
    }
}

impl std::error::Error for ExtremaError {}

impl std::fmt::Display for ExtremaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape mismatches ----
            ExtremaError::DimensionMismatch { context, expected, found } => {
                write!(f, "Dimension mismatch in {context}: expected {expected}, found {found}")
            }
            ExtremaError::NonSquareCovariance { rows, cols } => {
                write!(f, "Posterior covariance must be square, got {rows}x{cols}")
            }
            ExtremaError::BoundColumns { band, found } => {
                write!(f, "{band} band must have exactly 2 bound columns, found {found}")
            }

            // ---- Detection policy ----
            ExtremaError::UnsupportedPolicy { name } => write!(
                f,
                "'{name}' is not an implemented test. Valid options are 'two-deriv' or 'crossing'."
            ),

            // ---- Undefined rows ----
            ExtremaError::UndefinedRow { row } => {
                write!(f, "Band row {row} is undefined (no valid draws) and cannot be signed")
            }

            // ---- Argument validation ----
            ExtremaError::InvalidGrid { reason } => write!(f, "Invalid evaluation grid: {reason}"),
            ExtremaError::InvalidStepSize { step } => {
                write!(f, "Invalid step size {step}: must be finite and > 0")
            }
            ExtremaError::InvalidProbability { value } => {
                write!(f, "Invalid probability {value}: must lie in [0, 1] and be non-decreasing")
            }
            ExtremaError::InvalidDrawCount { n_draws } => {
                write!(f, "Invalid draw count {n_draws}: must be at least 1")
            }
            ExtremaError::NonFiniteValue { context, index, value } => {
                write!(f, "Non-finite value {value} at index {index} in {context}")
            }

            // ---- Numerical ----
            ExtremaError::CovarianceFactorization { reason } => {
                write!(f, "Could not factor posterior covariance: {reason}")
            }
            ExtremaError::Distribution { text } => write!(f, "Distribution error: {text}"),
        }
    }
}

impl From<statrs::StatsError> for ExtremaError {
    fn from(err: statrs::StatsError) -> Self {
        ExtremaError::Distribution { text: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages for the three error classes.
    //
    // They intentionally DO NOT cover:
    // - The conditions that raise each variant; those live next to the
    //   validating code.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `DimensionMismatch` reports context and both sizes.
    //
    // Given
    // -----
    // - A mismatch between 5 expected and 4 found rows.
    //
    // Expect
    // ------
    // - The message contains the context, "5" and "4".
    fn dimension_mismatch_display_includes_shapes() {
        // Arrange
        let err = ExtremaError::DimensionMismatch {
            context: "band point count",
            expected: 5,
            found: 4,
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("band point count"), "Got: {msg}");
        assert!(msg.contains('5') && msg.contains('4'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `UnsupportedPolicy` echoes the offending policy name.
    //
    // Given
    // -----
    // - A policy named "bogus".
    //
    // Expect
    // ------
    // - The message contains "bogus" and flags it as not implemented.
    fn unsupported_policy_display_includes_name() {
        // Arrange
        let err = ExtremaError::UnsupportedPolicy { name: "bogus".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("'bogus'"), "Got: {msg}");
        assert!(msg.contains("not an implemented test"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `UndefinedRow` reports the row index.
    //
    // Given
    // -----
    // - An undefined row at index 7.
    //
    // Expect
    // ------
    // - The message contains "7".
    fn undefined_row_display_includes_row() {
        let msg = ExtremaError::UndefinedRow { row: 7 }.to_string();
        assert!(msg.contains("row 7"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // A non-square covariance belongs to the shape-mismatch class, alongside
    // `DimensionMismatch` and `BoundColumns`.
    //
    // Given
    // -----
    // - One variant of each shape kind, plus an unrelated variant.
    //
    // Expect
    // ------
    // - `is_shape_mismatch` is true for the three shape variants only.
    fn non_square_covariance_is_a_shape_mismatch() {
        let shape_errors = [
            ExtremaError::NonSquareCovariance { rows: 2, cols: 3 },
            ExtremaError::DimensionMismatch { context: "design columns", expected: 3, found: 2 },
            ExtremaError::BoundColumns { band: "first-derivative", found: 3 },
        ];

        for err in &shape_errors {
            assert!(err.is_shape_mismatch(), "Got {err:?}");
        }
        assert!(!ExtremaError::UndefinedRow { row: 1 }.is_shape_mismatch());
    }
}
