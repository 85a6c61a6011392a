//! extrema::detector — boolean candidate mask from derivative bands.
//!
//! Purpose
//! -------
//! Decide, for every grid point, whether it is a candidate location of a
//! local extremum, given (lower, upper) bands for the first and second
//! derivatives and a [`TestPolicy`].
//!
//! Key behaviors
//! -------------
//! - Both bands are converted to sign codes and their edge rows are
//!   substituted from the nearest interior neighbours before any test runs.
//! - `TwoDerivative` marks point `i` when `s1[i] == 0 && s2[i] != 0`.
//! - `Crossing` segments `s1` into runs and resolves each zero-run through
//!   a small state machine ([`ZeroRunState`]): a run touching either end of
//!   the grid is ignored; an interior run is marked exactly when its
//!   neighbouring runs carry opposite nonzero signs. Marking a run marks
//!   every index in it.
//! - The second-derivative band is validated under both policies but only
//!   read by `TwoDerivative`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both bands have exactly two columns (lower, upper) and the same number
//!   of rows; callers holding three-column summaries use
//!   [`ConfidenceBand::outer_bounds`] first.
//! - A point whose first-derivative interval excludes zero is never a
//!   candidate, under either policy.
//!
//! Conventions
//! -----------
//! - Marked runs are plateaus of "flat" slope between increasing and
//!   decreasing stretches. No minimum run length is enforced, so a
//!   single-point straddle between opposite signs is reported.
//!
//! Downstream usage
//! ----------------
//! - [`CandidateMask::regions`] groups contiguous candidates, which is the
//!   natural unit for reporting a plateau of candidates as one extremum.
use crate::{
    derivatives::band::ConfidenceBand,
    errors::{ExtremaError, ExtremaResult},
    extrema::{
        policy::TestPolicy,
        runs::{Run, segment_runs},
        sign::{SignCode, sign_codes, substitute_edge_signs},
    },
};
use std::ops::Range;

/// CandidateMask — one flag per grid point; `true` marks a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMask(Vec<bool>);

impl CandidateMask {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of flagged points.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&flag| flag).count()
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&flag| flag)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }

    /// Maximal half-open index ranges of consecutive candidates.
    pub fn regions(&self) -> Vec<Range<usize>> {
        let mut regions: Vec<Range<usize>> = Vec::new();
        for (i, &flag) in self.0.iter().enumerate() {
            if !flag {
                continue;
            }
            match regions.last_mut() {
                Some(region) if region.end == i => region.end = i + 1,
                _ => regions.push(i..i + 1),
            }
        }
        regions
    }
}

impl From<Vec<bool>> for CandidateMask {
    fn from(flags: Vec<bool>) -> Self {
        CandidateMask(flags)
    }
}

/// detect_candidates — apply `policy` to first/second-derivative bands.
///
/// # Errors
/// - `DimensionMismatch` if the bands disagree on the number of rows or
///   have fewer than three rows.
/// - `BoundColumns` if either band does not have exactly two columns.
/// - `UndefinedRow` if an interior row of either band is undefined.
pub fn detect_candidates(
    first: &ConfidenceBand, second: &ConfidenceBand, policy: TestPolicy,
) -> ExtremaResult<CandidateMask> {
    validate_bands(first, second)?;

    let s1 = substitute_edge_signs(&sign_codes(first))?;
    let s2 = substitute_edge_signs(&sign_codes(second))?;

    let mask = match policy {
        TestPolicy::TwoDerivative => two_derivative_mask(&s1, &s2),
        TestPolicy::Crossing => crossing_mask(&s1),
    };
    tracing::debug!(
        policy = %policy,
        n_points = mask.len(),
        flagged = mask.count(),
        regions = mask.regions().len(),
        "candidate detection finished"
    );
    Ok(mask)
}

/// detect_candidates_by_name — [`detect_candidates`] with a policy name.
///
/// # Errors
/// `UnsupportedPolicy { name }` for a name other than `"two-deriv"` or
/// `"crossing"`, plus every error of [`detect_candidates`].
pub fn detect_candidates_by_name(
    first: &ConfidenceBand, second: &ConfidenceBand, name: &str,
) -> ExtremaResult<CandidateMask> {
    let policy: TestPolicy = name.parse()?;
    detect_candidates(first, second, policy)
}

/// ZeroRunState — resolution steps for one straddling run under `Crossing`.
///
/// `Start → Boundary → Ignore` for a run touching index 0 or `n−1`;
/// `Start → CheckNeighbors → Mark | Ignore` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroRunState {
    Start { run: usize },
    Boundary,
    CheckNeighbors { before: SignCode, after: SignCode },
    Mark,
    Ignore,
}

impl ZeroRunState {
    /// Advance one step. Terminal states map to themselves.
    pub fn advance(self, runs: &[Run]) -> ZeroRunState {
        match self {
            ZeroRunState::Start { run } => {
                if run == 0 || run + 1 >= runs.len() {
                    ZeroRunState::Boundary
                } else {
                    ZeroRunState::CheckNeighbors {
                        before: runs[run - 1].sign,
                        after: runs[run + 1].sign,
                    }
                }
            }
            ZeroRunState::Boundary => ZeroRunState::Ignore,
            ZeroRunState::CheckNeighbors { before, after } => {
                if before.value() * after.value() == -1 {
                    ZeroRunState::Mark
                } else {
                    ZeroRunState::Ignore
                }
            }
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ZeroRunState::Mark | ZeroRunState::Ignore)
    }

    /// Run the machine from `Start { run }` to a terminal state.
    pub fn resolve(runs: &[Run], run: usize) -> ZeroRunState {
        let mut state = ZeroRunState::Start { run };
        while !state.is_terminal() {
            state = state.advance(runs);
        }
        state
    }
}

// ---- Helper methods ----

fn validate_bands(first: &ConfidenceBand, second: &ConfidenceBand) -> ExtremaResult<()> {
    if first.n_points() != second.n_points() {
        return Err(ExtremaError::DimensionMismatch {
            context: "second-derivative band rows vs first-derivative band rows",
            expected: first.n_points(),
            found: second.n_points(),
        });
    }
    for (band, label) in [(first, "first-derivative"), (second, "second-derivative")] {
        if band.n_columns() != 2 {
            return Err(ExtremaError::BoundColumns { band: label, found: band.n_columns() });
        }
    }
    Ok(())
}

fn two_derivative_mask(s1: &[SignCode], s2: &[SignCode]) -> CandidateMask {
    s1.iter().zip(s2).map(|(a, b)| a.is_straddle() && !b.is_straddle()).collect::<Vec<_>>().into()
}

fn crossing_mask(s1: &[SignCode]) -> CandidateMask {
    let runs = segment_runs(s1);
    let mut flags = vec![false; s1.len()];
    for (k, run) in runs.iter().enumerate() {
        if !run.sign.is_straddle() {
            continue;
        }
        if ZeroRunState::resolve(&runs, k) == ZeroRunState::Mark {
            flags[run.indices()].fill(true);
        }
    }
    CandidateMask(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pointwise two-derivative marking, including the edge substitution.
    // - Crossing marking of interior zero-runs between opposite signs, and
    //   the boundary / same-sign cases that must not mark.
    // - Input validation: policy names, band shapes, undefined rows.
    // - CandidateMask helpers.
    // -------------------------------------------------------------------------

    fn band(intervals: &[(f64, f64)]) -> ConfidenceBand {
        let rows: Vec<Option<(f64, f64)>> = intervals.iter().copied().map(Some).collect();
        ConfidenceBand::from_intervals(&rows, 0.025, 0.975).expect("valid band")
    }

    fn band_from_signs(signs: &[i8]) -> ConfidenceBand {
        let intervals: Vec<(f64, f64)> = signs
            .iter()
            .map(|&s| match s {
                1 => (0.5, 1.5),
                -1 => (-1.5, -0.5),
                _ => (-0.5, 0.5),
            })
            .collect();
        band(&intervals)
    }

    #[test]
    // Purpose
    // -------
    // Two-derivative marks a straddling slope with a signed curvature.
    //
    // Given
    // -----
    // - D1 bounds [−0.1, 0.1] at an interior point, D2 bounds [1, 2].
    //
    // Expect
    // ------
    // - That point is flagged.
    fn two_derivative_flags_flat_slope_with_curvature() {
        // Arrange
        let d1 = band(&[(1.0, 2.0), (1.0, 2.0), (-0.1, 0.1), (-2.0, -1.0), (-2.0, -1.0)]);
        let d2 = band(&[(1.0, 2.0); 5]);

        // Act
        let mask = detect_candidates(&d1, &d2, TestPolicy::TwoDerivative).expect("mask");

        // Assert
        assert_eq!(mask.as_slice(), &[false, false, true, false, false]);
    }

    #[test]
    // Purpose
    // -------
    // Two-derivative does not mark when curvature also straddles zero.
    //
    // Given
    // -----
    // - D1 bounds [−0.1, 0.1], D2 bounds [−0.5, 0.5] at the same point.
    //
    // Expect
    // ------
    // - No point is flagged.
    fn two_derivative_ignores_straddling_curvature() {
        let d1 = band(&[(1.0, 2.0), (1.0, 2.0), (-0.1, 0.1), (-2.0, -1.0), (-2.0, -1.0)]);
        let d2 = band(&[(-0.5, 0.5); 5]);

        let mask = detect_candidates(&d1, &d2, TestPolicy::TwoDerivative).expect("mask");

        assert!(!mask.any());
    }

    #[test]
    fn two_derivative_edges_follow_their_neighbours() {
        // Edge rows of D1 straddle, but their neighbours do not.
        let d1 = band(&[(-1.0, 1.0), (1.0, 2.0), (1.0, 2.0), (-1.0, 1.0)]);
        let d2 = band(&[(1.0, 2.0); 4]);

        let mask = detect_candidates(&d1, &d2, TestPolicy::TwoDerivative).expect("mask");

        assert_eq!(mask.count(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Crossing marks an interior zero-run between +1 and −1.
    //
    // Given
    // -----
    // - Sign codes [+1, +1, 0, 0, 0, −1, −1].
    //
    // Expect
    // ------
    // - Indices 2..5 flagged, everything else false.
    fn crossing_flags_plateau_between_opposite_signs() {
        // Arrange
        let d1 = band_from_signs(&[1, 1, 0, 0, 0, -1, -1]);
        let d2 = band_from_signs(&[0; 7]);

        // Act
        let mask = detect_candidates(&d1, &d2, TestPolicy::Crossing).expect("mask");

        // Assert
        assert_eq!(mask.as_slice(), &[false, false, true, true, true, false, false]);
        assert_eq!(mask.regions(), vec![2..5]);
    }

    #[test]
    // Purpose
    // -------
    // A zero-run bounded by the same sign on both sides is not a crossing.
    //
    // Given
    // -----
    // - Sign codes [+1, +1, 0, 0, 0, +1, +1].
    //
    // Expect
    // ------
    // - All false.
    fn crossing_ignores_same_sign_neighbours() {
        let d1 = band_from_signs(&[1, 1, 0, 0, 0, 1, 1]);
        let d2 = band_from_signs(&[0; 7]);

        let mask = detect_candidates(&d1, &d2, TestPolicy::Crossing).expect("mask");

        assert!(!mask.any());
    }

    #[test]
    // Purpose
    // -------
    // A zero-run touching the grid boundary is ignored.
    //
    // Given
    // -----
    // - Sign codes [0, 0, −1, −1].
    //
    // Expect
    // ------
    // - All false.
    fn crossing_ignores_boundary_zero_run() {
        let d1 = band_from_signs(&[0, 0, -1, -1]);
        let d2 = band_from_signs(&[1; 4]);

        let mask = detect_candidates(&d1, &d2, TestPolicy::Crossing).expect("mask");

        assert_eq!(mask.as_slice(), &[false; 4]);
    }

    #[test]
    fn crossing_flags_single_point_and_minimum_crossings() {
        let d1 = band_from_signs(&[-1, -1, 0, 1, 1, 0, 0, -1, -1]);
        let d2 = band_from_signs(&[0; 9]);

        let mask = detect_candidates(&d1, &d2, TestPolicy::Crossing).expect("mask");

        assert_eq!(mask.regions(), vec![2..3, 5..7]);
        assert_eq!(mask.count(), 3);
    }

    #[test]
    // Purpose
    // -------
    // A strictly monotone slope yields no candidates under either policy.
    //
    // Given
    // -----
    // - D1 bounds strictly positive everywhere; D2 straddling zero.
    //
    // Expect
    // ------
    // - All false for both policies.
    fn monotone_slope_has_no_candidates() {
        let d1 = band(&[(0.2, 0.8); 10]);
        let d2 = band(&[(-0.1, 0.1); 10]);

        for policy in [TestPolicy::TwoDerivative, TestPolicy::Crossing] {
            let mask = detect_candidates(&d1, &d2, policy).expect("mask");
            assert_eq!(mask.len(), 10);
            assert!(!mask.any(), "{policy} flagged a monotone slope");
        }
    }

    #[test]
    fn state_machine_steps_through_named_states() {
        let runs = segment_runs(&[SignCode::Positive, SignCode::Straddle, SignCode::Negative]);

        let checked = ZeroRunState::Start { run: 1 }.advance(&runs);
        assert_eq!(
            checked,
            ZeroRunState::CheckNeighbors { before: SignCode::Positive, after: SignCode::Negative }
        );
        assert_eq!(checked.advance(&runs), ZeroRunState::Mark);
        assert_eq!(ZeroRunState::Start { run: 0 }.advance(&runs), ZeroRunState::Boundary);
        assert_eq!(ZeroRunState::resolve(&runs, 2), ZeroRunState::Ignore);
    }

    #[test]
    // Purpose
    // -------
    // Unsupported policy names fail with the name preserved.
    //
    // Given
    // -----
    // - Valid bands and the name "bogus".
    //
    // Expect
    // ------
    // - `UnsupportedPolicy { name: "bogus" }`.
    fn unknown_policy_name_is_rejected() {
        let d1 = band_from_signs(&[1, 0, -1]);
        let d2 = band_from_signs(&[1, 1, 1]);

        let err = detect_candidates_by_name(&d1, &d2, "bogus").unwrap_err();

        assert_eq!(err, ExtremaError::UnsupportedPolicy { name: "bogus".to_string() });
        assert!(detect_candidates_by_name(&d1, &d2, "crossing").is_ok());
    }

    #[test]
    fn mismatched_or_wide_bands_are_rejected() {
        let d1 = band_from_signs(&[1, 0, -1, -1]);
        let short = band_from_signs(&[1, 1, 1]);
        assert!(matches!(
            detect_candidates(&d1, &short, TestPolicy::Crossing),
            Err(ExtremaError::DimensionMismatch { expected: 4, found: 3, .. })
        ));

        let wide = ConfidenceBand::new(
            vec![0.025, 0.5, 0.975],
            ndarray::Array2::from_elem((4, 3), Some(1.0)),
        )
        .expect("valid band");
        assert_eq!(
            detect_candidates(&d1, &wide, TestPolicy::TwoDerivative),
            Err(ExtremaError::BoundColumns { band: "second-derivative", found: 3 })
        );
    }

    #[test]
    fn undefined_interior_row_propagates() {
        let d1 = ConfidenceBand::from_intervals(
            &[None, Some((1.0, 2.0)), None, Some((-2.0, -1.0)), None],
            0.025,
            0.975,
        )
        .expect("valid band");
        let d2 = band_from_signs(&[1; 5]);

        assert_eq!(
            detect_candidates(&d1, &d2, TestPolicy::Crossing),
            Err(ExtremaError::UndefinedRow { row: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The second-derivative band is held to the same definedness contract
    // under both policies, even though `Crossing` never reads its signs.
    //
    // Given
    // -----
    // - A fully defined D1 band [+1, 0, −1, −1, −1] that `Crossing` would
    //   otherwise accept.
    // - A D2 band whose interior row 2 is undefined.
    //
    // Expect
    // ------
    // - `UndefinedRow { row: 2 }` under `Crossing` and `TwoDerivative`.
    fn crossing_still_rejects_undefined_second_derivative_row() {
        // Arrange
        let d1 = band_from_signs(&[1, 1, 0, -1, -1]);
        let d2 = ConfidenceBand::from_intervals(
            &[None, Some((1.0, 2.0)), None, Some((1.0, 2.0)), None],
            0.025,
            0.975,
        )
        .expect("valid band");

        for policy in [TestPolicy::Crossing, TestPolicy::TwoDerivative] {
            // Act
            let result = detect_candidates(&d1, &d2, policy);

            // Assert
            assert_eq!(result, Err(ExtremaError::UndefinedRow { row: 2 }), "{policy}");
        }
    }
}
