//! extrema — sign codes, run segmentation, and candidate detection.
//!
//! Purpose
//! -------
//! Turn derivative confidence bands into a per-point boolean mask of
//! candidate local extrema. This is the decision layer of the pipeline;
//! everything upstream only produces bands.
//!
//! Key behaviors
//! -------------
//! - [`sign`] reduces each (lower, upper) row to a [`SignCode`] and handles
//!   the undefined edge rows left by centered differences.
//! - [`runs`] segments a code sequence into maximal constant [`Run`]s.
//! - [`detector`] applies a [`TestPolicy`] and returns a [`CandidateMask`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Grids have at least three points, so both edge substitutions have an
//!   interior neighbour to read from.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its piece; integration tests in
//!   `tests/` run the full pipeline on polynomial posteriors.

pub mod detector;
pub mod policy;
pub mod runs;
pub mod sign;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::detector::{CandidateMask, ZeroRunState, detect_candidates, detect_candidates_by_name};
pub use self::policy::TestPolicy;
pub use self::runs::{Run, segment_runs};
pub use self::sign::{SignCode, sign_codes, substitute_edge_signs};

pub mod prelude {
    pub use super::detector::{CandidateMask, detect_candidates, detect_candidates_by_name};
    pub use super::policy::TestPolicy;
    pub use super::sign::SignCode;
}
