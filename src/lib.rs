//! posterior_extrema — uncertainty-aware detection of interior extrema.
//!
//! Purpose
//! -------
//! Locate candidate local extrema (peaks and troughs) of a smooth curve
//! whose shape is known only through a Gaussian posterior over basis
//! coefficients. Rather than differencing the posterior mean once, the
//! crate simulates many plausible curves, differences each of them, and
//! decides from pointwise confidence bands whether the slope genuinely
//! changes sign.
//!
//! Key behaviors
//! -------------
//! - [`posterior`] samples coefficient draws and evaluates them on an
//!   [`EvaluationGrid`](grid::EvaluationGrid).
//! - [`derivatives`] applies centered finite differences to every draw and
//!   summarizes draws into quantile bands.
//! - [`extrema`] turns derivative bands into sign codes and a boolean
//!   candidate mask under a selectable [`TestPolicy`](extrema::TestPolicy).
//! - [`pipeline`] chains all stages behind [`run_pipeline`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Grids are uniform with at least three points.
//! - Every stage is single-shot and stateless; the only randomness lives
//!   in the sampler and is driven by a seedable generator.
//! - Bands are pointwise: each grid row is calibrated independently.
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray` arrays with grid points on rows and draws on
//!   columns (`n × S`). Coefficient draws are `S × k`.
//! - Undefined derivative rows are carried as `Option<f64>::None`, never as
//!   NaN, and never silently read as zero.
//! - All fallible operations return [`ExtremaResult`].
//!
//! Features
//! --------
//! - `parallel`: reduce quantile rows on the rayon thread pool.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests; `tests/` exercises the full pipeline on
//!   polynomial posteriors with known extrema.

pub mod derivatives;
pub mod errors;
pub mod extrema;
pub mod grid;
pub mod pipeline;
pub mod posterior;

pub use crate::errors::{ExtremaError, ExtremaResult};
pub use crate::pipeline::{PipelineOptions, PipelineOutcome, run_pipeline, run_pipeline_with_rng};

pub mod prelude {
    pub use crate::derivatives::prelude::*;
    pub use crate::errors::{ExtremaError, ExtremaResult};
    pub use crate::extrema::prelude::*;
    pub use crate::grid::EvaluationGrid;
    pub use crate::pipeline::prelude::*;
    pub use crate::posterior::prelude::*;
}
