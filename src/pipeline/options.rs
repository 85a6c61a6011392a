//! pipeline::options — run-time configuration for the end-to-end pipeline.
//!
//! Purpose
//! -------
//! Collect the knobs of one detection run: how many posterior draws to
//! simulate, how to seed the generator, which quantiles to report, and
//! which candidate test to apply.
//!
//! Key behaviors
//! -------------
//! - [`PipelineOptions::new`] validates the draw count and probabilities.
//! - [`PipelineOptions::default`] is reproducible: 1000 draws, seed 42,
//!   probabilities {0.025, 0.5, 0.975}, `crossing` policy.
//!
//! Conventions
//! -----------
//! - The first and last probabilities are the interval bounds the detector
//!   sees; any probabilities in between are reported only.
use crate::{
    derivatives::quantile::Probabilities,
    errors::{ExtremaError, ExtremaResult},
    extrema::policy::TestPolicy,
};

/// Default number of posterior draws.
pub const DEFAULT_N_DRAWS: usize = 1000;

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 42;

/// PipelineOptions — configuration for [`run_pipeline`](super::run::run_pipeline).
///
/// Fields
/// ------
/// - `n_draws`: `usize`
///   Number of simulated curves `S` (at least 1).
/// - `seed`: `Option<u64>`
///   `Some(seed)` gives bit-identical reruns; `None` seeds from OS entropy.
/// - `probabilities`: [`Probabilities`]
///   Quantile levels for every band, at least two for a usable interval.
/// - `policy`: [`TestPolicy`]
///   Candidate test applied to the derivative bands.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub n_draws: usize,
    pub seed: Option<u64>,
    pub probabilities: Probabilities,
    pub policy: TestPolicy,
}

impl PipelineOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - `InvalidDrawCount` when `n_draws == 0`.
    /// - `BoundColumns` when fewer than two probabilities are given, since
    ///   no lower/upper interval can be formed.
    pub fn new(
        n_draws: usize, seed: Option<u64>, probabilities: Probabilities, policy: TestPolicy,
    ) -> ExtremaResult<Self> {
        if n_draws == 0 {
            return Err(ExtremaError::InvalidDrawCount { n_draws });
        }
        if probabilities.len() < 2 {
            return Err(ExtremaError::BoundColumns {
                band: "probability set",
                found: probabilities.len(),
            });
        }
        Ok(PipelineOptions { n_draws, seed, probabilities, policy })
    }

    /// Same options with the policy parsed from its name.
    ///
    /// # Errors
    /// `UnsupportedPolicy` for an unknown name.
    pub fn with_policy_name(mut self, name: &str) -> ExtremaResult<Self> {
        self.policy = name.parse()?;
        Ok(self)
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            n_draws: DEFAULT_N_DRAWS,
            seed: Some(DEFAULT_SEED),
            probabilities: Probabilities::default(),
            policy: TestPolicy::default(),
        }
    }
}
