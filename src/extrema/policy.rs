//! extrema::policy — selectable candidate-extremum test.
use crate::errors::ExtremaError;
use std::{fmt, str::FromStr};

/// TestPolicy — decision rule applied by the detector.
///
/// - `TwoDerivative` (`"two-deriv"`): pointwise. A point is a candidate
///   when its first-derivative interval straddles zero and its
///   second-derivative interval does not.
/// - `Crossing` (`"crossing"`): run-based. A straddling run is a candidate
///   when the first-derivative sign is strictly positive on one side and
///   strictly negative on the other.
///
/// Parses case-insensitively from the names above. Unknown names return
/// `ExtremaError::UnsupportedPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestPolicy {
    TwoDerivative,
    #[default]
    Crossing,
}

impl TestPolicy {
    pub fn name(self) -> &'static str {
        match self {
            TestPolicy::TwoDerivative => "two-deriv",
            TestPolicy::Crossing => "crossing",
        }
    }
}

impl FromStr for TestPolicy {
    type Err = ExtremaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "two-deriv" => Ok(TestPolicy::TwoDerivative),
            "crossing" => Ok(TestPolicy::Crossing),
            _ => Err(ExtremaError::UnsupportedPolicy { name: s.to_string() }),
        }
    }
}

impl fmt::Display for TestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
