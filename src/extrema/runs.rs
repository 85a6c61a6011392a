//! extrema::runs — run-length segmentation of sign-code sequences.
use crate::extrema::sign::SignCode;
use std::ops::Range;

/// Run — maximal stretch of consecutive grid points sharing one code.
///
/// `start..end` is half-open and 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub sign: SignCode,
    pub start: usize,
    pub end: usize,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// segment_runs — split `codes` into maximal constant runs, left to right.
///
/// The runs tile `0..codes.len()` exactly, and neighbouring runs always
/// carry different codes. An empty input yields no runs.
pub fn segment_runs(codes: &[SignCode]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (i, &sign) in codes.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.sign == sign => run.end = i + 1,
            _ => runs.push(Run { sign, start: i, end: i + 1 }),
        }
    }
    runs
}
