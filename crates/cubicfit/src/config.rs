//! Fitting options.

use crate::error::{Error, Result};

/// Default number of Newton reparameterization rounds before a span is split.
pub const DEFAULT_MAX_ITERATIONS: usize = 4;

/// Tunables for a fit.
///
/// Only the error threshold normally needs changing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    /// Largest accepted distance between a sample and the fitted curve, in
    /// input units. Must be finite and greater than zero.
    /// Default: 1.0
    pub error_threshold: f64,

    /// Reparameterization rounds attempted on a span before it is split.
    /// Default: 4
    pub max_iterations: usize,

    /// Optional limit on split depth. A span at this depth that still misses
    /// the threshold is accepted as-is instead of being split further.
    /// Default: unlimited
    pub max_depth: Option<usize>,

    /// Whether the result maps each knot back to its input sample index.
    /// Default: true
    pub orig_index: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            error_threshold: 1.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_depth: None,
            orig_index: true,
        }
    }
}

impl FitOptions {
    /// Default options with the given error threshold.
    pub fn new(error_threshold: f64) -> Self {
        Self {
            error_threshold,
            ..Self::default()
        }
    }

    /// Set the number of reparameterization rounds.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Limit the split depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Enable or disable the knot → sample index map.
    pub fn with_orig_index(mut self, orig_index: bool) -> Self {
        self.orig_index = orig_index;
        self
    }

    /// Check that the options describe a fit that can run.
    pub fn validate(&self) -> Result<()> {
        if !self.error_threshold.is_finite() || self.error_threshold <= 0.0 {
            return Err(Error::InvalidThreshold(self.error_threshold));
        }
        Ok(())
    }

    /// The squared threshold compared against squared deviations.
    pub(crate) fn error_sq(&self) -> f64 {
        self.error_threshold * self.error_threshold
    }
}
