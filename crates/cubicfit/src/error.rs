//! Error types for curve fitting.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the public fitting entry points.
///
/// Every variant describes a violated input contract or a failed allocation.
/// Numerical trouble inside the fitter (singular systems, diverging Newton
/// steps) is handled internally and never surfaces here.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The dimension count was zero.
    #[error("point dimension must be >= 1")]
    ZeroDimension,

    /// The point buffer held no points.
    #[error("no points to fit")]
    EmptyInput,

    /// The point buffer length is not a whole number of points.
    #[error("point buffer of length {len} is not a multiple of dimension {dims}")]
    BufferLength {
        /// Number of scalars supplied.
        len: usize,
        /// Requested dimension count.
        dims: usize,
    },

    /// A coordinate was NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// The error threshold was not a positive finite number.
    #[error("error threshold must be finite and > 0, got {0}")]
    InvalidThreshold(f64),

    /// The corner list had fewer than two entries.
    #[error("corner list needs at least 2 entries, got {0}")]
    TooFewCorners(usize),

    /// The corner list did not start at the first point.
    #[error("first corner must be 0, got {0}")]
    CornerStart(usize),

    /// The corner list did not end at the last point.
    #[error("last corner must be {last}, got {index}")]
    CornerEnd {
        /// Corner value supplied.
        index: usize,
        /// Index of the last point.
        last: usize,
    },

    /// Corner indices were not strictly increasing.
    #[error("corner {position} ({index}) does not follow corner {previous}")]
    CornerOrder {
        /// Position of the offending entry in the corner list.
        position: usize,
        /// Value of the preceding entry.
        previous: usize,
        /// Value of the offending entry.
        index: usize,
    },

    /// Every point in a corner span coincides, so it has no length to parameterize.
    #[error("span {start}..={end} has zero length")]
    ZeroLengthSpan {
        /// First point index of the span.
        start: usize,
        /// Last point index of the span.
        end: usize,
    },

    /// Distances within a corner span overflow double precision.
    #[error("span {start}..={end} is too long to measure in f64")]
    SpanOverflow {
        /// First point index of the span.
        start: usize,
        /// Last point index of the span.
        end: usize,
    },

    /// An output buffer could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
