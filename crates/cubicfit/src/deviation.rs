//! Maximum deviation of samples from a fitted segment.

use crate::{ops, point::Point, point::Points, segment::Segment};

/// Largest squared distance between a sample and the curve, and where it occurs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deviation {
    /// Squared distance of the worst sample.
    pub error_sq: f64,
    /// Index of the worst sample within the span.
    pub index: usize,
}

/// Evaluate `seg` at each interior `u[i]` and compare it with sample `i`.
///
/// End samples are skipped since the segment passes through them exactly.
/// Ties go to the later index, which fixes the split point when several
/// samples share the maximum.
pub fn max_error(seg: &Segment, points: Points<'_>, u: &[f64]) -> Deviation {
    debug_assert_eq!(points.len(), u.len());
    let mut worst = Deviation {
        error_sq: 0.0,
        index: 0,
    };
    let mut eval = Point::zeroed(points.dims());
    let n = points.len();

    for i in 1..n.saturating_sub(1) {
        seg.evaluate(u[i], &mut eval);
        let err_sq = ops::distance_squared(points.get(i), &eval);
        if err_sq >= worst.error_sq {
            worst = Deviation { error_sq: err_sq, index: i };
        }
    }
    worst
}
