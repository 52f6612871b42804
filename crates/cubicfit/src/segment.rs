//! Cubic Bézier segments and the ordered chain the fitter produces.

use std::{collections::TryReserveError, slice};

use smallvec::{SmallVec, smallvec};

/// Inline storage for the four control points; heap-backed beyond four dimensions.
type ControlPoints = SmallVec<[f64; 16]>;

/// A cubic Bézier segment in N dimensions.
///
/// `p0` and `p3` are always copies of input samples; `p1` and `p2` are the
/// derived handles.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// `p0, p1, p2, p3`, each `dims` long, stored back to back.
    pts: ControlPoints,
    /// Coordinates per control point.
    dims: usize,
    /// Number of input sample intervals this segment covers.
    pub orig_span: usize,
}

impl Segment {
    /// Build a segment from its four control points.
    pub fn new(p0: &[f64], p1: &[f64], p2: &[f64], p3: &[f64], orig_span: usize) -> Self {
        let dims = p0.len();
        debug_assert!(p1.len() == dims && p2.len() == dims && p3.len() == dims);
        let mut pts = ControlPoints::with_capacity(4 * dims);
        pts.extend_from_slice(p0);
        pts.extend_from_slice(p1);
        pts.extend_from_slice(p2);
        pts.extend_from_slice(p3);
        Self {
            pts,
            dims,
            orig_span,
        }
    }

    /// A segment with all four control points at `pt`.
    pub fn degenerate(pt: &[f64]) -> Self {
        Self::new(pt, pt, pt, pt, 0)
    }

    /// A zeroed segment ready to be filled in place.
    pub(crate) fn zeroed(dims: usize, orig_span: usize) -> Self {
        Self {
            pts: smallvec![0.0; 4 * dims],
            dims,
            orig_span,
        }
    }

    /// Coordinates per control point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Control point `i` (0..4).
    pub fn control(&self, i: usize) -> &[f64] {
        debug_assert!(i < 4);
        &self.pts[i * self.dims..(i + 1) * self.dims]
    }

    /// Mutable access to control point `i`.
    pub(crate) fn control_mut(&mut self, i: usize) -> &mut [f64] {
        debug_assert!(i < 4);
        &mut self.pts[i * self.dims..(i + 1) * self.dims]
    }

    /// Start point.
    pub fn p0(&self) -> &[f64] {
        self.control(0)
    }

    /// Handle leaving the start point.
    pub fn p1(&self) -> &[f64] {
        self.control(1)
    }

    /// Handle entering the end point.
    pub fn p2(&self) -> &[f64] {
        self.control(2)
    }

    /// End point.
    pub fn p3(&self) -> &[f64] {
        self.control(3)
    }

    /// Borrow all four control points at once.
    fn controls(&self) -> (&[f64], &[f64], &[f64], &[f64]) {
        let (a, rest) = self.pts.split_at(self.dims);
        let (b, rest) = rest.split_at(self.dims);
        let (c, d) = rest.split_at(self.dims);
        (a, b, c, d)
    }

    /// Evaluate the curve at `t` by repeated linear interpolation, writing into `out`.
    pub fn evaluate(&self, t: f64, out: &mut [f64]) {
        let (p0, p1, p2, p3) = self.controls();
        let s = 1.0 - t;
        for (j, o) in out.iter_mut().enumerate() {
            let p01 = (p0[j] * s) + (p1[j] * t);
            let p12 = (p1[j] * s) + (p2[j] * t);
            let p23 = (p2[j] * s) + (p3[j] * t);
            *o = (((p01 * s) + (p12 * t)) * s) + (((p12 * s) + (p23 * t)) * t);
        }
    }

    /// Evaluate the curve at `t` in Bernstein form, writing into `out`.
    pub fn point_at(&self, t: f64, out: &mut [f64]) {
        let (p0, p1, p2, p3) = self.controls();
        let s = 1.0 - t;
        for (j, o) in out.iter_mut().enumerate() {
            *o = p0[j] * s * s * s + 3.0 * t * s * (s * p1[j] + t * p2[j]) + t * t * t * p3[j];
        }
    }

    /// First derivative with respect to `t`, writing into `out`.
    pub fn velocity(&self, t: f64, out: &mut [f64]) {
        let (p0, p1, p2, p3) = self.controls();
        let s = 1.0 - t;
        for (j, o) in out.iter_mut().enumerate() {
            *o = 3.0
                * ((p1[j] - p0[j]) * s * s
                    + 2.0 * (p2[j] - p1[j]) * s * t
                    + (p3[j] - p2[j]) * t * t);
        }
    }

    /// Second derivative with respect to `t`, writing into `out`.
    pub fn acceleration(&self, t: f64, out: &mut [f64]) {
        let (p0, p1, p2, p3) = self.controls();
        let s = 1.0 - t;
        for (j, o) in out.iter_mut().enumerate() {
            *o = 6.0 * ((p2[j] - 2.0 * p1[j] + p0[j]) * s + (p3[j] - 2.0 * p2[j] + p1[j]) * t);
        }
    }
}

/// Ordered segments in final curve order.
///
/// Segments are appended as the fitter accepts them, which already matches the
/// order of the input samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentChain {
    /// Accepted segments, first to last.
    segments: Vec<Segment>,
    /// Coordinates per control point.
    dims: usize,
}

impl SegmentChain {
    /// An empty chain for `dims`‑dimensional segments.
    pub fn new(dims: usize) -> Self {
        Self {
            segments: Vec::new(),
            dims,
        }
    }

    /// Coordinates per control point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the chain holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment at the end of the chain.
    pub fn push(&mut self, segment: Segment) -> Result<(), TryReserveError> {
        debug_assert_eq!(segment.dims(), self.dims);
        self.segments.try_reserve(1)?;
        self.segments.push(segment);
        Ok(())
    }

    /// Move every segment of `other` onto the end of this chain.
    pub fn append(&mut self, other: &mut Self) -> Result<(), TryReserveError> {
        debug_assert_eq!(other.dims, self.dims);
        self.segments.try_reserve(other.segments.len())?;
        self.segments.append(&mut other.segments);
        Ok(())
    }

    /// Total sample intervals covered by the chain.
    pub fn orig_span_total(&self) -> usize {
        self.segments.iter().map(|s| s.orig_span).sum()
    }

    /// Iterate over segments in curve order.
    pub fn iter(&self) -> slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Segments as a slice.
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }
}
