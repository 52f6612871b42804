//! Flatten a segment chain into knots, and the result type handed to callers.

use crate::{
    error::Result,
    ops,
    point::Point,
    segment::{Segment, SegmentChain},
};

/// One knot of the output: the curve point with its two handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knot<'a, T> {
    /// Handle controlling the curve as it arrives at `point`.
    pub incoming: &'a [T],
    /// Point the curve passes through.
    pub point: &'a [T],
    /// Handle controlling the curve as it leaves `point`.
    pub outgoing: &'a [T],
}

/// The fitted curve.
///
/// Knots are stored flat, `3 * dims` scalars each, laid out as
/// `[incoming, point, outgoing]`, in input order. Segment `i` runs from knot
/// `i` to knot `i + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveFit<T = f64> {
    /// Coordinates per point.
    pub dims: usize,
    /// Flat knot data, `knot_count() * 3 * dims` long.
    pub knots: Vec<T>,
    /// Input sample index of each knot, when requested.
    pub orig_index: Option<Vec<usize>>,
    /// Knot index of each caller-supplied corner; `None` when no corners were given.
    pub corner_index: Option<Vec<usize>>,
}

impl<T: Copy> CurveFit<T> {
    /// Number of knots; always one more than the number of segments.
    pub fn knot_count(&self) -> usize {
        self.knots.len() / (3 * self.dims)
    }

    /// Number of cubic segments.
    pub fn segment_count(&self) -> usize {
        self.knot_count().saturating_sub(1)
    }

    /// Knot `i`.
    pub fn knot(&self, i: usize) -> Knot<'_, T> {
        let d = self.dims;
        let chunk = &self.knots[i * 3 * d..(i + 1) * 3 * d];
        Knot {
            incoming: &chunk[..d],
            point: &chunk[d..2 * d],
            outgoing: &chunk[2 * d..],
        }
    }

    /// Iterate over knots in order.
    pub fn iter_knots(&self) -> impl ExactSizeIterator<Item = Knot<'_, T>> + '_ {
        (0..self.knot_count()).map(|i| self.knot(i))
    }

    /// Control points `[p0, p1, p2, p3]` of segment `i`.
    pub fn segment(&self, i: usize) -> [&[T]; 4] {
        let a = self.knot(i);
        let b = self.knot(i + 1);
        [a.point, a.outgoing, b.incoming, b.point]
    }

    /// Convert every scalar, keeping the layout and index maps.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> CurveFit<U> {
        CurveFit {
            dims: self.dims,
            knots: self.knots.into_iter().map(f).collect(),
            orig_index: self.orig_index,
            corner_index: self.corner_index,
        }
    }
}

impl CurveFit<f64> {
    /// Evaluate segment `i` at `t` in `[0, 1]`.
    pub fn evaluate(&self, i: usize, t: f64) -> Point {
        let [p0, p1, p2, p3] = self.segment(i);
        let mut out = Point::zeroed(self.dims);
        Segment::new(p0, p1, p2, p3, 0).evaluate(t, &mut out);
        out
    }
}

/// Flatten `chain` into the knot layout of [`CurveFit::knots`].
///
/// Interior knots pair the trailing handle of one segment with the leading
/// handle of the next. The outer handles of the first and last knots have no
/// neighbouring segment, so they mirror the inner handle through the point.
pub fn flatten(chain: &SegmentChain) -> Result<Vec<f64>> {
    let segs = chain.as_slice();
    let dims = chain.dims();
    let mut knots = Vec::new();
    let (Some(first), Some(last)) = (segs.first(), segs.last()) else {
        return Ok(knots);
    };
    knots.try_reserve_exact((segs.len() + 1) * 3 * dims)?;

    let mut reflected = Point::zeroed(dims);
    ops::flip(&mut reflected, first.p0(), first.p1());
    knots.extend_from_slice(&reflected);
    knots.extend_from_slice(first.p0());
    knots.extend_from_slice(first.p1());

    for pair in segs.windows(2) {
        knots.extend_from_slice(pair[0].p2());
        knots.extend_from_slice(pair[0].p3());
        knots.extend_from_slice(pair[1].p1());
    }

    ops::flip(&mut reflected, last.p3(), last.p2());
    knots.extend_from_slice(last.p2());
    knots.extend_from_slice(last.p3());
    knots.extend_from_slice(&reflected);

    Ok(knots)
}

/// Recover the input sample index of every knot.
///
/// Walks the chain backwards from `index_last`, subtracting each segment's
/// `orig_span`; the walk must land on sample 0.
pub fn orig_indices(chain: &SegmentChain, index_last: usize) -> Result<Vec<usize>> {
    let segs = chain.as_slice();
    let mut indices = Vec::new();
    indices.try_reserve_exact(segs.len() + 1)?;
    indices.resize(segs.len() + 1, 0);

    let mut value = index_last;
    for (k, seg) in segs.iter().enumerate().rev() {
        indices[k + 1] = value;
        debug_assert!(seg.orig_span <= value);
        value = value.saturating_sub(seg.orig_span);
    }
    debug_assert_eq!(value, 0);
    indices[0] = value;
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segments() -> SegmentChain {
        let mut chain = SegmentChain::new(2);
        chain
            .push(Segment::new(&[0.0, 0.0], &[1.0, 0.0], &[2.0, 1.0], &[3.0, 1.0], 3))
            .unwrap();
        chain
            .push(Segment::new(&[3.0, 1.0], &[4.0, 1.0], &[5.0, 0.0], &[6.0, 0.0], 2))
            .unwrap();
        chain
    }

    #[test]
    fn knot_layout() {
        let chain = two_segments();
        let fit = CurveFit {
            dims: 2,
            knots: flatten(&chain).unwrap(),
            orig_index: Some(orig_indices(&chain, 5).unwrap()),
            corner_index: None,
        };
        assert_eq!(fit.knot_count(), 3);
        assert_eq!(fit.segment_count(), 2);

        let k0 = fit.knot(0);
        assert_eq!(k0.incoming, &[-1.0, 0.0]);
        assert_eq!(k0.point, &[0.0, 0.0]);
        assert_eq!(k0.outgoing, &[1.0, 0.0]);

        let k1 = fit.knot(1);
        assert_eq!(k1.incoming, &[2.0, 1.0]);
        assert_eq!(k1.point, &[3.0, 1.0]);
        assert_eq!(k1.outgoing, &[4.0, 1.0]);

        let k2 = fit.knot(2);
        assert_eq!(k2.incoming, &[5.0, 0.0]);
        assert_eq!(k2.point, &[6.0, 0.0]);
        assert_eq!(k2.outgoing, &[7.0, 0.0]);

        assert_eq!(fit.orig_index.as_deref(), Some(&[0, 3, 5][..]));
        assert_eq!(
            fit.segment(1),
            [&[3.0, 1.0][..], &[4.0, 1.0][..], &[5.0, 0.0][..], &[6.0, 0.0][..]]
        );
        assert_eq!(fit.iter_knots().count(), 3);
    }

    #[test]
    fn evaluate_matches_segment() {
        let chain = two_segments();
        let fit = CurveFit {
            dims: 2,
            knots: flatten(&chain).unwrap(),
            orig_index: None,
            corner_index: None,
        };
        let mut expected = [0.0; 2];
        chain.as_slice()[0].evaluate(0.3, &mut expected);
        assert_eq!(&fit.evaluate(0, 0.3)[..], &expected);
        assert_eq!(&fit.evaluate(1, 1.0)[..], &[6.0, 0.0]);
    }

    #[test]
    fn degenerate_single_point() {
        let mut chain = SegmentChain::new(2);
        chain.push(Segment::degenerate(&[1.0, 1.0])).unwrap();
        let knots = flatten(&chain).unwrap();
        assert_eq!(knots, vec![1.0; 12]);
        assert_eq!(orig_indices(&chain, 0).unwrap(), vec![0, 0]);
    }

    #[test]
    fn map_converts_scalars() {
        let fit = CurveFit {
            dims: 1,
            knots: vec![0.5, 1.0, 1.5, 2.5, 3.0, 3.5],
            orig_index: Some(vec![0, 4]),
            corner_index: Some(vec![0, 1]),
        };
        let single = fit.map(|v| v as f32);
        assert_eq!(single.knots, vec![0.5f32, 1.0, 1.5, 2.5, 3.0, 3.5]);
        assert_eq!(single.orig_index, Some(vec![0, 4]));
        assert_eq!(single.corner_index, Some(vec![0, 1]));
    }

    #[test]
    fn empty_chain_flattens_to_nothing() {
        let chain = SegmentChain::new(3);
        assert!(flatten(&chain).unwrap().is_empty());
    }
}
