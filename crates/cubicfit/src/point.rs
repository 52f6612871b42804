//! N‑dimensional points: an owned vector type and a borrowed view over a flat buffer.

use std::ops::{Deref, DerefMut};

use smallvec::{SmallVec, smallvec};

use crate::ops;

/// Inline storage used for coordinates; spills to the heap beyond four dimensions.
pub type Coords = SmallVec<[f64; 4]>;

/// Owned N‑dimensional vector used for tangents and scratch values.
#[derive(Clone, Debug, PartialEq)]
pub struct Point(pub Coords);

impl Point {
    /// Create a point of `dims` zeroes.
    pub fn zeroed(dims: usize) -> Self {
        Self(smallvec![0.0; dims])
    }

    /// Create a point by copying a coordinate slice.
    pub fn from_slice(coords: &[f64]) -> Self {
        Self(SmallVec::from_slice(coords))
    }

    /// Unit direction from `b` towards `a`; zero when the two coincide.
    pub fn direction(a: &[f64], b: &[f64]) -> Self {
        let mut out = Self::zeroed(a.len());
        ops::normalize_diff(&mut out, a, b);
        out
    }
}

impl Deref for Point {
    type Target = [f64];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Point {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Borrowed, row-major view over `len * dims` scalars.
#[derive(Clone, Copy, Debug)]
pub struct Points<'a> {
    /// Flat coordinate data.
    data: &'a [f64],
    /// Coordinates per point.
    dims: usize,
}

impl<'a> Points<'a> {
    /// Wrap a flat buffer. `data.len()` must be a multiple of `dims`.
    pub fn new(data: &'a [f64], dims: usize) -> Self {
        debug_assert!(dims > 0 && data.len().is_multiple_of(dims));
        Self { data, dims }
    }

    /// Number of points in the view.
    pub fn len(&self) -> usize {
        self.data.len() / self.dims
    }

    /// True when the view holds no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Coordinates per point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Coordinates of point `i`.
    pub fn get(&self, i: usize) -> &'a [f64] {
        &self.data[i * self.dims..(i + 1) * self.dims]
    }

    /// Coordinates of the first point.
    pub fn first(&self) -> &'a [f64] {
        self.get(0)
    }

    /// Coordinates of the last point.
    pub fn last(&self) -> &'a [f64] {
        self.get(self.len() - 1)
    }

    /// Sub-view of points `start..=end`.
    pub fn span(&self, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end < self.len());
        Self {
            data: &self.data[start * self.dims..(end + 1) * self.dims],
            dims: self.dims,
        }
    }

    /// Distance between points `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        ops::distance(self.get(a), self.get(b))
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a [f64]> + 'a {
        self.data.chunks_exact(self.dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point() {
        let v = Point::from_slice(&[2.0, 2.0]);
        assert_eq!(v.len(), 2);
        assert_eq!(&Point::zeroed(3)[..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn direction() {
        let d = Point::direction(&[0.0, 0.0], &[0.0, 10.0]);
        assert_eq!(&d[..], &[0.0, -1.0]);
        let z = Point::direction(&[1.0, 1.0], &[1.0, 1.0]);
        assert_eq!(&z[..], &[0.0, 0.0]);
    }

    #[test]
    fn view() {
        let data = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let pts = Points::new(&data, 2);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts.get(2), &[1.0, 1.0]);
        assert_eq!(pts.last(), &[0.0, 1.0]);
        assert_eq!(pts.distance(0, 2), 2f64.sqrt());

        let sub = pts.span(1, 2);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.first(), &[1.0, 0.0]);
        assert_eq!(sub.iter().count(), 2);
    }
}
