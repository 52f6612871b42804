//! Dimension-generic vector arithmetic over `f64` slices.
//!
//! All slices passed to a single call must share one length. Mismatches are
//! caught by `debug_assert!` in debug builds; release builds operate over the
//! shared prefix.

/// Values with a magnitude below this are treated as zero.
pub const ALMOST_ZERO: f64 = 1e-8;

/// True when `v` is within [`ALMOST_ZERO`] of zero.
#[inline]
pub fn is_almost_zero(v: f64) -> bool {
    -ALMOST_ZERO < v && v < ALMOST_ZERO
}

/// `out = a + b`.
#[inline]
pub fn add(out: &mut [f64], a: &[f64], b: &[f64]) {
    debug_assert!(out.len() == a.len() && a.len() == b.len());
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y;
    }
}

/// `out = a - b`.
#[inline]
pub fn sub(out: &mut [f64], a: &[f64], b: &[f64]) {
    debug_assert!(out.len() == a.len() && a.len() == b.len());
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x - y;
    }
}

/// `out = a * f`.
#[inline]
pub fn scale(out: &mut [f64], a: &[f64], f: f64) {
    debug_assert_eq!(out.len(), a.len());
    for (o, x) in out.iter_mut().zip(a) {
        *o = x * f;
    }
}

/// `out = a + b * f`.
#[inline]
pub fn madd(out: &mut [f64], a: &[f64], b: &[f64], f: f64) {
    debug_assert!(out.len() == a.len() && a.len() == b.len());
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y * f;
    }
}

/// `out = a - b * f`.
#[inline]
pub fn msub(out: &mut [f64], a: &[f64], b: &[f64], f: f64) {
    debug_assert!(out.len() == a.len() && a.len() == b.len());
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x - y * f;
    }
}

/// In-place `v += a`.
#[inline]
pub fn add_assign(v: &mut [f64], a: &[f64]) {
    debug_assert_eq!(v.len(), a.len());
    for (o, x) in v.iter_mut().zip(a) {
        *o += x;
    }
}

/// In-place `v -= a`.
#[inline]
pub fn sub_assign(v: &mut [f64], a: &[f64]) {
    debug_assert_eq!(v.len(), a.len());
    for (o, x) in v.iter_mut().zip(a) {
        *o -= x;
    }
}

/// In-place `v *= f`.
#[inline]
pub fn scale_assign(v: &mut [f64], f: f64) {
    for o in v.iter_mut() {
        *o *= f;
    }
}

/// In-place `v += a * f`.
#[inline]
pub fn madd_assign(v: &mut [f64], a: &[f64], f: f64) {
    debug_assert_eq!(v.len(), a.len());
    for (o, x) in v.iter_mut().zip(a) {
        *o += x * f;
    }
}

/// Dot product of `a` and `b`.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Squared length of `v`.
#[inline]
pub fn len_squared(v: &[f64]) -> f64 {
    dot(v, v)
}

/// Length of `v`.
#[inline]
pub fn len(v: &[f64]) -> f64 {
    len_squared(v).sqrt()
}

/// Squared distance between `a` and `b`.
#[inline]
pub fn distance_squared(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Distance between `a` and `b`.
#[inline]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Scale `v` to unit length in place, returning its previous length.
///
/// A zero vector is left untouched and `0.0` is returned.
#[inline]
pub fn normalize(v: &mut [f64]) -> f64 {
    let d = len_squared(v);
    if d != 0.0 {
        let d = d.sqrt();
        if d != 0.0 {
            scale_assign(v, 1.0 / d);
        }
        return d;
    }
    d
}

/// `out = normalize(a - b)`, the unit direction from `b` towards `a`.
///
/// Returns the length of `a - b`. Coincident inputs leave `out` zeroed.
#[inline]
pub fn normalize_diff(out: &mut [f64], a: &[f64], b: &[f64]) -> f64 {
    sub(out, a, b);
    normalize(out)
}

/// Reflect `handle` through `point`: `out = point + (point - handle)`.
#[inline]
pub fn flip(out: &mut [f64], point: &[f64], handle: &[f64]) {
    debug_assert!(out.len() == point.len() && point.len() == handle.len());
    for ((o, p), h) in out.iter_mut().zip(point).zip(handle) {
        *o = p + (p - h);
    }
}

/// Exact coordinate-wise equality.
#[inline]
pub fn equals(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// True when every coordinate of `v` is finite.
#[inline]
pub fn is_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}
