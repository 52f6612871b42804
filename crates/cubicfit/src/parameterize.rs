//! Chord-length parameterization of a span of samples.

use crate::{ops, point::Points};

/// Distance from each point to its predecessor; entry 0 is always `0.0`.
///
/// The cache is indexed like the span it was built from, so a sub-span that
/// starts at `k` can reuse `&cache[k..]`.
pub fn length_cache(points: Points<'_>) -> Vec<f64> {
    let mut cache = Vec::with_capacity(points.len());
    cache.push(0.0);
    cache.extend(
        points
            .iter()
            .zip(points.iter().skip(1))
            .map(|(prev, pt)| ops::distance(pt, prev)),
    );
    cache
}

/// Total polyline length of a span, read from its length cache.
pub fn span_length(cache: &[f64]) -> f64 {
    cache.iter().skip(1).sum()
}

/// Assign each point a parameter in `[0, 1]` proportional to the distance
/// travelled along the polyline.
///
/// `cache`, when given, must hold the values [`length_cache`] would compute
/// for these points. Returns `None` when the span has (almost) zero length.
pub fn chord_length_parameterize(points: Points<'_>, cache: Option<&[f64]>) -> Option<Vec<f64>> {
    let n = points.len();
    debug_assert!(n >= 2);
    let mut u = Vec::with_capacity(n);
    u.push(0.0);
    let mut acc = 0.0;
    for i in 1..n {
        let length = match cache {
            Some(cache) => {
                debug_assert_eq!(cache[i], points.distance(i, i - 1));
                cache[i]
            }
            None => points.distance(i, i - 1),
        };
        acc += length;
        u.push(acc);
    }

    let w = u[n - 1];
    if ops::is_almost_zero(w) {
        return None;
    }
    for v in &mut u {
        *v /= w;
    }
    Some(u)
}
