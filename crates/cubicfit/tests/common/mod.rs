//! Helpers shared by the integration tests.

#![allow(dead_code)]

use cubicfit::{CurveFit, ops};

/// Samples taken along each fitted segment when measuring sample distances.
pub const STEPS: usize = 256;

/// Largest amount by which any input sample misses its segment, beyond `threshold`.
///
/// The sample-to-curve distance is measured against `STEPS` points along the
/// segment, so the check allows for the gap between neighbouring samples.
pub fn worst_excess(fit: &CurveFit, points: &[f64], threshold: f64) -> f64 {
    let dims = fit.dims;
    let orig = fit.orig_index.as_deref().unwrap_or_default();
    let mut worst = f64::NEG_INFINITY;
    for k in 0..fit.segment_count() {
        let controls = fit.segment(k);
        let leg = controls
            .windows(2)
            .map(|w| ops::distance(w[0], w[1]))
            .fold(0.0, f64::max);
        let slack = 3.0 * leg / STEPS as f64 + 1e-9;
        let curve: Vec<_> = (0..=STEPS)
            .map(|s| fit.evaluate(k, s as f64 / STEPS as f64))
            .collect();
        for i in orig[k]..=orig[k + 1] {
            let pt = &points[i * dims..(i + 1) * dims];
            let nearest = curve
                .iter()
                .map(|c| ops::distance(c, pt))
                .fold(f64::INFINITY, f64::min);
            worst = worst.max(nearest - threshold - slack);
        }
    }
    worst
}

/// Check the structural invariants every fit must satisfy.
pub fn check_structure(fit: &CurveFit, points: &[f64]) {
    let dims = fit.dims;
    let n = points.len() / dims;
    let orig = fit.orig_index.as_deref().unwrap_or_default();
    assert_eq!(orig.len(), fit.knot_count());
    assert_eq!(orig.first(), Some(&0));
    assert_eq!(orig.last(), Some(&(n - 1)));
    assert!(orig.windows(2).all(|w| w[0] < w[1]));
    for (k, &i) in orig.iter().enumerate() {
        assert_eq!(fit.knot(k).point, &points[i * dims..(i + 1) * dims]);
    }
    assert!(fit.knots.iter().all(|v| v.is_finite()));
}
