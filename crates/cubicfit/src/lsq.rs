//! Least-squares fit of handle lengths for a single cubic segment.
//!
//! The end points of the segment are fixed to the first and last samples and
//! the handle directions are fixed to the supplied tangents, so only the two
//! handle lengths are free. They come from a 2×2 normal-equations solve, with
//! a fallback for degenerate systems and a clamp that keeps handles within a
//! sphere around the (spacing-weighted) centre of the samples.

use crate::{ops, point::Point, point::Points, segment::Segment};

/// Handles are kept within this multiple of the sample radius around the centre.
const CLAMP_SCALE: f64 = 3.0;

/// Perturbation applied to a near-singular determinant, relative to its diagonal.
const DET_PERTURB: f64 = 10e-12;

/// Bernstein weight of `p1`.
fn b1(u: f64) -> f64 {
    let tmp = 1.0 - u;
    3.0 * u * tmp * tmp
}

/// Bernstein weight of `p2`.
fn b2(u: f64) -> f64 {
    3.0 * u * u * (1.0 - u)
}

/// Combined Bernstein weight of `p0` and `p1`.
fn b0_plus_b1(u: f64) -> f64 {
    let tmp = 1.0 - u;
    tmp * tmp * (1.0 + 2.0 * u)
}

/// Combined Bernstein weight of `p2` and `p3`.
fn b2_plus_b3(u: f64) -> f64 {
    u * u * (3.0 - 2.0 * u)
}

/// Centre of the samples, each weighted by the length of its two adjacent chords.
///
/// The span is treated as closed, so the first and last samples also pick up
/// the chord between them. This compensates for uneven sample spacing.
pub fn weighted_center(points: Points<'_>) -> Point {
    let n = points.len();
    let mut center = Point::zeroed(points.dims());
    if n == 0 {
        return center;
    }

    let mut curr = n - 1;
    let mut w_prev = if n >= 2 {
        points.distance(n - 2, curr)
    } else {
        0.0
    };
    let mut w_tot = 0.0;

    for next in 0..n {
        let w_next = points.distance(curr, next);
        let w = w_prev + w_next;
        w_tot += w;
        ops::madd_assign(&mut center, points.get(curr), w);
        w_prev = w_next;
        curr = next;
    }

    if w_tot != 0.0 {
        ops::scale_assign(&mut center, 1.0 / w_tot);
    }
    center
}

/// Solve the normal equations for the two handle lengths.
///
/// Returns `(alpha_l, alpha_r)`; either may be negative or non-finite when the
/// system is degenerate, which the caller must check.
fn solve_alphas(points: Points<'_>, u: &[f64], tan_l: &[f64], tan_r: &[f64]) -> (f64, f64) {
    let dims = points.dims();
    let p0 = points.first();
    let p3 = points.last();

    let mut a0 = Point::zeroed(dims);
    let mut a1 = Point::zeroed(dims);
    let mut tmp = Point::zeroed(dims);

    let mut x = [0.0; 2];
    let mut c = [[0.0; 2]; 2];

    for (pt, &ui) in points.iter().zip(u) {
        // The left tangent points away from the span, so its handle moves
        // against it.
        ops::scale(&mut a0, tan_l, -b1(ui));
        ops::scale(&mut a1, tan_r, b2(ui));

        c[0][0] += ops::dot(&a0, &a0);
        c[0][1] += ops::dot(&a0, &a1);
        c[1][1] += ops::dot(&a1, &a1);

        let w0 = b0_plus_b1(ui);
        let w3 = b2_plus_b3(ui);
        for (j, t) in tmp.iter_mut().enumerate() {
            *t = pt[j] - (p0[j] * w0) - (p3[j] * w3);
        }

        x[0] += ops::dot(&a0, &tmp);
        x[1] += ops::dot(&a1, &tmp);
    }
    c[1][0] = c[0][1];

    let mut det_c0_c1 = c[0][0] * c[1][1] - c[0][1] * c[1][0];
    let det_c0_x = x[1] * c[0][0] - x[0] * c[0][1];
    let det_x_c1 = x[0] * c[1][1] - x[1] * c[0][1];

    if ops::is_almost_zero(det_c0_c1) {
        det_c0_c1 = c[0][0] * c[1][1] * DET_PERTURB;
    }

    // May still divide by zero; NaN is rejected by the caller.
    (det_x_c1 / det_c0_c1, det_c0_x / det_c0_c1)
}

/// Place the handles of `seg` at the given lengths along the tangents.
fn place_handles(seg: &mut Segment, tan_l: &[f64], tan_r: &[f64], alpha_l: f64, alpha_r: f64) {
    let p0 = Point::from_slice(seg.p0());
    let p3 = Point::from_slice(seg.p3());
    ops::msub(seg.control_mut(1), &p0, tan_l, alpha_l);
    ops::madd(seg.control_mut(2), &p3, tan_r, alpha_r);
}

/// Pull `handle` onto the sphere of squared radius `dist_sq_max` around `center`.
fn clamp_to_sphere(handle: &mut [f64], center: &[f64], dist_sq: f64, dist_sq_max: f64) {
    ops::sub_assign(handle, center);
    ops::scale_assign(handle, dist_sq_max.sqrt() / dist_sq.sqrt());
    ops::add_assign(handle, center);
}

/// A solved handle length is kept only when finite and non-negative.
fn usable_length(alpha: f64) -> bool {
    alpha.is_finite() && alpha >= 0.0
}

/// Fit a cubic to `points` under parameterization `u`.
///
/// `tan_l` and `tan_r` point against the direction of travel: the left handle
/// is placed at `p0 - tan_l * alpha_l` and the right at `p3 + tan_r * alpha_r`.
pub fn fit_segment(points: Points<'_>, u: &[f64], tan_l: &[f64], tan_r: &[f64]) -> Segment {
    debug_assert_eq!(points.len(), u.len());
    let dims = points.dims();
    let p0 = points.first();
    let p3 = points.last();

    let (mut alpha_l, mut alpha_r) = solve_alphas(points, u, tan_l, tan_r);

    if !usable_length(alpha_l) || !usable_length(alpha_r) {
        alpha_l = ops::distance(p0, p3) / 3.0;
        alpha_r = alpha_l;
    }

    let mut seg = Segment::zeroed(dims, points.len() - 1);
    seg.control_mut(0).copy_from_slice(p0);
    seg.control_mut(3).copy_from_slice(p3);
    place_handles(&mut seg, tan_l, tan_r, alpha_l, alpha_r);

    let center = weighted_center(points);
    let dist_sq_max = points
        .iter()
        .map(|pt| {
            pt.iter()
                .zip(center.iter())
                .map(|(a, b)| {
                    let d = (a - b) * CLAMP_SCALE;
                    d * d
                })
                .sum::<f64>()
        })
        .fold(0.0, f64::max);

    let mut p1_dist_sq = ops::distance_squared(&center, seg.p1());
    let mut p2_dist_sq = ops::distance_squared(&center, seg.p2());

    if p1_dist_sq > dist_sq_max || p2_dist_sq > dist_sq_max {
        let alpha = ops::distance(p0, p3) / 3.0;
        place_handles(&mut seg, tan_l, tan_r, alpha, alpha);
        p1_dist_sq = ops::distance_squared(&center, seg.p1());
        p2_dist_sq = ops::distance_squared(&center, seg.p2());
    }

    if p1_dist_sq > dist_sq_max {
        clamp_to_sphere(seg.control_mut(1), &center, p1_dist_sq, dist_sq_max);
    }
    if p2_dist_sq > dist_sq_max {
        clamp_to_sphere(seg.control_mut(2), &center, p2_dist_sq, dist_sq_max);
    }

    seg
}

/// Closed-form segment with both handles at a third of the chord length.
///
/// Used for two-point spans, where there is nothing to fit.
pub fn direct_segment(points: Points<'_>, tan_l: &[f64], tan_r: &[f64]) -> Segment {
    let p0 = points.first();
    let p3 = points.last();
    let mut seg = Segment::zeroed(points.dims(), points.len() - 1);
    seg.control_mut(0).copy_from_slice(p0);
    seg.control_mut(3).copy_from_slice(p3);
    let dist = ops::distance(p0, p3) / 3.0;
    place_handles(&mut seg, tan_l, tan_r, dist, dist);
    seg
}
