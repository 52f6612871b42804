//! Newton–Raphson refinement of sample parameters against a fitted segment.

use crate::{ops, point::Point, point::Points, segment::Segment};

/// One Newton step towards the parameter of the point on `seg` closest to `p`.
///
/// The result may be non-finite when the denominator vanishes; callers must
/// check.
pub fn find_root(seg: &Segment, p: &[f64], u: f64) -> f64 {
    let dims = seg.dims();
    let mut q0 = Point::zeroed(dims);
    let mut q1 = Point::zeroed(dims);
    let mut q2 = Point::zeroed(dims);

    seg.point_at(u, &mut q0);
    seg.velocity(u, &mut q1);
    seg.acceleration(u, &mut q2);

    ops::sub_assign(&mut q0, p);
    u - ops::dot(&q0, &q1) / (ops::len_squared(&q1) + ops::dot(&q0, &q2))
}

/// Refine every parameter in `u` with one Newton step.
///
/// Returns `None` if any refined value is non-finite, or if the sorted values
/// leave `[0, 1]`. On success the returned parameters are sorted ascending.
pub fn reparameterize(seg: &Segment, points: Points<'_>, u: &[f64]) -> Option<Vec<f64>> {
    debug_assert_eq!(points.len(), u.len());
    let mut u_prime = Vec::with_capacity(u.len());
    for (pt, &ui) in points.iter().zip(u) {
        let root = find_root(seg, pt, ui);
        if !root.is_finite() {
            return None;
        }
        u_prime.push(root);
    }

    u_prime.sort_by(f64::total_cmp);

    let first = *u_prime.first()?;
    let last = *u_prime.last()?;
    if first < 0.0 || last > 1.0 {
        return None;
    }
    Some(u_prime)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch() -> Segment {
        Segment::new(&[0.0, 0.0], &[1.0, 2.0], &[3.0, 2.0], &[4.0, 0.0], 4)
    }

    #[test]
    fn exact_parameters_are_fixed_points() {
        let seg = arch();
        let mut pt = [0.0; 2];
        for t in [0.1, 0.3, 0.5, 0.9] {
            seg.point_at(t, &mut pt);
            assert!((find_root(&seg, &pt, t) - t).abs() < 1e-12);
        }
    }

    #[test]
    fn newton_moves_towards_closest_point() {
        let seg = arch();
        let mut pt = [0.0; 2];
        seg.point_at(0.4, &mut pt);
        let refined = find_root(&seg, &pt, 0.35);
        assert!((refined - 0.4).abs() < (0.35f64 - 0.4).abs());
    }

    #[test]
    fn refined_parameters_are_sorted_and_bounded() {
        let seg = arch();
        let truth = [0.0, 0.2, 0.45, 0.7, 1.0];
        let mut data = Vec::new();
        let mut pt = [0.0; 2];
        for &t in &truth {
            seg.point_at(t, &mut pt);
            data.extend_from_slice(&pt);
        }
        let guess = [0.0, 0.25, 0.5, 0.75, 1.0];
        let u = reparameterize(&seg, Points::new(&data, 2), &guess).unwrap();
        assert!(u.windows(2).all(|w| w[0] <= w[1]));
        assert!(u[0] >= 0.0 && u[4] <= 1.0);
        for (a, b) in u.iter().zip(truth) {
            assert!((a - b).abs() < 0.05);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        // A sample beyond the end of the curve pushes its parameter past 1.
        let seg = Segment::new(&[0.0, 0.0], &[1.0, 0.0], &[2.0, 0.0], &[3.0, 0.0], 2);
        let data = [0.0, 0.0, 1.5, 0.0, 6.0, 0.0];
        assert!(reparameterize(&seg, Points::new(&data, 2), &[0.0, 0.5, 1.0]).is_none());
    }

    #[test]
    fn rejects_non_finite() {
        // Every control point coincides: zero velocity and acceleration.
        let seg = Segment::degenerate(&[1.0, 1.0]);
        let data = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        assert!(reparameterize(&seg, Points::new(&data, 2), &[0.0, 0.5, 1.0]).is_none());
    }
}
