//! Adaptive subdivision: fit, refine, and split until every span is accepted.
//!
//! Each corner span is processed from an explicit work stack rather than by
//! recursion, so deep subdivision on degenerate input cannot exhaust the call
//! stack. The left half of a split is always processed before the right half,
//! which keeps accepted segments in input order.

use std::collections::TryReserveError;

use log::{trace, warn};

use crate::{
    config::FitOptions,
    deviation::{Deviation, max_error},
    lsq::{direct_segment, fit_segment},
    ops,
    parameterize::{chord_length_parameterize, length_cache, span_length},
    point::{Point, Points},
    reparameterize::reparameterize,
    segment::{Segment, SegmentChain},
};

/// A sub-span waiting to be fit.
#[derive(Debug)]
struct Task {
    /// First point index, relative to the corner span.
    start: usize,
    /// Last point index (inclusive), relative to the corner span.
    end: usize,
    /// Tangent at `start`, pointing against the direction of travel.
    tan_l: Point,
    /// Tangent at `end`, pointing against the direction of travel.
    tan_r: Point,
    /// Number of splits between the corner span and this task.
    depth: usize,
}

/// What to do with a task after a fitting attempt.
#[derive(Debug)]
enum Outcome {
    /// The segment is final, with the parameters it was last measured
    /// against (`None` for closed-form segments).
    Accept(Segment, Option<Vec<f64>>),
    /// Split at this index, relative to the task's first point.
    Split(usize),
}

/// Fits one corner span into a chain of segments.
pub struct SpanFitter<'a> {
    /// Every point of the corner span.
    points: Points<'a>,
    /// Consecutive-point distances for `points`.
    cache: Vec<f64>,
    /// Fitting options.
    options: &'a FitOptions,
}

impl<'a> SpanFitter<'a> {
    /// Prepare to fit `points`, which must hold at least two samples.
    pub fn new(points: Points<'a>, options: &'a FitOptions) -> Self {
        debug_assert!(points.len() >= 2);
        Self {
            cache: length_cache(points),
            points,
            options,
        }
    }

    /// Summed chord length of the span.
    pub fn total_length(&self) -> f64 {
        span_length(&self.cache)
    }

    /// Fit the whole span between the given boundary tangents.
    pub fn fit(&self, tan_l: Point, tan_r: Point) -> Result<SegmentChain, TryReserveError> {
        let mut chain = SegmentChain::new(self.points.dims());
        self.run(tan_l, tan_r, |_, seg, _| chain.push(seg))?;
        Ok(chain)
    }

    /// Drive the work stack, handing each accepted segment to `accept` in
    /// input order.
    fn run<F>(&self, tan_l: Point, tan_r: Point, mut accept: F) -> Result<(), TryReserveError>
    where
        F: FnMut(&Task, Segment, Option<&[f64]>) -> Result<(), TryReserveError>,
    {
        let mut stack = vec![Task {
            start: 0,
            end: self.points.len() - 1,
            tan_l,
            tan_r,
            depth: 0,
        }];

        while let Some(task) = stack.pop() {
            match self.attempt(&task) {
                Outcome::Accept(seg, params) => accept(&task, seg, params.as_deref())?,
                Outcome::Split(offset) => {
                    let split = task.start + offset;
                    let tan_center = self.split_tangent(split);
                    trace!(
                        "split {}..={} at {} (depth {})",
                        task.start, task.end, split, task.depth
                    );
                    stack.try_reserve(2)?;
                    stack.push(Task {
                        start: split,
                        end: task.end,
                        tan_l: tan_center.clone(),
                        tan_r: task.tan_r,
                        depth: task.depth + 1,
                    });
                    stack.push(Task {
                        start: task.start,
                        end: split,
                        tan_l: task.tan_l,
                        tan_r: tan_center,
                        depth: task.depth + 1,
                    });
                }
            }
        }

        Ok(())
    }

    /// Tangent shared by both halves of a split at `split`.
    ///
    /// Taken from the neighbours on either side; when those coincide the split
    /// point itself stands in for the left neighbour.
    fn split_tangent(&self, split: usize) -> Point {
        let pt_b = self.points.get(split + 1);
        let mut pt_a = self.points.get(split - 1);
        if ops::equals(pt_a, pt_b) {
            pt_a = self.points.get(split);
        }
        Point::direction(pt_a, pt_b)
    }

    /// Try to fit a single segment to `task`.
    fn attempt(&self, task: &Task) -> Outcome {
        let span = self.points.span(task.start, task.end);

        if span.len() == 2 {
            return Outcome::Accept(direct_segment(span, &task.tan_l, &task.tan_r), None);
        }

        let Some(mut u) = chord_length_parameterize(span, Some(&self.cache[task.start..=task.end]))
        else {
            trace!("span {}..={} has zero length", task.start, task.end);
            return Outcome::Accept(direct_segment(span, &task.tan_l, &task.tan_r), None);
        };

        let error_sq = self.options.error_sq();
        let mut seg = fit_segment(span, &u, &task.tan_l, &task.tan_r);
        let mut dev = max_error(&seg, span, &u);
        if dev.error_sq < error_sq {
            return accepted(task, seg, u, dev);
        }

        for round in 0..self.options.max_iterations {
            let Some(u_prime) = reparameterize(&seg, span, &u) else {
                trace!(
                    "span {}..={}: reparameterization rejected in round {}",
                    task.start, task.end, round
                );
                break;
            };
            seg = fit_segment(span, &u_prime, &task.tan_l, &task.tan_r);
            dev = max_error(&seg, span, &u_prime);
            if dev.error_sq < error_sq {
                return accepted(task, seg, u_prime, dev);
            }
            u = u_prime;
        }

        if self.options.max_depth.is_some_and(|max| task.depth >= max) {
            warn!(
                "span {}..={} reached depth {}; accepting error {:.6}",
                task.start,
                task.end,
                task.depth,
                dev.error_sq.sqrt()
            );
            return Outcome::Accept(seg, Some(u));
        }

        Outcome::Split(dev.index)
    }
}

/// Accept `seg`, measured against `params`, for `task`.
fn accepted(task: &Task, seg: Segment, params: Vec<f64>, dev: Deviation) -> Outcome {
    trace!(
        "accept {}..={} with error {:.6}",
        task.start,
        task.end,
        dev.error_sq.sqrt()
    );
    Outcome::Accept(seg, Some(params))
}
