//! Adaptive cubic Bézier fitting for N‑dimensional point sequences.
//!
//! Given ordered samples and an error threshold, [`fit_curve`] returns the
//! fewest cubic segments it can find whose curve stays within the threshold of
//! every sample, while passing exactly through a caller-chosen set of corner
//! samples.
//!
//! Each span between corners is fit independently:
//!
//! 1. Samples get chord-length parameters.
//! 2. Handle lengths along fixed end tangents are found by least squares.
//! 3. If the worst sample misses the threshold, parameters are refined with
//!    Newton–Raphson steps and the fit is retried.
//! 4. If that still fails, the span is split at the worst sample and both
//!    halves are fit on their own.
//!
//! # Example
//!
//! ```
//! let points = [0.0, 0.0, 10.0, 0.0];
//! let fit = cubicfit::fit_curve(&points, 2, 0.01, None)?;
//! assert_eq!(fit.knot_count(), 2);
//! assert_eq!(fit.knot(0).outgoing, &[10.0 / 3.0, 0.0]);
//! # Ok::<(), cubicfit::error::Error>(())
//! ```

/// Flattening of segments into knots, and the result type.
pub mod assemble;
/// Fitting options.
pub mod config;
/// Deviation of samples from a fitted segment.
pub mod deviation;
/// Error types used across the crate.
pub mod error;
/// Adaptive subdivision of corner spans.
pub mod fitter;
/// Least-squares handle fitting.
pub mod lsq;
/// Vector arithmetic over coordinate slices.
pub mod ops;
/// Chord-length parameterization.
pub mod parameterize;
/// N‑dimensional points and point buffers.
pub mod point;
/// Newton–Raphson parameter refinement.
pub mod reparameterize;
/// Cubic segments and segment chains.
pub mod segment;

use log::debug;

pub use crate::{
    assemble::{CurveFit, Knot},
    config::FitOptions,
    error::{Error, Result},
};
use crate::{
    fitter::SpanFitter,
    point::{Point, Points},
    segment::{Segment, SegmentChain},
};

/// Fit a curve with default options and the given error threshold.
///
/// `points` holds `point_count * dims` scalars, row-major. `corners`, when
/// given, must be strictly increasing, start at 0 and end at the last point.
pub fn fit_curve(
    points: &[f64],
    dims: usize,
    error_threshold: f64,
    corners: Option<&[usize]>,
) -> Result<CurveFit> {
    CurveFitter::new(FitOptions::new(error_threshold)).fit(points, dims, corners)
}

/// Single-precision variant of [`fit_curve`].
///
/// The fit runs in double precision; only the input and output are converted.
pub fn fit_curve_f32(
    points: &[f32],
    dims: usize,
    error_threshold: f32,
    corners: Option<&[usize]>,
) -> Result<CurveFit<f32>> {
    CurveFitter::new(FitOptions::new(f64::from(error_threshold))).fit_f32(points, dims, corners)
}

/// Runs fits with a fixed set of options.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurveFitter {
    /// Options applied to every fit.
    options: FitOptions,
}

impl CurveFitter {
    /// A fitter using `options`.
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// The options this fitter applies.
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit `points` (`dims` scalars per point) through the given corners.
    ///
    /// Without corners the whole input is one span from the first point to the
    /// last. A single point yields two identical knots with zero-length handles.
    pub fn fit(&self, points: &[f64], dims: usize, corners: Option<&[usize]>) -> Result<CurveFit> {
        self.options.validate()?;
        let points = validate_points(points, dims)?;
        let n = points.len();

        let implicit = [0, n - 1];
        let corner_list = match corners {
            Some(c) => {
                validate_corners(c, n)?;
                c
            }
            None => &implicit[..],
        };

        let mut chain = SegmentChain::new(dims);
        let mut corner_index = match corners {
            Some(c) => {
                let mut v = Vec::new();
                v.try_reserve_exact(c.len())?;
                v.push(c[0]);
                Some(v)
            }
            None => None,
        };

        for pair in corner_list.windows(2) {
            let (first, last) = (pair[0], pair[1]);
            if last > first {
                let span = points.span(first, last);
                let fitter = SpanFitter::new(span, &self.options);
                let length = fitter.total_length();
                if !length.is_finite() {
                    return Err(Error::SpanOverflow {
                        start: first,
                        end: last,
                    });
                }
                if ops::is_almost_zero(length) {
                    return Err(Error::ZeroLengthSpan {
                        start: first,
                        end: last,
                    });
                }
                let tan_l = Point::direction(span.get(0), span.get(1));
                let tan_r = Point::direction(span.get(span.len() - 2), span.last());
                let mut span_chain = fitter.fit(tan_l, tan_r)?;
                debug!(
                    "span {}..={}: {} segment(s)",
                    first,
                    last,
                    span_chain.len()
                );
                chain.append(&mut span_chain)?;
            } else if n == 1 {
                chain.push(Segment::degenerate(points.first()))?;
            }

            if let Some(v) = corner_index.as_mut() {
                v.push(chain.len());
            }
        }

        let knots = assemble::flatten(&chain)?;
        let orig_index = if self.options.orig_index {
            Some(assemble::orig_indices(&chain, corner_list[corner_list.len() - 1])?)
        } else {
            None
        };
        debug!(
            "fit {} point(s) in {} dimension(s) to {} knot(s)",
            n,
            dims,
            chain.len() + 1
        );

        Ok(CurveFit {
            dims,
            knots,
            orig_index,
            corner_index,
        })
    }

    /// Single-precision variant of [`CurveFitter::fit`].
    pub fn fit_f32(
        &self,
        points: &[f32],
        dims: usize,
        corners: Option<&[usize]>,
    ) -> Result<CurveFit<f32>> {
        let mut wide = Vec::new();
        wide.try_reserve_exact(points.len())?;
        wide.extend(points.iter().map(|&v| f64::from(v)));
        let fit = self.fit(&wide, dims, corners)?;
        Ok(fit.map(|v| v as f32))
    }
}

/// Check the point buffer and wrap it as a view.
fn validate_points(points: &[f64], dims: usize) -> Result<Points<'_>> {
    if dims == 0 {
        return Err(Error::ZeroDimension);
    }
    if !points.len().is_multiple_of(dims) {
        return Err(Error::BufferLength {
            len: points.len(),
            dims,
        });
    }
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    let view = Points::new(points, dims);
    if let Some(index) = view.iter().position(|p| !ops::is_finite(p)) {
        return Err(Error::NonFiniteCoordinate { index });
    }
    Ok(view)
}

/// Check that `corners` is a valid corner list for `n` points.
fn validate_corners(corners: &[usize], n: usize) -> Result<()> {
    if corners.len() < 2 {
        return Err(Error::TooFewCorners(corners.len()));
    }
    if corners[0] != 0 {
        return Err(Error::CornerStart(corners[0]));
    }
    let last = corners[corners.len() - 1];
    if last != n - 1 {
        return Err(Error::CornerEnd {
            index: last,
            last: n - 1,
        });
    }
    for (position, pair) in corners.windows(2).enumerate() {
        let (previous, index) = (pair[0], pair[1]);
        // A lone point has the single corner span 0..=0.
        let repeat_ok = n == 1 && corners.len() == 2;
        if index <= previous && !repeat_ok {
            return Err(Error::CornerOrder {
                position: position + 1,
                previous,
                index,
            });
        }
    }
    Ok(())
}
