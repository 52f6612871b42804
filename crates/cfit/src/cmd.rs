//! Command handlers for the `cfit` CLI.

use std::path::Path;

use anyhow::{Context, Result};
use cubicfit::{CurveFit, CurveFitter, FitOptions};
use log::info;

use crate::io;

/// Inputs shared by every subcommand that runs a fit.
pub struct FitInput<'a> {
    /// Point file to read.
    pub input: &'a Path,
    /// Output path; stdout when `None`.
    pub output: Option<&'a Path>,
    /// Options passed to the fitter.
    pub options: FitOptions,
    /// Optional corner indices.
    pub corners: Option<&'a [usize]>,
}

/// Read the input file and fit it.
fn run_fit(input: &FitInput<'_>) -> Result<CurveFit> {
    let points = io::read_points(input.input)?;
    info!(
        "read {} point(s) in {} dimension(s) from {}",
        points.point_count(),
        points.dims,
        input.input.display()
    );
    let fit = CurveFitter::new(input.options)
        .fit(&points.coords, points.dims, input.corners)
        .with_context(|| format!("fitting {}", input.input.display()))?;
    info!(
        "fit {} segment(s) at threshold {}",
        fit.segment_count(),
        input.options.error_threshold
    );
    Ok(fit)
}

/// Fit a point file and write its knots.
pub fn fit(input: &FitInput<'_>, with_index: bool) -> Result<()> {
    let fit = run_fit(input)?;
    let mut out = io::open_output(input.output)?;
    io::write_knots(&mut *out, &fit, with_index)
}

/// Fit a point file and write the curve sampled `steps` times per segment.
pub fn sample(input: &FitInput<'_>, steps: usize) -> Result<()> {
    let fit = run_fit(input)?;
    let mut out = io::open_output(input.output)?;
    io::write_samples(&mut *out, &fit, steps)
}
