//! Reading point files and writing fitted curves.
//!
//! Point files hold one point per line. Coordinates are separated by
//! whitespace or commas; blank lines and anything after `#` are ignored.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, bail};
use cubicfit::CurveFit;

/// Points read from a point file, stored flat.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    /// Coordinates per point.
    pub dims: usize,
    /// `point_count() * dims` scalars, row-major.
    pub coords: Vec<f64>,
}

impl PointSet {
    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.coords.len() / self.dims
    }
}

/// Parse the contents of a point file.
pub fn parse_points(text: &str) -> Result<PointSet> {
    let mut dims = 0;
    let mut coords = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        let start = coords.len();
        for field in content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
        {
            let value: f64 = field
                .parse()
                .with_context(|| format!("line {}: invalid number '{field}'", lineno + 1))?;
            coords.push(value);
        }

        let found = coords.len() - start;
        if found == 0 {
            continue;
        }
        if dims == 0 {
            dims = found;
        } else if found != dims {
            bail!(
                "line {}: expected {dims} coordinates, found {found}",
                lineno + 1
            );
        }
    }

    if dims == 0 {
        bail!("no points in input");
    }
    Ok(PointSet { dims, coords })
}

/// Read and parse a point file.
pub fn read_points(path: &Path) -> Result<PointSet> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_points(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Open `path` for writing, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Write coordinates separated by single spaces.
fn write_coords(out: &mut dyn Write, coords: &[f64]) -> io::Result<()> {
    for (i, v) in coords.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{v}")?;
    }
    Ok(())
}

/// Write one knot per line as `incoming | point | outgoing`.
///
/// With `with_index`, the input sample index of each knot follows as a fourth
/// field.
pub fn write_knots(out: &mut dyn Write, fit: &CurveFit, with_index: bool) -> Result<()> {
    let index = if with_index {
        fit.orig_index.as_deref()
    } else {
        None
    };
    for (k, knot) in fit.iter_knots().enumerate() {
        write_coords(out, knot.incoming)?;
        write!(out, " | ")?;
        write_coords(out, knot.point)?;
        write!(out, " | ")?;
        write_coords(out, knot.outgoing)?;
        if let Some(idx) = index {
            write!(out, " | {}", idx[k])?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the fitted curve sampled at `steps` points per segment.
///
/// The output is itself a valid point file. Shared knots are written once.
pub fn write_samples(out: &mut dyn Write, fit: &CurveFit, steps: usize) -> Result<()> {
    let segments = fit.segment_count();
    for seg in 0..segments {
        let last = seg + 1 == segments;
        let count = if last { steps + 1 } else { steps };
        for s in 0..count {
            let pt = fit.evaluate(seg, s as f64 / steps as f64);
            write_coords(out, &pt)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
