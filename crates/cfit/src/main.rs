//! Command‑line entry point for the `cfit` tool.
//!
//! Fits cubic Bézier curves to point files, writing either the knots or the
//! fitted curve resampled as points.

use std::{fmt::Display, path::PathBuf, process};

use clap::{Parser, Subcommand};
use cubicfit::{FitOptions, config::DEFAULT_MAX_ITERATIONS};
use env_logger::Env;

/// CLI command implementations.
mod cmd;
/// Point file parsing and curve output.
mod io;

use crate::cmd::FitInput;

#[derive(Parser)]
#[command(name = "cfit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
/// Arguments shared by every fitting subcommand.
struct CommonArgs {
    #[arg(
        short = 'e',
        long = "error",
        value_name = "THRESHOLD",
        default_value_t = 1.0,
        help = "Maximum distance between a sample and the fitted curve"
    )]
    /// Error threshold in input units.
    error: f64,

    #[arg(
        short = 'c',
        long = "corners",
        value_name = "INDEX,...",
        value_delimiter = ',',
        help = "Comma-separated sample indices the curve must break at (must include first and last)"
    )]
    /// Optional corner indices.
    corners: Option<Vec<usize>>,

    #[arg(help = "Point file: one point per line, coordinates separated by spaces or commas")]
    /// Input point file.
    input: PathBuf,

    #[arg(help = "Optional output file path; writes to stdout when omitted")]
    /// Optional output path.
    output: Option<PathBuf>,
}

impl CommonArgs {
    /// Borrow these arguments as fitter input with the given options.
    fn fit_input(&self, options: FitOptions) -> FitInput<'_> {
        FitInput {
            input: &self.input,
            output: self.output.as_deref(),
            options,
            corners: self.corners.as_deref(),
        }
    }
}

#[derive(Subcommand)]
/// Subcommands supported by the `cfit` tool.
enum Commands {
    #[command(about = "Fit a curve and write its knots")]
    /// Fit a curve and write one knot per line.
    Fit {
        #[command(flatten)]
        /// Input, output, threshold and corners.
        common: CommonArgs,

        #[arg(
            long = "iterations",
            value_name = "N",
            default_value_t = DEFAULT_MAX_ITERATIONS,
            help = "Newton refinement rounds per span before splitting"
        )]
        /// Reparameterization rounds per span.
        iterations: usize,

        #[arg(
            long = "max-depth",
            value_name = "N",
            help = "Accept the best fit once a span has been split N times"
        )]
        /// Optional split-depth limit.
        max_depth: Option<usize>,

        #[arg(
            long = "orig-index",
            default_value_t = false,
            help = "Append the input sample index of each knot"
        )]
        /// Write the knot → sample index column.
        orig_index: bool,
    },

    #[command(about = "Fit a curve and write it resampled as points")]
    /// Fit a curve and write evenly spaced parameter samples along it.
    Sample {
        #[command(flatten)]
        /// Input, output, threshold and corners.
        common: CommonArgs,

        #[arg(
            short = 'n',
            long = "steps",
            value_name = "STEPS",
            default_value_t = 16,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Samples per fitted segment"
        )]
        /// Samples per segment.
        steps: u32,
    },
}

/// Exit with an error message if `result` failed.
fn report_ok<E: Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the logger; each `-v` raises the default level one step.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.v);

    match cli.command {
        Commands::Fit {
            common,
            iterations,
            max_depth,
            orig_index,
        } => {
            let mut options = FitOptions::new(common.error).with_max_iterations(iterations);
            options.max_depth = max_depth;
            report_ok(cmd::fit(&common.fit_input(options), orig_index));
        }
        Commands::Sample { common, steps } => {
            let options = FitOptions::new(common.error).with_orig_index(false);
            report_ok(cmd::sample(&common.fit_input(options), steps as usize));
        }
    }
}
