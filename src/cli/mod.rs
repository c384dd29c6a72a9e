//! Command-line parsing for the Cooper–Jacob fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::{REFERENCE_DISTANCE, REFERENCE_PUMPING_RATE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "jacob", version, about = "Cooper-Jacob straight-line pumping-test analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one window, print T/S and diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Fit every window of at least `--min-len` points and rank them by RMSE.
    Scan(ScanArgs),
    /// Write a synthetic drawdown CSV drawn from a known T and S.
    Simulate(SimulateArgs),
    /// Launch the interactive window selector.
    ///
    /// This uses the same pipeline as `jacob fit`, re-run on every key press.
    Tui(DataArgs),
}

/// Where the observations come from, and the test geometry.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Observation CSV (defaults to the built-in reference test).
    #[arg(short = 'f', long)]
    pub csv: Option<PathBuf>,

    /// Name of the time column.
    #[arg(long, default_value = "time")]
    pub time_col: String,

    /// Name of the drawdown column.
    #[arg(long, default_value = "drawdown")]
    pub drawdown_col: String,

    /// Multiplier applied to drawdown values (e.g. 0.01 for cm -> m).
    #[arg(long, default_value_t = 1.0)]
    pub drawdown_scale: f64,

    /// Pumping rate Q (volume per unit time).
    #[arg(short = 'q', long, env = "JACOB_PUMPING_RATE", default_value_t = REFERENCE_PUMPING_RATE)]
    pub rate: f64,

    /// Distance r from the pumped well to the observation well.
    #[arg(short = 'r', long, env = "JACOB_DISTANCE", default_value_t = REFERENCE_DISTANCE)]
    pub distance: f64,
}

/// Options for fitting a single window.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// First observation index in the window (inclusive).
    #[arg(short = 's', long, default_value_t = 0)]
    pub start: usize,

    /// End observation index (exclusive). Defaults to the series length.
    #[arg(short = 'e', long)]
    pub end: Option<usize>,

    /// Digits after the decimal point in the report.
    #[arg(long, default_value_t = 4)]
    pub precision: usize,

    /// Print the per-sample table.
    #[arg(long)]
    pub table: bool,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-sample results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full analysis report to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for the window scan.
#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Minimum number of points per window.
    #[arg(long, default_value_t = 3)]
    pub min_len: usize,

    /// Show the top-N windows.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Digits after the decimal point.
    #[arg(long, default_value_t = 4)]
    pub precision: usize,
}

/// Options for synthetic data generation.
#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// True transmissivity T.
    #[arg(long, default_value_t = 0.4)]
    pub transmissivity: f64,

    /// True storativity S.
    #[arg(long, default_value_t = 1.6e-4)]
    pub storativity: f64,

    /// Pumping rate Q.
    #[arg(short = 'q', long, env = "JACOB_PUMPING_RATE", default_value_t = REFERENCE_PUMPING_RATE)]
    pub rate: f64,

    /// Observation distance r.
    #[arg(short = 'r', long, env = "JACOB_DISTANCE", default_value_t = REFERENCE_DISTANCE)]
    pub distance: f64,

    /// First sample time.
    #[arg(long, default_value_t = 1.0)]
    pub t_min: f64,

    /// Last sample time.
    #[arg(long, default_value_t = 720.0)]
    pub t_max: f64,

    /// Number of log-spaced samples.
    #[arg(short = 'n', long, default_value_t = 16)]
    pub count: usize,

    /// Standard deviation of Gaussian drawdown noise.
    #[arg(long, default_value_t = 0.005)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV (stdout if omitted).
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,
}
