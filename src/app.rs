//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - loads observations (CSV or the built-in reference test)
//! - runs the pipeline / window scan
//! - prints reports/plots
//! - writes optional exports

use std::io::Write;

use clap::Parser;

use crate::cli::{Command, DataArgs, FitArgs, ScanArgs, SimulateArgs};
use crate::data::{SyntheticSpec, log_spaced_times, reference_series, synthesize};
use crate::domain::{DisplayConfig, ObservationSeries, TestGeometry};
use crate::error::AppError;
use crate::io::IngestOptions;

pub mod pipeline;

/// Entry point for the `jacob` binary.
pub fn run() -> Result<(), AppError> {
    // Geometry defaults may live in `.env`; a missing file is fine.
    dotenvy::dotenv().ok();

    // We want `jacob` and `jacob -f data.csv` to behave like `jacob tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Scan(args) => handle_scan(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let (series, geometry) = load_inputs(&args.data)?;
    let display = DisplayConfig {
        precision: args.precision,
        plot_width: args.width,
        plot_height: args.height,
    };

    let end = args.end.unwrap_or(series.len());
    let analysis = pipeline::analyze(&series, args.start, end, &geometry).map_err(|e| {
        log::error!("{}", crate::report::format_error(&e));
        AppError::from(e)
    })?;

    println!("{}", crate::report::format_summary(&analysis, &geometry, &display));
    if args.table {
        println!("{}", crate::report::format_samples(&analysis, &series, &display));
    }
    if args.plot && !args.no_plot {
        println!("{}", crate::plot::render_ascii_plot(&series, Some(&analysis), &display));
    }

    if let Some(path) = &args.export {
        crate::io::write_results_csv(path, &series, &analysis)?;
        log::info!("wrote results CSV to {}", path.display());
    }
    if let Some(path) = &args.export_json {
        crate::io::write_report_json(path, &analysis, &geometry)?;
        log::info!("wrote report JSON to {}", path.display());
    }

    Ok(())
}

fn handle_scan(args: ScanArgs) -> Result<(), AppError> {
    let (series, geometry) = load_inputs(&args.data)?;
    let display = DisplayConfig {
        precision: args.precision,
        ..DisplayConfig::default()
    };

    let scores = crate::fit::scan_windows(&series, &geometry, args.min_len);
    println!("{}", crate::report::format_scan(&scores, args.top, &display));
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    if !(args.t_min.is_finite() && args.t_min > 0.0 && args.t_max > args.t_min) {
        return Err(AppError::new(2, "Time range must satisfy 0 < t_min < t_max."));
    }
    let spec = SyntheticSpec {
        transmissivity: args.transmissivity,
        storativity: args.storativity,
        geometry: TestGeometry::new(args.rate, args.distance)?,
        times: log_spaced_times(args.t_min, args.t_max, args.count),
        noise_sd: args.noise,
        seed: args.seed,
    };
    let series = synthesize(&spec)?;

    match &args.out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
            write_series_csv(file, &series)?;
            log::info!("wrote {} synthetic observations to {}", series.len(), path.display());
        }
        None => write_series_csv(std::io::stdout().lock(), &series)?,
    }
    Ok(())
}

fn handle_tui(args: DataArgs) -> Result<(), AppError> {
    let (series, geometry) = load_inputs(&args)?;
    crate::tui::run(series, geometry)
}

/// Resolve the observation series and geometry from CLI flags.
pub fn load_inputs(args: &DataArgs) -> Result<(ObservationSeries, TestGeometry), AppError> {
    let geometry = TestGeometry::new(args.rate, args.distance)?;
    let series = match &args.csv {
        Some(path) => {
            let options = IngestOptions {
                time_column: args.time_col.clone(),
                drawdown_column: args.drawdown_col.clone(),
                drawdown_scale: args.drawdown_scale,
            };
            crate::io::load_series(path, &options)?
        }
        None => {
            log::info!("no --csv given; using the built-in reference test");
            reference_series()
        }
    };
    Ok((series, geometry))
}

fn write_series_csv<W: Write>(mut out: W, series: &ObservationSeries) -> Result<(), AppError> {
    let err = |e: std::io::Error| AppError::new(2, format!("Failed to write CSV: {e}"));
    writeln!(out, "time,drawdown").map_err(err)?;
    for (t, s) in series.times().iter().zip(series.drawdowns()) {
        // Shortest exact form, so the file reads back to the same values.
        writeln!(out, "{t},{s}").map_err(err)?;
    }
    Ok(())
}

/// Rewrite argv so `jacob` defaults to `jacob tui`.
///
/// Rules:
/// - `jacob`                      -> `jacob tui`
/// - `jacob -f data.csv ...`      -> `jacob tui -f data.csv ...`
/// - `jacob --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "scan" | "simulate" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["jacob"])), args(&["jacob", "tui"]));
        assert_eq!(
            rewrite_args(args(&["jacob", "-f", "x.csv"])),
            args(&["jacob", "tui", "-f", "x.csv"])
        );
        assert_eq!(rewrite_args(args(&["jacob", "--help"])), args(&["jacob", "--help"]));
        assert_eq!(rewrite_args(args(&["jacob", "scan"])), args(&["jacob", "scan"]));
    }

    #[test]
    fn simulated_csv_reads_back() {
        let spec = SyntheticSpec {
            transmissivity: 0.4,
            storativity: 1.6e-4,
            geometry: crate::data::reference_geometry(),
            times: log_spaced_times(1.0, 720.0, 8),
            noise_sd: 0.0,
            seed: 1,
        };
        let series = synthesize(&spec).unwrap();
        let mut buf = Vec::new();
        write_series_csv(&mut buf, &series).unwrap();

        let back = crate::io::read_series(buf.as_slice(), &IngestOptions::default()).unwrap();
        assert_eq!(back.len(), 8);
        assert_eq!(back, series);
    }

    #[test]
    fn tiny_and_close_times_survive_csv() {
        let series = ObservationSeries::new(
            vec![1e-7, 2e-7, 5e-7, 1.000_000_1, 1.000_000_2],
            vec![0.1, 0.123_456_789_012_3, 0.2, 0.3, 0.3],
        )
        .unwrap();
        let mut buf = Vec::new();
        write_series_csv(&mut buf, &series).unwrap();

        let back = crate::io::read_series(buf.as_slice(), &IngestOptions::default()).unwrap();
        assert_eq!(back, series);
    }
}
