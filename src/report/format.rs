//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)
//!
//! Precision comes from [`DisplayConfig`]; nothing here is global.

use crate::app::pipeline::Analysis;
use crate::domain::{DisplayConfig, ObservationSeries, Plausibility, TestGeometry};
use crate::error::FitError;
use crate::fit::WindowScore;
use crate::models::JACOB_U_LIMIT;

/// Format the fit and parameter summary for one analysis.
pub fn format_summary(analysis: &Analysis, geometry: &TestGeometry, display: &DisplayConfig) -> String {
    let p = display.precision;
    let fit = &analysis.fit;
    let params = &analysis.parameters;
    let mut out = String::new();

    out.push_str("=== jacob - Cooper-Jacob straight-line fit ===\n");
    out.push_str(&format!(
        "Geometry: Q={:.p$} r={:.p$}\n",
        geometry.pumping_rate, geometry.distance
    ));
    out.push_str(&format!(
        "Window: {} ({} points)\n",
        analysis.window,
        analysis.window.len()
    ));

    out.push_str("\nLine fit: s = b0 + b1 * log10(t)\n");
    out.push_str(&format!("- b0  : {:.p$}\n", fit.intercept));
    out.push_str(&format!("- b1  : {:.p$}\n", fit.slope));
    out.push_str(&format!("- rss : {:.p$e}\n", fit.rss));
    out.push_str(&format!("- rmse: {:.p$e}\n", fit.rmse));

    out.push_str("\nAquifer parameters:\n");
    out.push_str(&format!("- T   : {:.p$}\n", params.transmissivity));
    out.push_str(&format!("- S   : {:.p$e}\n", params.storativity));
    out.push_str(&format!("- t0  : {:.p$}\n", params.t0));
    match params.u_range() {
        Some((lo, hi)) => out.push_str(&format!("- u   : [{lo:.p$e}, {hi:.p$e}]\n")),
        None => out.push_str("- u   : -\n"),
    }
    out.push_str(&format!(
        "- u < {JACOB_U_LIMIT}: {} of {}\n",
        params.count_below(JACOB_U_LIMIT),
        params.u.len()
    ));

    match &params.plausibility {
        Plausibility::Plausible => out.push_str("Status: plausible\n"),
        Plausibility::Implausible(reasons) => {
            out.push_str("Status: PHYSICALLY IMPLAUSIBLE\n");
            for r in reasons {
                out.push_str(&format!("  - {r}\n"));
            }
        }
    }

    out
}

/// Format the per-sample table (time, drawdown, fitted, residual, u).
pub fn format_samples(analysis: &Analysis, series: &ObservationSeries, display: &DisplayConfig) -> String {
    let p = display.precision;
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>10} {:>10} {:>10} {:>11} {:>11}\n",
        "idx", "time", "drawdown", "fitted", "residual", "u"
    ));
    out.push_str(&format!(
        "{:-<5} {:-<10} {:-<10} {:-<10} {:-<11} {:-<11}\n",
        "", "", "", "", "", ""
    ));
    for row in analysis.rows(series) {
        out.push_str(&format!(
            "{:>5} {:>10.2} {:>10.p$} {:>10.p$} {:>11.p$} {:>11.3e}\n",
            row.index, row.time, row.drawdown, row.fitted, row.residual, row.u
        ));
    }
    out
}

/// Format the top `top_n` windows of a scan.
pub fn format_scan(scores: &[WindowScore], top_n: usize, display: &DisplayConfig) -> String {
    let p = display.precision;
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>4} {:>11} {:>10} {:>10} {:>11} {:>6}\n",
        "window", "n", "rmse", "b1", "T", "S", "u<0.05"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<4} {:-<11} {:-<10} {:-<10} {:-<11} {:-<6}\n",
        "", "", "", "", "", "", ""
    ));
    for s in scores.iter().take(top_n) {
        let flag = if s.parameters.plausibility.is_plausible() { "" } else { " !" };
        out.push_str(
            format!(
                "{:<10} {:>4} {:>11.3e} {:>10.p$} {:>10.p$} {:>11.3e} {:>6}{flag}\n",
                s.window.to_string(),
                s.window.len(),
                s.fit.rmse,
                s.fit.slope,
                s.parameters.transmissivity,
                s.parameters.storativity,
                s.parameters.count_below(JACOB_U_LIMIT),
            )
            .as_str(),
        );
    }
    if scores.is_empty() {
        out.push_str("(no usable windows)\n");
    }
    out
}

/// One-line corrective hint for a core error.
pub fn format_error(err: &FitError) -> String {
    let hint = match err {
        FitError::InsufficientData { .. } => "widen the window to at least two observations",
        FitError::SingularFit { .. } => "choose a window spanning distinct times",
        FitError::InvalidFit { .. } => "choose a window where drawdown changes with log-time",
        FitError::InvalidSeries(_) => "fix the input data",
        FitError::InvalidGeometry(_) => "check the pumping rate and observation distance",
    };
    format!("{err} ({hint})")
}
