//! Straight-line fit of drawdown against log10(time).
//!
//! Given the observations inside a [`FitWindow`] we solve
//!
//! ```text
//! minimize Σ (s_k - (β0 + β1 · log10 t_k))^2
//! ```
//!
//! with the SVD solver from [`crate::math`]. A window whose log-times are all
//! the same has no defined slope; the solver would happily return its
//! minimum-norm answer (β1 ≈ 0), so we detect the condition and report
//! [`FitError::SingularFit`] instead.

use nalgebra::DVector;

use crate::domain::{FitResult, FitWindow, ObservationSeries};
use crate::error::FitError;
use crate::math::{has_spread, log_time_design, solve_least_squares};

/// Fit the Jacob straight line over `window`.
pub fn fit_window(series: &ObservationSeries, window: FitWindow) -> Result<FitResult, FitError> {
    let times = series.window_times(&window);
    let drawdowns = series.window_drawdowns(&window);
    fit_slices(times, drawdowns, window)
}

/// Fit the Jacob straight line over raw, equal-length slices.
///
/// Unlike [`fit_window`], no series validation is applied: times only need to
/// be positive for `log10` to make sense, and repeated times are allowed (they
/// produce [`FitError::SingularFit`] when nothing else varies).
pub fn fit_line(times: &[f64], drawdowns: &[f64]) -> Result<FitResult, FitError> {
    if times.len() != drawdowns.len() {
        return Err(FitError::InvalidSeries(format!(
            "time has {} values but drawdown has {}",
            times.len(),
            drawdowns.len()
        )));
    }
    if times.iter().chain(drawdowns).any(|v| !v.is_finite()) || times.iter().any(|&t| t <= 0.0) {
        return Err(FitError::InvalidSeries(
            "times must be finite and > 0, drawdowns finite".to_string(),
        ));
    }
    let window = crate::fit::select_window(0, times.len(), times.len())?;
    fit_slices(times, drawdowns, window)
}

fn fit_slices(times: &[f64], drawdowns: &[f64], window: FitWindow) -> Result<FitResult, FitError> {
    let singular = FitError::SingularFit {
        start: window.start(),
        end: window.end(),
    };

    let x = log_time_design(times);
    let log_t: Vec<f64> = x.column(1).iter().copied().collect();
    if !has_spread(&log_t) {
        return Err(singular);
    }

    let y = DVector::from_column_slice(drawdowns);
    let Some(ls) = solve_least_squares(&x, &y) else {
        return Err(singular);
    };
    if ls.rank < 2 {
        return Err(singular);
    }

    let intercept = ls.beta[0];
    let slope = ls.beta[1];

    let rss: f64 = log_t
        .iter()
        .zip(drawdowns)
        .map(|(&lt, &s)| {
            let r = s - (intercept + slope * lt);
            r * r
        })
        .sum();
    let rmse = (rss / times.len() as f64).sqrt();

    log::debug!(
        "fit {window}: beta0={intercept:.6} beta1={slope:.6} rss={rss:.6e} (n={})",
        times.len()
    );

    Ok(FitResult {
        window,
        intercept,
        slope,
        rss,
        rmse,
    })
}
