//! Exhaustive window scan.
//!
//! Evaluates every contiguous window `[i, j)` with at least `min_len` points,
//! in parallel, and ranks the successful fits by RMSE. Windows whose fit is
//! singular or whose slope is unusable are skipped.
//!
//! This is the batch counterpart of moving the window by hand in the TUI. A
//! low RMSE only says the window is straight; it says nothing about whether
//! the Jacob approximation is valid there.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{AquiferParameters, FitResult, FitWindow, ObservationSeries, TestGeometry};
use crate::fit::{MIN_WINDOW_LEN, fit_window, select_window};
use crate::models::estimate_parameters;

/// One successfully fitted window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowScore {
    pub window: FitWindow,
    pub fit: FitResult,
    pub parameters: AquiferParameters,
}

/// Fit every window with at least `min_len` points and sort by RMSE.
///
/// Ties break on start index, then end index, so the output order does not
/// depend on thread scheduling.
pub fn scan_windows(series: &ObservationSeries, geometry: &TestGeometry, min_len: usize) -> Vec<WindowScore> {
    let n = series.len();
    let min_len = min_len.max(MIN_WINDOW_LEN);
    if min_len > n {
        return Vec::new();
    }

    let candidates: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + min_len..=n).map(move |j| (i, j)))
        .collect();

    let mut scores: Vec<WindowScore> = candidates
        .par_iter()
        .filter_map(|&(i, j)| {
            let window = select_window(i, j, n).ok()?;
            let fit = fit_window(series, window).ok()?;
            let parameters = estimate_parameters(&fit, geometry, series.window_times(&window)).ok()?;
            Some(WindowScore {
                window,
                fit,
                parameters,
            })
        })
        .collect();

    scores.sort_by(|a, b| {
        a.fit
            .rmse
            .partial_cmp(&b.fit.rmse)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.window.start().cmp(&b.window.start()))
            .then(a.window.end().cmp(&b.window.end()))
    });

    log::debug!("scanned {} windows, {} usable", candidates.len(), scores.len());
    scores
}
