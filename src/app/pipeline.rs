//! Shared analysis pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! window request -> clamped window -> line fit -> aquifer parameters
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Every call is independent: re-running with a new window is how the TUI
//! reacts to key presses.

use serde::{Deserialize, Serialize};

use crate::domain::{AquiferParameters, FitResult, FitWindow, ObservationSeries, TestGeometry};
use crate::error::FitError;
use crate::fit::{fit_window, select_window};
use crate::models::estimate_parameters;

/// All computed outputs for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub window: FitWindow,
    pub fit: FitResult,
    pub parameters: AquiferParameters,
}

/// Per-sample view of an analysis, for tables and exports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub index: usize,
    pub time: f64,
    pub drawdown: f64,
    pub fitted: f64,
    pub residual: f64,
    pub u: f64,
}

/// Run the full analysis for the requested window `[start, end)`.
pub fn analyze(
    series: &ObservationSeries,
    start: usize,
    end: usize,
    geometry: &TestGeometry,
) -> Result<Analysis, FitError> {
    let window = select_window(start, end, series.len())?;
    log::debug!("requested [{start}, {end}) -> window {window} of {}", series.len());

    let fit = fit_window(series, window)?;
    let parameters = estimate_parameters(&fit, geometry, series.window_times(&window))?;

    Ok(Analysis {
        window,
        fit,
        parameters,
    })
}

impl Analysis {
    /// One row per windowed observation.
    pub fn rows(&self, series: &ObservationSeries) -> Vec<SampleRow> {
        self.window
            .range()
            .zip(self.parameters.u.iter())
            .map(|(index, &u)| {
                let time = series.times()[index];
                let drawdown = series.drawdowns()[index];
                let fitted = self.fit.predict(time);
                SampleRow {
                    index,
                    time,
                    drawdown,
                    fitted,
                    residual: drawdown - fitted,
                    u,
                }
            })
            .collect()
    }
}
