//! Fit window selection.
//!
//! A requested `(i, j)` pair is clamped against the series length before use:
//! `i` into `[0, n)` and `j` into `(i, n]`. The clamped window must still hold
//! two points, since a line needs two.

use crate::domain::FitWindow;
use crate::error::FitError;

/// Minimum number of observations in a fit window.
pub const MIN_WINDOW_LEN: usize = 2;

/// Validate and clamp a requested window against a series of length `n`.
pub fn select_window(start: usize, end: usize, n: usize) -> Result<FitWindow, FitError> {
    let clamped_start = start.min(n.saturating_sub(1));
    let clamped_end = end.clamp(clamped_start + 1, n.max(clamped_start + 1));

    if n < MIN_WINDOW_LEN || clamped_end - clamped_start < MIN_WINDOW_LEN {
        return Err(FitError::InsufficientData {
            requested: (start, end),
            clamped: (clamped_start, clamped_end.min(n)),
            len: n,
        });
    }

    Ok(FitWindow {
        start: clamped_start,
        end: clamped_end,
    })
}

impl FitWindow {
    /// The window covering all `n` observations.
    pub fn full(n: usize) -> Result<Self, FitError> {
        select_window(0, n, n)
    }
}
