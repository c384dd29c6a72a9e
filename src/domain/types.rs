//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for reporting or comparisons

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Pumping-test observations: elapsed time and measured drawdown.
///
/// Invariants (checked once in [`ObservationSeries::new`]):
/// - `times` and `drawdowns` have equal, non-zero length
/// - every value is finite
/// - time is strictly positive and strictly increasing
/// - drawdown is non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    pub(crate) times: Vec<f64>,
    pub(crate) drawdowns: Vec<f64>,
}

impl ObservationSeries {
    pub fn new(times: Vec<f64>, drawdowns: Vec<f64>) -> Result<Self, FitError> {
        if times.len() != drawdowns.len() {
            return Err(FitError::InvalidSeries(format!(
                "time has {} values but drawdown has {}",
                times.len(),
                drawdowns.len()
            )));
        }
        if times.is_empty() {
            return Err(FitError::InvalidSeries("series is empty".to_string()));
        }

        for (k, (&t, &s)) in times.iter().zip(drawdowns.iter()).enumerate() {
            if !t.is_finite() || t <= 0.0 {
                return Err(FitError::InvalidSeries(format!(
                    "time[{k}] = {t} must be finite and > 0"
                )));
            }
            if !s.is_finite() || s < 0.0 {
                return Err(FitError::InvalidSeries(format!(
                    "drawdown[{k}] = {s} must be finite and >= 0"
                )));
            }
            if k > 0 && t <= times[k - 1] {
                return Err(FitError::InvalidSeries(format!(
                    "time must be strictly increasing: time[{}] = {} then time[{k}] = {t}",
                    k - 1,
                    times[k - 1]
                )));
            }
        }

        Ok(Self { times, drawdowns })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn drawdowns(&self) -> &[f64] {
        &self.drawdowns
    }

    pub fn window_times(&self, window: &FitWindow) -> &[f64] {
        &self.times[window.range()]
    }

    pub fn window_drawdowns(&self, window: &FitWindow) -> &[f64] {
        &self.drawdowns[window.range()]
    }
}

/// Half-open index range `[start, end)` over an [`ObservationSeries`].
///
/// Always holds at least two points. Build one with
/// [`crate::fit::select_window`] or [`FitWindow::full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FitWindow {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl FitWindow {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

impl std::fmt::Display for FitWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Straight-line fit `s = β0 + β1 · log10(t)` over one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub window: FitWindow,
    /// β0: drawdown at `t = 1`.
    pub intercept: f64,
    /// β1: drawdown per log cycle of time.
    pub slope: f64,
    /// Residual sum of squares.
    pub rss: f64,
    pub rmse: f64,
}

impl FitResult {
    /// Evaluate the fitted line at time `t`.
    pub fn predict(&self, t: f64) -> f64 {
        self.intercept + self.slope * t.log10()
    }
}

/// Pumping rate and distance from the pumped well to the observation well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestGeometry {
    /// Q, volume per unit time.
    pub pumping_rate: f64,
    /// r, length.
    pub distance: f64,
}

impl TestGeometry {
    pub fn new(pumping_rate: f64, distance: f64) -> Result<Self, FitError> {
        if !(pumping_rate.is_finite() && pumping_rate > 0.0) {
            return Err(FitError::InvalidGeometry(format!(
                "pumping rate {pumping_rate} must be finite and > 0"
            )));
        }
        if !(distance.is_finite() && distance > 0.0) {
            return Err(FitError::InvalidGeometry(format!(
                "observation distance {distance} must be finite and > 0"
            )));
        }
        Ok(Self {
            pumping_rate,
            distance,
        })
    }
}

/// Whether derived T and S are physically meaningful.
///
/// The estimator never rejects a fit on these grounds; it only flags it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reasons", rename_all = "snake_case")]
pub enum Plausibility {
    Plausible,
    Implausible(Vec<String>),
}

impl Plausibility {
    pub fn is_plausible(&self) -> bool {
        matches!(self, Plausibility::Plausible)
    }
}

/// Aquifer parameters derived from a [`FitResult`] and a [`TestGeometry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AquiferParameters {
    /// T, length² per unit time.
    pub transmissivity: f64,
    /// S, dimensionless.
    pub storativity: f64,
    /// Time at which the fitted line crosses zero drawdown.
    pub t0: f64,
    /// Dimensionless time, one value per windowed observation.
    pub u: Vec<f64>,
    pub plausibility: Plausibility,
}

impl AquiferParameters {
    /// Number of windowed observations with `u < limit`.
    pub fn count_below(&self, limit: f64) -> usize {
        self.u.iter().filter(|&&u| u < limit).count()
    }

    /// `(min, max)` of `u`, or `None` if no value is finite.
    pub fn u_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &u in self.u.iter().filter(|u| u.is_finite()) {
            lo = lo.min(u);
            hi = hi.max(u);
        }
        (lo <= hi).then_some((lo, hi))
    }
}

/// Presentation settings for reports and plots.
///
/// Passed explicitly to the report/plot layer; the fitting code never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Digits after the decimal point.
    pub precision: usize,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            plot_width: 72,
            plot_height: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rejects_mismatched_lengths() {
        let err = ObservationSeries::new(vec![1.0, 2.0], vec![0.1]).unwrap_err();
        assert!(matches!(err, FitError::InvalidSeries(_)));
    }

    #[test]
    fn series_rejects_non_increasing_time() {
        let err = ObservationSeries::new(vec![1.0, 3.0, 3.0], vec![0.1, 0.2, 0.3]).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"), "{err}");
    }

    #[test]
    fn series_rejects_non_positive_time_and_negative_drawdown() {
        assert!(ObservationSeries::new(vec![0.0, 1.0], vec![0.1, 0.2]).is_err());
        assert!(ObservationSeries::new(vec![1.0, 2.0], vec![-0.1, 0.2]).is_err());
        assert!(ObservationSeries::new(vec![1.0, f64::NAN], vec![0.1, 0.2]).is_err());
        assert!(ObservationSeries::new(vec![], vec![]).is_err());
    }

    #[test]
    fn series_accepts_zero_drawdown() {
        let series = ObservationSeries::new(vec![1.0, 2.0], vec![0.0, 0.1]).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn geometry_requires_positive_values() {
        assert!(TestGeometry::new(1.0, 90.0).is_ok());
        assert!(TestGeometry::new(0.0, 90.0).is_err());
        assert!(TestGeometry::new(1.0, -1.0).is_err());
        assert!(TestGeometry::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn u_range_and_count() {
        let params = AquiferParameters {
            transmissivity: 1.0,
            storativity: 1e-4,
            t0: 0.5,
            u: vec![0.2, 0.04, 0.01],
            plausibility: Plausibility::Plausible,
        };
        assert_eq!(params.count_below(0.05), 2);
        assert_eq!(params.u_range(), Some((0.01, 0.2)));
    }
}
