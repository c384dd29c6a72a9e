//! Built-in observation data.
//!
//! - the reference pumping test used throughout the docs and tests
//! - a seeded synthetic generator that draws Jacob-line drawdown plus noise

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{ObservationSeries, TestGeometry};
use crate::error::FitError;
use crate::models::{JACOB_S_COEFF, JACOB_T_COEFF};

/// Reference pumping rate, m³/min (528 m³/day).
pub const REFERENCE_PUMPING_RATE: f64 = 528.0 / 1440.0;
/// Reference distance to the observation well, m.
pub const REFERENCE_DISTANCE: f64 = 90.0;

/// Elapsed time since pumping started, min.
const REFERENCE_TIMES: [f64; 16] = [
    1.0, 2.0, 4.0, 6.0, 9.0, 20.0, 30.0, 40.0, 50.0, 60.0, 90.0, 120.0, 150.0, 360.0, 550.0, 720.0,
];
/// Drawdown, cm.
const REFERENCE_DRAWDOWN_CM: [f64; 16] = [
    2.5, 3.9, 6.1, 8.0, 10.6, 16.8, 20.0, 22.6, 24.7, 26.4, 30.4, 33.0, 35.0, 42.6, 44.0, 44.5,
];

/// The 16-point reference test (time in min, drawdown in m).
pub fn reference_series() -> ObservationSeries {
    ObservationSeries {
        times: REFERENCE_TIMES.to_vec(),
        drawdowns: REFERENCE_DRAWDOWN_CM.iter().map(|cm| cm / 100.0).collect(),
    }
}

/// Geometry of the reference test.
pub fn reference_geometry() -> TestGeometry {
    TestGeometry {
        pumping_rate: REFERENCE_PUMPING_RATE,
        distance: REFERENCE_DISTANCE,
    }
}

/// Inputs for [`synthesize`].
#[derive(Debug, Clone)]
pub struct SyntheticSpec {
    pub transmissivity: f64,
    pub storativity: f64,
    pub geometry: TestGeometry,
    pub times: Vec<f64>,
    /// Standard deviation of additive Gaussian noise (drawdown units).
    pub noise_sd: f64,
    pub seed: u64,
}

/// Draw drawdown from the Jacob line `s = 0.183 Q/T · log10(2.25 T t / (r² S))`.
///
/// Noise is added per sample and the result is clamped at zero, since early
/// times can fall before the line's zero crossing.
pub fn synthesize(spec: &SyntheticSpec) -> Result<ObservationSeries, FitError> {
    if !(spec.transmissivity.is_finite() && spec.transmissivity > 0.0) {
        return Err(FitError::InvalidGeometry(format!(
            "synthetic transmissivity {} must be finite and > 0",
            spec.transmissivity
        )));
    }
    if !(spec.storativity.is_finite() && spec.storativity > 0.0) {
        return Err(FitError::InvalidGeometry(format!(
            "synthetic storativity {} must be finite and > 0",
            spec.storativity
        )));
    }
    if !(spec.noise_sd.is_finite() && spec.noise_sd >= 0.0) {
        return Err(FitError::InvalidSeries(format!(
            "noise standard deviation {} must be finite and >= 0",
            spec.noise_sd
        )));
    }
    let normal = Normal::new(0.0, spec.noise_sd)
        .map_err(|e| FitError::InvalidSeries(format!("noise standard deviation {}: {e}", spec.noise_sd)))?;

    let q = spec.geometry.pumping_rate;
    let r = spec.geometry.distance;
    let slope = JACOB_T_COEFF * q / spec.transmissivity;
    let scale = JACOB_S_COEFF * spec.transmissivity / (r * r * spec.storativity);

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let drawdowns = spec
        .times
        .iter()
        .map(|&t| {
            let clean = slope * (scale * t).log10();
            (clean + normal.sample(&mut rng)).max(0.0)
        })
        .collect();

    ObservationSeries::new(spec.times.clone(), drawdowns)
}

/// `n` log-spaced times from `t_min` to `t_max` (inclusive).
pub fn log_spaced_times(t_min: f64, t_max: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    let (a, b) = (t_min.log10(), t_max.log10());
    (0..n)
        .map(|i| 10f64.powf(a + (b - a) * i as f64 / (n - 1) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitWindow;
    use crate::fit::fit_window;
    use crate::models::estimate_parameters;

    #[test]
    fn reference_series_shape() {
        let s = reference_series();
        assert_eq!(
            ObservationSeries::new(s.times().to_vec(), s.drawdowns().to_vec()).unwrap(),
            s
        );
        assert_eq!(s.len(), 16);
        assert!((s.drawdowns()[0] - 0.025).abs() < 1e-15);
        assert!((s.drawdowns()[15] - 0.445).abs() < 1e-15);
        assert_eq!(s.times()[15], 720.0);
    }

    #[test]
    fn noise_free_synthesis_recovers_parameters() {
        let spec = SyntheticSpec {
            transmissivity: 0.5,
            storativity: 2e-4,
            geometry: reference_geometry(),
            times: log_spaced_times(30.0, 3000.0, 12),
            noise_sd: 0.0,
            seed: 7,
        };
        let series = synthesize(&spec).unwrap();
        let fit = fit_window(&series, FitWindow::full(series.len()).unwrap()).unwrap();
        let p = estimate_parameters(&fit, &spec.geometry, series.times()).unwrap();

        assert!((p.transmissivity - 0.5).abs() < 1e-9, "T={}", p.transmissivity);
        assert!((p.storativity - 2e-4).abs() / 2e-4 < 1e-8, "S={}", p.storativity);
    }

    #[test]
    fn same_seed_same_series() {
        let spec = SyntheticSpec {
            transmissivity: 0.3,
            storativity: 1e-4,
            geometry: reference_geometry(),
            times: log_spaced_times(1.0, 1000.0, 20),
            noise_sd: 0.01,
            seed: 42,
        };
        assert_eq!(synthesize(&spec).unwrap(), synthesize(&spec).unwrap());
    }

    #[test]
    fn rejects_bad_inputs() {
        let mut spec = SyntheticSpec {
            transmissivity: 0.0,
            storativity: 1e-4,
            geometry: reference_geometry(),
            times: vec![1.0, 2.0],
            noise_sd: 0.0,
            seed: 0,
        };
        assert!(synthesize(&spec).is_err());
        spec.transmissivity = 1.0;
        spec.noise_sd = -1.0;
        let err = synthesize(&spec).unwrap_err();
        assert!(err.to_string().contains("noise standard deviation"), "{err}");
        spec.noise_sd = f64::NAN;
        assert!(synthesize(&spec).is_err());
    }

    #[test]
    fn log_spaced_endpoints() {
        let t = log_spaced_times(1.0, 1000.0, 4);
        assert_eq!(t.len(), 4);
        assert!((t[1] - 10.0).abs() < 1e-9);
        assert!((t[3] - 1000.0).abs() < 1e-9);
    }
}
