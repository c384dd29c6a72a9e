//! Cooper–Jacob parameter estimation.
//!
//! With the late-time straight line `s = β0 + β1 · log10(t)`:
//!
//! - `T = 0.183 · Q / β1`
//! - `S = 2.25 · T / (r² · 10^(β0/β1))`, equivalently `2.25 · T · t0 / r²` with
//!   `t0 = 10^(-β0/β1)` the zero-drawdown time intercept
//! - `u_k = r² · S / (4 · t_k · T)` for every windowed time `t_k`
//!
//! The estimator does not judge whether the straight-line approximation holds
//! for the window (`u` small). It flags non-finite or non-positive T/S as
//! implausible but still returns them.

use crate::domain::{AquiferParameters, FitResult, Plausibility, TestGeometry};
use crate::error::FitError;

/// `2.3 / (4π)`, rounded as in the classic Jacob formula.
pub const JACOB_T_COEFF: f64 = 0.183;
/// `e^(-γ) · 4`, rounded as in the classic Jacob formula.
pub const JACOB_S_COEFF: f64 = 2.25;
/// Denominator of the Theis dimensionless time `u = r²S / (4tT)`.
pub const THEIS_U_DENOM: f64 = 4.0;
/// Conventional upper bound on `u` for the straight-line approximation.
///
/// Only used for reporting; nothing is filtered on it.
pub const JACOB_U_LIMIT: f64 = 0.05;

/// Relative tolerance below which a slope counts as zero.
const SLOPE_EPS: f64 = 1e-12;

/// Derive T, S, t0 and u from a line fit.
///
/// `times` are the observation times of the fitted window, in order.
pub fn estimate_parameters(
    fit: &FitResult,
    geometry: &TestGeometry,
    times: &[f64],
) -> Result<AquiferParameters, FitError> {
    let beta0 = fit.intercept;
    let beta1 = fit.slope;

    if !beta1.is_finite() || beta1.abs() <= SLOPE_EPS * beta0.abs().max(1.0) {
        return Err(FitError::InvalidFit { slope: beta1 });
    }

    let q = geometry.pumping_rate;
    let r2 = geometry.distance * geometry.distance;

    let transmissivity = JACOB_T_COEFF * q / beta1;
    let storativity = JACOB_S_COEFF * transmissivity / (r2 * 10f64.powf(beta0 / beta1));
    let t0 = 10f64.powf(-beta0 / beta1);

    let u: Vec<f64> = times
        .iter()
        .map(|&t| r2 * storativity / (THEIS_U_DENOM * t * transmissivity))
        .collect();

    let plausibility = check_plausibility(transmissivity, storativity);
    if let Plausibility::Implausible(reasons) = &plausibility {
        log::warn!(
            "physically implausible parameters for window {}: {}",
            fit.window,
            reasons.join("; ")
        );
    }

    Ok(AquiferParameters {
        transmissivity,
        storativity,
        t0,
        u,
        plausibility,
    })
}

fn check_plausibility(transmissivity: f64, storativity: f64) -> Plausibility {
    let mut reasons = Vec::new();
    for (name, value) in [("T", transmissivity), ("S", storativity)] {
        if !value.is_finite() {
            reasons.push(format!("{name} = {value} is not finite"));
        } else if value <= 0.0 {
            reasons.push(format!("{name} = {value:e} is not positive"));
        }
    }
    if reasons.is_empty() {
        Plausibility::Plausible
    } else {
        Plausibility::Implausible(reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitWindow;

    fn fit(intercept: f64, slope: f64) -> FitResult {
        FitResult {
            window: FitWindow::full(3).unwrap(),
            intercept,
            slope,
            rss: 0.0,
            rmse: 0.0,
        }
    }

    fn geometry() -> TestGeometry {
        TestGeometry::new(528.0 / 1440.0, 90.0).unwrap()
    }

    #[test]
    fn formulas_match_hand_calculation() {
        let f = fit(-0.05, 0.2);
        let g = geometry();
        let times = [10.0, 100.0, 1000.0];
        let p = estimate_parameters(&f, &g, &times).unwrap();

        let t = 0.183 * g.pumping_rate / 0.2;
        let s = 2.25 * t / (90.0 * 90.0 * 10f64.powf(-0.25));
        assert!((p.transmissivity - t).abs() < 1e-15);
        assert!((p.storativity - s).abs() < 1e-18);
        assert!((p.t0 - 10f64.powf(0.25)).abs() < 1e-12);
        assert_eq!(p.u.len(), 3);
        assert!((p.u[0] - 8100.0 * s / (40.0 * t)).abs() < 1e-15);
        assert!(p.plausibility.is_plausible());
    }

    #[test]
    fn storativity_equals_t0_form() {
        let f = fit(0.03, 0.17);
        let g = geometry();
        let p = estimate_parameters(&f, &g, &[1.0, 2.0]).unwrap();
        let alt = 2.25 * p.transmissivity * p.t0 / (90.0 * 90.0);
        assert!((p.storativity - alt).abs() / alt < 1e-12);
    }

    #[test]
    fn u_decreases_with_time_for_positive_slope() {
        let p = estimate_parameters(&fit(0.01, 0.15), &geometry(), &[1.0, 5.0, 20.0, 400.0]).unwrap();
        assert!(p.u.windows(2).all(|w| w[1] < w[0]), "{:?}", p.u);
    }

    #[test]
    fn zero_slope_is_invalid() {
        let err = estimate_parameters(&fit(0.2, 0.0), &geometry(), &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, FitError::InvalidFit { slope: 0.0 });

        let tiny = estimate_parameters(&fit(0.2, 1e-15), &geometry(), &[1.0, 2.0]);
        assert!(matches!(tiny, Err(FitError::InvalidFit { .. })));

        let nan = estimate_parameters(&fit(0.2, f64::NAN), &geometry(), &[1.0, 2.0]);
        assert!(matches!(nan, Err(FitError::InvalidFit { .. })));
    }

    #[test]
    fn negative_slope_is_flagged_not_rejected() {
        let p = estimate_parameters(&fit(0.4, -0.1), &geometry(), &[1.0, 2.0]).unwrap();
        assert!(p.transmissivity < 0.0);
        match &p.plausibility {
            Plausibility::Implausible(reasons) => {
                assert!(reasons.iter().any(|r| r.starts_with("T =")), "{reasons:?}");
            }
            Plausibility::Plausible => panic!("negative T should be flagged"),
        }
    }

    #[test]
    fn overflowing_storativity_is_flagged() {
        // 10^(β0/β1) underflows to 0, so S is infinite.
        let p = estimate_parameters(&fit(-400.0, 1.0), &geometry(), &[1.0, 2.0]).unwrap();
        assert!(!p.storativity.is_finite());
        assert!(!p.plausibility.is_plausible());
    }
}
