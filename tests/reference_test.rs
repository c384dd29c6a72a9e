//! End-to-end checks on the built-in 16-point pumping test.

use jacob_fit::app::pipeline::analyze;
use jacob_fit::data::{reference_geometry, reference_series};
use jacob_fit::domain::{ObservationSeries, TestGeometry};
use jacob_fit::error::FitError;
use jacob_fit::fit::{fit_line, scan_windows};
use jacob_fit::models::JACOB_U_LIMIT;

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * b.abs().max(1e-300)
}

#[test]
fn full_window_matches_hand_computed_values() {
    let series = reference_series();
    let geometry = reference_geometry();
    let a = analyze(&series, 0, series.len(), &geometry).unwrap();

    assert!(a.fit.slope > 0.0);
    assert!(close(a.fit.intercept, -0.026748142, 1e-6), "b0={}", a.fit.intercept);
    assert!(close(a.fit.slope, 0.166515751, 1e-6), "b1={}", a.fit.slope);
    assert!(close(a.fit.rss, 0.0066459223, 1e-5), "rss={}", a.fit.rss);

    let p = &a.parameters;
    assert!(close(p.transmissivity, 0.40296488, 1e-6), "T={}", p.transmissivity);
    assert!(p.storativity.is_finite() && p.storativity > 0.0);
    assert!(close(p.storativity, 1.6203133e-4, 1e-5), "S={}", p.storativity);
    assert!(p.plausibility.is_plausible());

    assert_eq!(p.u.len(), 16);
    assert!(close(p.u[0], 0.81425, 1e-4), "u0={}", p.u[0]);
    assert!(close(p.u[15], 0.0011309, 1e-4), "u15={}", p.u[15]);
    // u falls as t grows.
    assert!(p.u.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn late_subset_gives_a_different_line() {
    let series = reference_series();
    let geometry = reference_geometry();
    let full = analyze(&series, 0, 16, &geometry).unwrap();
    let late = analyze(&series, 5, 13, &geometry).unwrap();

    assert_eq!(late.window.len(), 8);
    assert_eq!(late.parameters.u.len(), 8);
    assert!(close(late.fit.slope, 0.2115566, 1e-5), "b1={}", late.fit.slope);
    assert!(close(late.parameters.transmissivity, 0.3171729, 1e-5));
    assert!(close(late.parameters.storativity, 2.94473e-4, 1e-4));
    assert!(late.fit.rmse < full.fit.rmse);
    assert!(late.parameters.count_below(JACOB_U_LIMIT) > 0);
}

#[test]
fn analysis_is_deterministic() {
    let series = reference_series();
    let geometry = reference_geometry();
    let a = analyze(&series, 2, 11, &geometry).unwrap();
    let b = analyze(&series, 2, 11, &geometry).unwrap();
    assert_eq!(a, b);

    let s1 = scan_windows(&series, &geometry, 4);
    let s2 = scan_windows(&series, &geometry, 4);
    assert_eq!(s1, s2);
}

#[test]
fn out_of_range_request_is_clamped() {
    let series = reference_series();
    let geometry = reference_geometry();
    let clamped = analyze(&series, 10, 99, &geometry).unwrap();
    assert_eq!((clamped.window.start(), clamped.window.end()), (10, 16));

    let err = analyze(&series, 15, 16, &geometry).unwrap_err();
    assert!(matches!(err, FitError::InsufficientData { len: 16, .. }), "{err:?}");
}

#[test]
fn flat_drawdown_is_an_invalid_fit() {
    let series = ObservationSeries::new(vec![1.0, 10.0, 100.0], vec![0.3, 0.3, 0.3]).unwrap();
    let geometry = TestGeometry::new(1.0, 10.0).unwrap();
    let err = analyze(&series, 0, 3, &geometry).unwrap_err();
    assert!(matches!(err, FitError::InvalidFit { .. }), "{err:?}");
}

#[test]
fn repeated_times_are_a_singular_fit() {
    let err = fit_line(&[5.0, 5.0, 5.0], &[0.1, 0.2, 0.3]).unwrap_err();
    assert!(matches!(err, FitError::SingularFit { .. }), "{err:?}");
}

#[test]
fn falling_drawdown_is_flagged_not_rejected() {
    let series = ObservationSeries::new(vec![1.0, 10.0, 100.0], vec![0.5, 0.4, 0.3]).unwrap();
    let geometry = TestGeometry::new(1.0, 10.0).unwrap();
    let a = analyze(&series, 0, 3, &geometry).unwrap();
    assert!(a.fit.slope < 0.0);
    assert!(!a.parameters.plausibility.is_plausible());
}
