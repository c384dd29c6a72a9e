//! Log-time basis for the Cooper–Jacob straight line.
//!
//! The model is `s(t) = β0 + β1 · log10(t)`, so each observation contributes a
//! design row `[1, log10(t)]`.

use nalgebra::DMatrix;

/// Build the `n × 2` design matrix `[1, log10(t)]`.
pub fn log_time_design(times: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(times.len(), 2, |i, j| if j == 0 { 1.0 } else { times[i].log10() })
}

/// True if the values are not all numerically identical.
///
/// Spread is measured relative to the largest magnitude, so `[15.0, 15.0]`
/// and `[1e-9, 1e-9]` are both flat.
pub fn has_spread(values: &[f64]) -> bool {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut scale = 0.0_f64;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
        scale = scale.max(v.abs());
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return false;
    }
    hi - lo > scale * f64::EPSILON * values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_rows_are_one_and_log_time() {
        let x = log_time_design(&[1.0, 10.0, 100.0]);
        assert_eq!(x.shape(), (3, 2));
        assert_eq!(x[(0, 0)], 1.0);
        assert_eq!(x[(1, 1)], 1.0);
        assert!((x[(2, 1)] - 2.0).abs() < 1e-15);
    }

    #[test]
    fn spread_detection() {
        assert!(has_spread(&[0.0, 0.3]));
        assert!(!has_spread(&[15.0, 15.0, 15.0]));
        assert!(!has_spread(&[]));
        assert!(has_spread(&[2.0, 2.0 + 1e-9]));
    }
}
