//! Minimum-norm least squares solver.
//!
//! We solve small regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD instead of normal equations, so near-singular design matrices degrade
//!   to the minimum-norm solution instead of blowing up.
//! - The numerical rank is reported alongside the solution. Callers decide
//!   whether a rank-deficient (minimum-norm) answer is meaningful for them.
//! - Singular values below `σ_max · max(rows, cols) · ε` are treated as zero,
//!   the usual cutoff for double-precision least squares.

use nalgebra::{DMatrix, DVector};

/// Solution of a least squares problem.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    /// Number of singular values above the cutoff.
    pub rank: usize,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the SVD fails or the solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<LeastSquares> {
    if x.nrows() == 0 || x.ncols() == 0 || x.nrows() != y.len() {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let tol = rank_tolerance(svd.singular_values.max(), x.nrows(), x.ncols());
    let rank = svd.rank(tol);

    let beta = svd.solve(y, tol).ok()?;
    if !beta.iter().all(|v| v.is_finite()) {
        return None;
    }

    Some(LeastSquares { beta, rank })
}

fn rank_tolerance(sigma_max: f64, rows: usize, cols: usize) -> f64 {
    // Floor keeps an all-zero matrix at rank 0.
    (sigma_max * rows.max(cols) as f64 * f64::EPSILON).max(f64::MIN_POSITIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert_eq!(ls.rank, 2);
        assert!((ls.beta[0] - 2.0).abs() < 1e-10);
        assert!((ls.beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn collinear_columns_report_rank_one() {
        // Second column is 3x the first: slope is undetermined.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 3.0, 1.0, 3.0, 1.0, 3.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert_eq!(ls.rank, 1);
        // Minimum-norm solution still reproduces the mean.
        let fitted = ls.beta[0] + 3.0 * ls.beta[1];
        assert!((fitted - 2.0).abs() < 1e-10);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }
}
