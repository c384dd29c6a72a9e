//! Mathematical utilities: log-time design matrix and least squares.

pub mod basis;
pub mod ols;

pub use basis::*;
pub use ols::*;
