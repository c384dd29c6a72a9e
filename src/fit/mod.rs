//! Line fitting over a window of observations.
//!
//! Responsibilities:
//!
//! - validate and clamp requested windows
//! - fit drawdown against log10(time) with an SVD least squares solve
//! - scan every candidate window (parallel) and rank by fit quality

pub mod fitter;
pub mod scan;
pub mod window;

pub use fitter::*;
pub use scan::*;
pub use window::*;
