//! Aquifer models built on top of the straight-line fit.
//!
//! Models are implemented as small, pure functions so the pipeline and the
//! window scan can share them.

pub mod jacob;

pub use jacob::*;
