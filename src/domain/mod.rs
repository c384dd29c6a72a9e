//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated raw input (`ObservationSeries`, `TestGeometry`)
//! - the active fit range (`FitWindow`)
//! - fit outputs (`FitResult`, `AquiferParameters`, `Plausibility`)
//! - presentation settings (`DisplayConfig`)

pub mod types;

pub use types::*;
