//! `jacob-fit` library crate.
//!
//! Cooper-Jacob straight-line analysis of pumping-test drawdown data. The
//! binary (`jacob`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fit can be driven from the CLI, the TUI, or other Rust code

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
