//! Reporting utilities: summaries, per-sample tables, scan rankings.

pub mod format;

pub use format::*;
