//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - per-sample result export (CSV) (`export`)
//! - analysis report read/write (JSON) (`report_file`)

pub mod export;
pub mod ingest;
pub mod report_file;

pub use export::*;
pub use ingest::*;
pub use report_file::*;
