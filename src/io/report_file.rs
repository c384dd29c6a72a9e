//! Read/write analysis report JSON files.
//!
//! The report file is the "portable" representation of one analysis:
//! - the window and line fit
//! - the derived aquifer parameters (including per-sample `u`)
//! - the test geometry and a generation timestamp

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::Analysis;
use crate::domain::TestGeometry;
use crate::error::AppError;

/// Serialized analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub geometry: TestGeometry,
    pub analysis: Analysis,
}

impl ReportFile {
    pub fn new(analysis: &Analysis, geometry: &TestGeometry) -> Self {
        Self {
            tool: "jacob".to_string(),
            generated_at: Utc::now(),
            geometry: *geometry,
            analysis: analysis.clone(),
        }
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, analysis: &Analysis, geometry: &TestGeometry) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &ReportFile::new(analysis, geometry))
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
