//! Export per-sample results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::Analysis;
use crate::domain::ObservationSeries;
use crate::error::AppError;

/// Write one row per windowed observation to a CSV file.
pub fn write_results_csv(path: &Path, series: &ObservationSeries, analysis: &Analysis) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, series, analysis)
}

/// Write the results table to any writer.
pub fn write_results<W: Write>(mut out: W, series: &ObservationSeries, analysis: &Analysis) -> Result<(), AppError> {
    writeln!(out, "index,time,drawdown,fitted,residual,u")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in analysis.rows(series) {
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10e}",
            row.index, row.time, row.drawdown, row.fitted, row.residual, row.u,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze;
    use crate::data::{reference_geometry, reference_series};

    #[test]
    fn writes_header_and_window_rows() {
        let series = reference_series();
        let analysis = analyze(&series, 3, 7, &reference_geometry()).unwrap();

        let mut buf = Vec::new();
        write_results(&mut buf, &series, &analysis).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "index,time,drawdown,fitted,residual,u");
        assert!(lines[1].starts_with("3,6,0.08,"), "{}", lines[1]);
        assert!(lines[4].starts_with("6,30,0.2,"), "{}", lines[4]);
    }
}
