//! CSV ingest.
//!
//! Turns a headered CSV of pumping-test readings into an [`ObservationSeries`].
//!
//! Design goals:
//! - **Strict schema** for the two required columns (clear errors + exit code 2)
//! - **Fail fast** on unparseable rows, reporting the 1-based line number
//! - **Separation of concerns**: no fitting logic here; the series constructor
//!   owns the monotonicity and sign checks

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::ObservationSeries;
use crate::error::AppError;

/// Column names and unit handling for CSV ingest.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub time_column: String,
    pub drawdown_column: String,
    /// Multiplier applied to every drawdown value (e.g. `0.01` for cm -> m).
    pub drawdown_scale: f64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            time_column: "time".to_string(),
            drawdown_column: "drawdown".to_string(),
            drawdown_scale: 1.0,
        }
    }
}

/// Load an observation series from a CSV file.
pub fn load_series(path: &Path, options: &IngestOptions) -> Result<ObservationSeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let series = read_series(file, options)?;
    log::info!("loaded {} observations from {}", series.len(), path.display());
    Ok(series)
}

/// Parse an observation series from any CSV reader.
pub fn read_series<R: Read>(reader: R, options: &IngestOptions) -> Result<ObservationSeries, AppError> {
    if !(options.drawdown_scale.is_finite() && options.drawdown_scale > 0.0) {
        return Err(AppError::new(
            2,
            format!("Drawdown scale {} must be finite and > 0.", options.drawdown_scale),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let time_idx = column_index(&header_map, &options.time_column)?;
    let drawdown_idx = column_index(&header_map, &options.drawdown_column)?;

    let mut times = Vec::new();
    let mut drawdowns = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error: {e}")))?;
        // The reader skips blank lines, so the record index alone undercounts.
        // Without a position, +2 covers the header line and 1-based numbering.
        let line = record.position().map_or(idx as u64 + 2, |p| p.line());
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        times.push(parse_field(&record, time_idx, &options.time_column, line)?);
        drawdowns.push(parse_field(&record, drawdown_idx, &options.drawdown_column, line)? * options.drawdown_scale);
    }

    ObservationSeries::new(times, drawdowns).map_err(AppError::from)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn column_index(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
}

fn parse_field(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<f64, AppError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| AppError::new(2, format!("Line {line}: missing `{column}` value")))?;
    raw.parse::<f64>()
        .map_err(|_| AppError::new(2, format!("Line {line}: `{column}` value '{raw}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_series_with_bom_and_scale() {
        let csv = "\u{feff}Time , Drawdown\n1,2.5\n2,3.9\n\n4,6.1\n";
        let options = IngestOptions {
            drawdown_scale: 0.01,
            ..IngestOptions::default()
        };
        let series = read_series(csv.as_bytes(), &options).unwrap();
        assert_eq!(series.times(), &[1.0, 2.0, 4.0]);
        assert!((series.drawdowns()[2] - 0.061).abs() < 1e-15);
    }

    #[test]
    fn custom_column_names() {
        let csv = "minutes,s_m,note\n1,0.1,a\n3,0.2,b\n";
        let options = IngestOptions {
            time_column: "minutes".to_string(),
            drawdown_column: "S_M".to_string(),
            drawdown_scale: 1.0,
        };
        let series = read_series(csv.as_bytes(), &options).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read_series("t,drawdown\n1,0.1\n".as_bytes(), &IngestOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`time`"), "{err}");
    }

    #[test]
    fn bad_number_names_the_line() {
        let err = read_series("time,drawdown\n1,0.1\n2,abc\n".as_bytes(), &IngestOptions::default()).unwrap_err();
        assert!(err.to_string().starts_with("Line 3:"), "{err}");
    }

    #[test]
    fn blank_lines_do_not_shift_line_numbers() {
        let err = read_series("time,drawdown\n1,0.1\n\n2,abc\n".as_bytes(), &IngestOptions::default()).unwrap_err();
        assert!(err.to_string().starts_with("Line 4:"), "{err}");
    }

    #[test]
    fn non_monotonic_time_is_rejected() {
        let err = read_series("time,drawdown\n1,0.1\n5,0.2\n3,0.3\n".as_bytes(), &IngestOptions::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("strictly increasing"), "{err}");
    }
}
