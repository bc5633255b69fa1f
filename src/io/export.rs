//! Export the enriched series to CSV and the dashboard payload to JSON.
//!
//! Column and key names match what the dashboard front-end reads.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::estimate::EnrichedSeries;

pub const SERIES_CSV_HEADER: &str =
    "month,food_aud_m_sa,households,food_aud_sa,food_per_household_month,food_per_hh_12m_avg";

/// Write one row per month to a CSV file.
pub fn write_series_csv(path: &Path, series: &EnrichedSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut file = BufWriter::new(file);

    write_series_rows(&mut file, series)
        .and_then(|_| file.flush())
        .map_err(|e| AppError::runtime(format!("Failed to write export CSV '{}': {e}", path.display())))
}

fn write_series_rows(out: &mut impl Write, series: &EnrichedSeries) -> io::Result<()> {
    writeln!(out, "{SERIES_CSV_HEADER}")?;
    for p in series.points() {
        writeln!(
            out,
            "{},{},{},{:.0},{:.2},{:.2}",
            p.point.period, p.point.value, p.households, p.national_units, p.per_household, p.rolling_mean,
        )?;
    }
    Ok(())
}

/// Pretty-print `payload` as JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T: Serialize>(path: Option<&Path>, payload: &T) -> Result<(), AppError> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::runtime(format!("Failed to create JSON '{}': {e}", path.display())))?;
            let mut file = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut file, payload)
                .map_err(|e| AppError::runtime(format!("Failed to write JSON '{}': {e}", path.display())))?;
            writeln!(file)
                .and_then(|_| file.flush())
                .map_err(|e| AppError::runtime(format!("Failed to write JSON '{}': {e}", path.display())))
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, payload)
                .map_err(|e| AppError::runtime(format!("Failed to write JSON to stdout: {e}")))?;
            writeln!(lock).map_err(|e| AppError::runtime(format!("Failed to write JSON to stdout: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PopulationTable, manual_series};
    use crate::estimate::enrich;

    fn series() -> EnrichedSeries {
        enrich(&manual_series(), &PopulationTable::australia().unwrap())
    }

    #[test]
    fn csv_rows_follow_header() {
        let mut buf = Vec::new();
        write_series_rows(&mut buf, &series()).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines[0], SERIES_CSV_HEADER);
        assert_eq!(lines.len(), 24);
        assert!(lines[1].starts_with("2024-01,"));
        assert!(lines[1].contains(",10800000,"));
        assert!(lines[23].starts_with("2025-11,"));
        assert!(lines.iter().skip(1).all(|l| l.split(',').count() == 6));
    }

    #[test]
    fn csv_file_roundtrip_to_disk() {
        let path = std::env::temp_dir().join(format!("foodspend-export-{}.csv", std::process::id()));
        write_series_csv(&path, &series()).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(txt.starts_with(SERIES_CSV_HEADER));
    }

    #[test]
    fn json_to_missing_directory_is_runtime_error() {
        let path = std::env::temp_dir().join("foodspend-no-such-dir").join("out.json");
        let err = write_json(Some(&path), &serde_json::json!({"a": 1})).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RUNTIME);
    }
}
