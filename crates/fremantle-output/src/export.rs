//! Export of experiment record tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use fremantle_experiments::{ConvergenceRecord, GapRecord};

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// The file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Write a performance-gap table to `path`.
pub fn write_gap_records(
    path: &Path,
    records: &[GapRecord],
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
            Ok(())
        }
        ExportFormat::Json | ExportFormat::PrettyJson => write_json(path, records, format),
    }
}

/// Write a weight-convergence table to `path`. The CSV layout flattens the
/// averaged weight vector into `w1..wd` columns.
pub fn write_convergence_records(
    path: &Path,
    records: &[ConvergenceRecord],
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)?;
            let n_assets = records.first().map_or(0, |r| r.mean_weights.len());
            let mut header = vec![
                "sample_size".to_string(),
                "epsilon".to_string(),
                "uniform_distance".to_string(),
            ];
            header.extend((1..=n_assets).map(|j| format!("w{j}")));
            writer.write_record(&header)?;

            for record in records {
                let mut row = vec![
                    record.sample_size.to_string(),
                    record.epsilon.to_string(),
                    record.uniform_distance.to_string(),
                ];
                row.extend(record.mean_weights.iter().map(f64::to_string));
                writer.write_record(&row)?;
            }
            writer.flush()?;
            Ok(())
        }
        ExportFormat::Json | ExportFormat::PrettyJson => write_json(path, records, format),
    }
}

fn write_json<T: serde::Serialize>(
    path: &Path,
    records: &[T],
    format: ExportFormat,
) -> Result<(), ExportError> {
    let text = if format == ExportFormat::PrettyJson {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
