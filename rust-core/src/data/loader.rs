use std::io::Read;
use std::path::{Path, PathBuf};

use super::record::{Column, LogRecord};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How a capture log is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field separator
    pub delimiter: u8,

    /// Data rows dropped right after the header. Logic-analyzer exports put a
    /// radix row (`signed`, `hex`, ...) there.
    pub skip_rows: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_rows: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a comma-separated capture log with a header row.
///
/// Never panics: every failure comes back as [`AnalysisError::LoadFailure`]
/// and a warning is logged so interactive callers see why they fell back.
pub fn load_log(path: &Path) -> Result<LogRecord> {
    load_log_with(path, &LoaderOptions::default())
}

/// Load a capture log with explicit layout options
pub fn load_log_with(path: &Path, options: &LoaderOptions) -> Result<LogRecord> {
    let outcome = std::fs::File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|file| parse(file, options));
    finish(outcome, path.to_path_buf())
}

/// Parse a capture log from any reader (in-memory data, pipes, ...)
pub fn read_log<R: Read>(reader: R, options: &LoaderOptions) -> Result<LogRecord> {
    finish(parse(reader, options), PathBuf::from("<reader>"))
}

fn finish(outcome: std::result::Result<LogRecord, String>, path: PathBuf) -> Result<LogRecord> {
    match outcome {
        Ok(record) => {
            log::debug!(
                "loaded {} rows x {} columns from {}",
                record.len(),
                record.column_names().len(),
                path.display()
            );
            Ok(record)
        }
        Err(reason) => {
            log::warn!("could not load '{}': {}", path.display(), reason);
            Err(AnalysisError::LoadFailure { path, reason })
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse<R: Read>(reader: R, options: &LoaderOptions) -> std::result::Result<LogRecord, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()
        .map_err(|e| format!("reading header: {e}"))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if names.is_empty() || names.iter().all(|n| n.is_empty()) {
        return Err("no header row".to_string());
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("row {}: {e}", row_no + 1))?;
        if row_no < options.skip_rows {
            continue;
        }
        for (col, value) in record.iter().enumerate() {
            cells[col].push(value.to_string());
        }
    }

    let rows = cells.first().map_or(0, Vec::len);
    let columns = cells.into_iter().map(infer_column).collect();

    Ok(LogRecord::new(names, columns, rows))
}

/// Numeric when every cell is a number; empty cells read as NaN
fn infer_column(cells: Vec<String>) -> Column {
    let parsed: Option<Vec<f64>> = cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                Some(f64::NAN)
            } else {
                cell.parse::<f64>().ok()
            }
        })
        .collect();

    match parsed {
        Some(values) => Column::Numeric(values),
        None => Column::Text(cells),
    }
}
