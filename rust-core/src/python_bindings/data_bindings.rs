//! Python bindings for log loading and fixed-point normalization

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::Path;

use crate::data::{load_log_with, LoaderOptions};
use crate::fixed_point;

/// Load one numeric column of a capture log
///
/// Args:
///     path: CSV log file
///     column: Column name from the header row
///     skip_rows: Annotation rows after the header to drop (e.g. ILA radix row)
///     delimiter: Single ASCII field separator
///
/// Returns:
///     Column values as numpy array (empty cells are NaN)
#[pyfunction]
#[pyo3(signature = (path, column, skip_rows=0, delimiter=","))]
pub fn load_column<'py>(
    py: Python<'py>,
    path: &str,
    column: &str,
    skip_rows: usize,
    delimiter: &str,
) -> PyResult<&'py PyArray1<f64>> {
    let delimiter = match delimiter.as_bytes() {
        [byte] => *byte,
        _ => {
            return Err(PyValueError::new_err(format!(
                "delimiter must be one ASCII character, got {delimiter:?}"
            )))
        }
    };
    let options = LoaderOptions {
        delimiter,
        skip_rows,
    };

    let record = load_log_with(Path::new(path), &options)?;
    let values = record.column(column)?.to_vec();
    Ok(PyArray1::from_vec(py, values))
}

/// Divide signed fixed-point codes by 2^(bits-1) - 1
///
/// Args:
///     codes: Raw integer codes (as floats)
///     bits: Bit width, 2..=64
///
/// Returns:
///     Floats in roughly [-1, 1]
#[pyfunction]
pub fn normalize_codes<'py>(
    py: Python<'py>,
    codes: PyReadonlyArray1<f64>,
    bits: u32,
) -> PyResult<&'py PyArray1<f64>> {
    let normalized = fixed_point::normalize_codes(codes.as_slice()?, bits)?;
    Ok(PyArray1::from_vec(py, normalized))
}
