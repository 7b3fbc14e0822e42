//! PyO3 bindings for Python integration

use pyo3::exceptions::{PyIOError, PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::AnalysisError;
use crate::filters::WindowType;

mod data_bindings;
mod filter_bindings;
mod spectrum_bindings;

impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> PyErr {
        let msg = err.to_string();
        match err {
            AnalysisError::LoadFailure { .. } => PyIOError::new_err(msg),
            AnalysisError::MissingColumn { .. } => PyKeyError::new_err(msg),
            AnalysisError::Transform(_) => PyRuntimeError::new_err(msg),
            _ => PyValueError::new_err(msg),
        }
    }
}

/// Window names accepted from Python ("hann", "hamming", "blackman", "none")
pub(crate) fn parse_window(name: &str) -> PyResult<WindowType> {
    name.parse::<WindowType>().map_err(PyValueError::new_err)
}

/// Python module definition
#[pymodule]
fn fir_analysis(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(data_bindings::load_column, m)?)?;
    m.add_function(wrap_pyfunction!(data_bindings::normalize_codes, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::compare, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::fir_response, m)?)?;

    m.add_class::<filter_bindings::PyFirFilter>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    Ok(())
}
