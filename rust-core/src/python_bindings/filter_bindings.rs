//! Python bindings for FIR filter operations

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::filters::{self, FilterTaps, FirFilter};

/// Magnitude response of a tap set
///
/// Args:
///     taps: Filter coefficients as numpy array
///     sample_rate: Sample rate in Hz
///     fft_len: FFT length (default 4096)
///     normalize: Scale taps to unity DC gain first
///
/// Returns:
///     (frequencies_hz, magnitudes) numpy arrays of length fft_len/2 + 1
#[pyfunction]
#[pyo3(signature = (taps, sample_rate, fft_len=filters::DEFAULT_RESPONSE_LEN, normalize=false))]
pub fn fir_response<'py>(
    py: Python<'py>,
    taps: PyReadonlyArray1<f64>,
    sample_rate: f64,
    fft_len: usize,
    normalize: bool,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let mut taps = FilterTaps::new(taps.as_slice()?.to_vec())?;
    if normalize {
        taps = taps.normalized_to_unity_gain()?;
    }
    let response = filters::fir_response(&taps, sample_rate, fft_len)?;

    Ok((
        PyArray1::from_slice(py, response.frequencies()),
        PyArray1::from_slice(py, response.magnitudes()),
    ))
}

/// Streaming FIR filter exposed to Python
#[pyclass(name = "FirFilter")]
pub struct PyFirFilter {
    filter: FirFilter,
}

#[pymethods]
impl PyFirFilter {
    /// Create a new FIR filter
    ///
    /// Args:
    ///     coefficients: Filter coefficients as numpy array
    #[new]
    fn new(coefficients: PyReadonlyArray1<f64>) -> PyResult<Self> {
        let taps = FilterTaps::new(coefficients.as_slice()?.to_vec())?;
        Ok(Self {
            filter: FirFilter::new(&taps),
        })
    }

    /// Process a block of samples, keeping state across calls
    fn process_block<'py>(
        &mut self,
        py: Python<'py>,
        input_signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let output = self.filter.process_block(input_signal.as_slice()?);
        Ok(PyArray1::from_vec(py, output))
    }

    /// Reset filter state
    fn reset(&mut self) {
        self.filter.reset();
    }

    fn get_coefficients<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.filter.coefficients())
    }

    fn length(&self) -> usize {
        self.filter.length()
    }
}
