//! Python bindings for spectrum analysis and capture comparison

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use super::parse_window;
use crate::compare::{self, CompareOptions};
use crate::data::Signal;
use crate::spectrum::{self, whole_signal_spectrum, AnalyzerConfig, Band, SpectrumAnalyzer};

fn to_signal(samples: &[f64], sample_rate: f64, bits: Option<u32>) -> PyResult<Signal> {
    let signal = match bits {
        Some(bits) => Signal::from_codes(samples.to_vec(), sample_rate, bits)?,
        None => Signal::new(samples.to_vec(), sample_rate)?,
    };
    Ok(signal)
}

/// One-sided magnitude spectrum
///
/// Args:
///     signal: Samples as numpy array
///     sample_rate: Sample rate in Hz
///     window: "hann" (default), "hamming", "blackman" or "none"
///     fft_len: FFT length (default: signal length; empty input gives empty arrays)
///
/// Returns:
///     (frequencies_hz, magnitudes) numpy arrays
#[pyfunction]
#[pyo3(signature = (signal, sample_rate, window="hann", fft_len=None))]
pub fn spectrum<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sample_rate: f64,
    window: &str,
    fft_len: Option<usize>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let samples = signal.as_slice()?;
    let signal = to_signal(samples, sample_rate, None)?;
    let window = parse_window(window)?;
    let spec = match fft_len {
        Some(n) => spectrum::compute_spectrum(&signal, window, n)?,
        None => whole_signal_spectrum(&signal, window)?,
    };

    Ok((
        PyArray1::from_slice(py, spec.frequencies()),
        PyArray1::from_slice(py, spec.magnitudes()),
    ))
}

/// Input vs output dB spectra of a filter capture
///
/// Args:
///     input: Input samples (codes when input_bits is given)
///     output: Output samples (codes when output_bits is given)
///     sample_rate: Sample rate in Hz
///     input_bits / output_bits: Fixed-point widths, None for float data
///     window: Window name
///     fft_len: FFT length (default: min(len(output), 4096))
///     reference_normalization: 0 dB at the input's peak bin
///     band: Optional (lo_hz, hi_hz), inclusive
///
/// Returns:
///     (frequencies_hz, input_db, output_db) numpy arrays
#[pyfunction]
#[pyo3(signature = (
    input,
    output,
    sample_rate,
    input_bits=None,
    output_bits=None,
    window="hann",
    fft_len=None,
    reference_normalization=true,
    band=None
))]
#[allow(clippy::too_many_arguments)]
pub fn compare<'py>(
    py: Python<'py>,
    input: PyReadonlyArray1<f64>,
    output: PyReadonlyArray1<f64>,
    sample_rate: f64,
    input_bits: Option<u32>,
    output_bits: Option<u32>,
    window: &str,
    fft_len: Option<usize>,
    reference_normalization: bool,
    band: Option<(f64, f64)>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let input = to_signal(input.as_slice()?, sample_rate, input_bits)?;
    let output = to_signal(output.as_slice()?, sample_rate, output_bits)?;

    let options = CompareOptions {
        fft_len,
        window: parse_window(window)?,
        reference_normalization,
        band: band.map(|(lo, hi)| Band::new(lo, hi)).transpose()?,
    };
    let result = compare::compare(&input, &output, &options)?;

    Ok((
        PyArray1::from_vec(py, result.frequencies),
        PyArray1::from_vec(py, result.input_db),
        PyArray1::from_vec(py, result.output_db),
    ))
}

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     fft_size: FFT length; longer inputs are truncated, shorter ones zero-padded
    ///     window: Window name
    ///     sample_rate: Sample rate in Hz
    #[new]
    #[pyo3(signature = (fft_size=4096, window="hann", sample_rate=48000.0))]
    fn new(fft_size: usize, window: &str, sample_rate: f64) -> PyResult<Self> {
        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            fft_size,
            window_type: parse_window(window)?,
            sample_rate,
        })?;
        Ok(Self { analyzer })
    }

    /// Magnitude spectrum of `signal`
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let spec = self.analyzer.analyze(signal.as_slice()?)?;
        Ok(PyArray1::from_slice(py, spec.magnitudes()))
    }

    /// Magnitude spectrum in dB (floor at -240 dB)
    fn analyze_db<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let db = self.analyzer.analyze_db(signal.as_slice()?)?;
        Ok(PyArray1::from_vec(py, db))
    }

    fn frequency_bins_hz<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.analyzer.frequency_bins_hz())
    }

    fn num_bins(&self) -> usize {
        self.analyzer.num_bins()
    }

    fn get_sample_rate(&self) -> f64 {
        self.analyzer.config().sample_rate
    }

    fn get_fft_size(&self) -> usize {
        self.analyzer.config().fft_size
    }
}
