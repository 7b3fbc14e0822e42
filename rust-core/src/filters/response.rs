//! Frequency response of a tap set, independent of any capture
//!
//! The taps are the impulse response, so zero-padding them to `n` and taking
//! a real FFT samples H(e^jω) on `n/2 + 1` evenly spaced bins.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::taps::FilterTaps;
use super::windows::WindowType;
use crate::data::signal::check_sample_rate;
use crate::error::Result;
use crate::spectrum::{AnalyzerConfig, Spectrum, SpectrumAnalyzer};

/// Default FFT length for filter responses
pub const DEFAULT_RESPONSE_LEN: usize = 4096;

/// Magnitude response |H(f)| on `fft_len/2 + 1` bins up to Nyquist
///
/// Taps longer than `fft_len` are truncated like any other signal.
pub fn fir_response(taps: &FilterTaps, sample_rate: f64, fft_len: usize) -> Result<Spectrum> {
    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size: fft_len,
        window_type: WindowType::Rectangular,
        sample_rate,
    })?;
    analyzer.analyze(taps.coefficients())
}

/// dB curve of one design on a shared axis
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCurve {
    pub label: String,
    pub magnitude_db: Vec<f64>,
}

/// Several designs evaluated on one frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct DesignComparison {
    pub frequencies: Vec<f64>,
    pub curves: Vec<ResponseCurve>,
}

/// Evaluate candidate designs (moving average vs weighted low-pass, ...) side by side
pub fn compare_designs(
    designs: &[(&str, &FilterTaps)],
    sample_rate: f64,
    fft_len: usize,
) -> Result<DesignComparison> {
    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size: fft_len,
        window_type: WindowType::Rectangular,
        sample_rate,
    })?;

    let curves = designs
        .iter()
        .map(|(label, taps)| {
            Ok(ResponseCurve {
                label: label.to_string(),
                magnitude_db: analyzer.analyze(taps.coefficients())?.to_db(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DesignComparison {
        frequencies: analyzer.frequency_bins_hz().to_vec(),
        curves,
    })
}

/// Complex response H(e^jω) at one frequency, by direct summation
pub fn frequency_response_at(taps: &FilterTaps, freq_hz: f64, sample_rate: f64) -> Result<Complex64> {
    check_sample_rate(sample_rate)?;
    let omega = 2.0 * PI * freq_hz / sample_rate;

    let mut sum = Complex64::new(0.0, 0.0);
    for (n, &h_n) in taps.coefficients().iter().enumerate() {
        sum += h_n * Complex64::from_polar(1.0, -omega * n as f64);
    }
    Ok(sum)
}

/// |H| at one frequency
pub fn gain_at(taps: &FilterTaps, freq_hz: f64, sample_rate: f64) -> Result<f64> {
    Ok(frequency_response_at(taps, freq_hz, sample_rate)?.norm())
}
