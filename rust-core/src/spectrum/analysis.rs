//! High-level spectrum analyzer
//!
//! Combines the FFT engine with windowing and the Hz frequency axis.

use super::band::{select, Band};
use super::decibel::{to_db, to_db_vec};
use super::fft::FftEngine;
use super::windowing::apply_window_inplace;
use crate::data::Signal;
use crate::error::{AnalysisError, Result};
use crate::filters::windows::WindowType;

/// Magnitudes over a non-negative, ascending frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Pair a frequency axis with linear magnitudes of the same length
    pub fn new(frequencies: Vec<f64>, magnitudes: Vec<f64>) -> Result<Self> {
        if frequencies.len() != magnitudes.len() {
            return Err(AnalysisError::InvalidParameter(format!(
                "{} frequencies but {} magnitudes",
                frequencies.len(),
                magnitudes.len()
            )));
        }
        Ok(Self {
            frequencies,
            magnitudes,
        })
    }

    pub fn empty() -> Self {
        Self {
            frequencies: Vec::new(),
            magnitudes: Vec::new(),
        }
    }

    /// Bin frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Linear magnitudes |X[k]|
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency spacing between bins (0 for fewer than two bins)
    pub fn bin_width(&self) -> f64 {
        match self.frequencies.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Magnitudes in dB
    pub fn to_db(&self) -> Vec<f64> {
        to_db_vec(&self.magnitudes)
    }

    /// Magnitudes in dB relative to `reference` (0 dB at the reference)
    pub fn db_relative_to(&self, reference: f64) -> Vec<f64> {
        self.magnitudes.iter().map(|&m| to_db(m / reference)).collect()
    }

    /// Strongest bin as `(frequency_hz, magnitude)`
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, &mag)| (self.frequencies[idx], mag))
    }

    /// Bins inside `band` (inclusive); empty when none fall inside
    pub fn band(&self, band: Band) -> Spectrum {
        let mask = band.mask(&self.frequencies);
        Spectrum {
            frequencies: select(&self.frequencies, &mask),
            magnitudes: select(&self.magnitudes, &mask),
        }
    }
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    /// FFT length; longer signals are truncated, shorter ones zero-padded
    pub fft_size: usize,

    /// Window applied to the analyzed segment
    pub window_type: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 4096,
            window_type: WindowType::Hann,
            sample_rate: 48000.0,
        }
    }
}

/// Reusable analyzer for one configuration
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: FftEngine,
    frequencies: Vec<f64>,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        crate::data::signal::check_sample_rate(config.sample_rate)?;
        let fft_engine = FftEngine::new(config.fft_size)?;
        let frequencies = fft_engine.frequency_axis(config.sample_rate);

        Ok(Self {
            config,
            fft_engine,
            frequencies,
        })
    }

    /// Magnitude spectrum of raw samples
    ///
    /// The first `fft_size` samples are kept, windowed over their own length,
    /// then zero-padded to `fft_size`. An empty input gives an empty spectrum.
    pub fn analyze(&mut self, samples: &[f64]) -> Result<Spectrum> {
        if samples.is_empty() {
            return Ok(Spectrum::empty());
        }

        let analyzed = samples.len().min(self.config.fft_size);
        let mut segment = samples[..analyzed].to_vec();
        apply_window_inplace(&mut segment, self.config.window_type);

        let magnitudes = self.fft_engine.compute_magnitude(&segment)?;

        Ok(Spectrum {
            frequencies: self.frequencies.clone(),
            magnitudes,
        })
    }

    /// Magnitude spectrum of a signal at the analyzer's sample rate
    pub fn analyze_signal(&mut self, signal: &Signal) -> Result<Spectrum> {
        if signal.sample_rate() != self.config.sample_rate {
            return Err(AnalysisError::SignalLengthMismatch {
                input_rate: signal.sample_rate(),
                output_rate: self.config.sample_rate,
            });
        }
        self.analyze(signal.samples())
    }

    /// Analyze and return magnitude in dB
    pub fn analyze_db(&mut self, samples: &[f64]) -> Result<Vec<f64>> {
        Ok(self.analyze(samples)?.to_db())
    }

    /// Frequency bins in Hz
    pub fn frequency_bins_hz(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }
}

/// One-shot spectrum of `signal` with `window` at FFT length `fft_len`
pub fn compute_spectrum(signal: &Signal, window: WindowType, fft_len: usize) -> Result<Spectrum> {
    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size: fft_len,
        window_type: window,
        sample_rate: signal.sample_rate(),
    })?;
    analyzer.analyze(signal.samples())
}

/// Spectrum with the FFT length set to the signal length; empty for an empty signal
pub fn whole_signal_spectrum(signal: &Signal, window: WindowType) -> Result<Spectrum> {
    if signal.is_empty() {
        return Ok(Spectrum::empty());
    }
    compute_spectrum(signal, window, signal.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::decibel::floor_db;
    use std::f64::consts::PI;

    fn sine(freq: f64, fs: f64, n: usize) -> Signal {
        let samples = (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / fs).sin())
            .collect();
        Signal::new(samples, fs).unwrap()
    }

    #[test]
    fn test_hann_sine_peak_within_one_bin() {
        let fs = 44100.0;
        let spectrum = compute_spectrum(&sine(1000.0, fs, 2048), WindowType::Hann, 2048).unwrap();

        assert_eq!(spectrum.len(), 1025);
        let bin_width = fs / 2048.0;
        assert!((spectrum.bin_width() - bin_width).abs() < 1e-12);

        let (peak_freq, _) = spectrum.peak().unwrap();
        assert!(
            (peak_freq - 1000.0).abs() <= bin_width,
            "peak at {peak_freq} Hz"
        );
    }

    #[test]
    fn test_zero_signal_sits_on_db_floor() {
        let zeros = Signal::new(vec![0.0; 300], 48000.0).unwrap();
        for window in [WindowType::Rectangular, WindowType::Hann] {
            let db = compute_spectrum(&zeros, window, 512).unwrap().to_db();
            assert_eq!(db.len(), 257);
            assert!(db.iter().all(|&v| v == floor_db()));
            assert!(db.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_output_length_and_axis() {
        for n in [2usize, 7, 1000, 4096] {
            let sig = sine(440.0, 48000.0, 3000);
            let spectrum = compute_spectrum(&sig, WindowType::Hann, n).unwrap();
            assert_eq!(spectrum.len(), n / 2 + 1);
            for (k, &f) in spectrum.frequencies().iter().enumerate() {
                assert!((f - k as f64 * 48000.0 / n as f64).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_truncation_analyzes_leading_samples() {
        // Tail of the capture is loud, but only the first n samples count
        let mut samples = vec![1.0; 64];
        samples.extend(vec![1000.0; 64]);
        let sig = Signal::new(samples, 1000.0).unwrap();

        let spectrum = compute_spectrum(&sig, WindowType::Rectangular, 64).unwrap();
        assert!((spectrum.magnitudes()[0] - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_signal_gives_empty_spectrum() {
        let empty = Signal::new(Vec::new(), 48000.0).unwrap();
        let spectrum = compute_spectrum(&empty, WindowType::Hann, 1024).unwrap();
        assert!(spectrum.is_empty());
        assert!(spectrum.peak().is_none());
    }

    #[test]
    fn test_whole_signal_spectrum() {
        let empty = Signal::new(Vec::new(), 48000.0).unwrap();
        assert!(whole_signal_spectrum(&empty, WindowType::Hann).unwrap().is_empty());

        let sig = sine(1000.0, 48000.0, 300);
        let spectrum = whole_signal_spectrum(&sig, WindowType::Hann).unwrap();
        assert_eq!(spectrum.len(), 151);
        assert_eq!(spectrum, compute_spectrum(&sig, WindowType::Hann, 300).unwrap());
    }

    #[test]
    fn test_invalid_fft_length() {
        let sig = sine(1000.0, 48000.0, 16);
        assert!(matches!(
            compute_spectrum(&sig, WindowType::Hann, 0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_band_below_range_is_empty() {
        // 1 kHz sample rate, max frequency 500 Hz, band starts above it
        let sig = sine(100.0, 1000.0, 64);
        let low = compute_spectrum(&sig, WindowType::Hann, 64).unwrap();
        let zoom = low.band(Band::new(600.0, 20_000.0).unwrap());
        assert!(zoom.is_empty());

        // Spectrum topping out under 100 Hz against the audio band
        let slow = Signal::new(vec![0.5; 64], 150.0).unwrap();
        let spectrum = compute_spectrum(&slow, WindowType::Hann, 64).unwrap();
        assert!(spectrum.band(Band::AUDIO).is_empty());
    }

    #[test]
    fn test_analyzer_rejects_other_rate() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let sig = sine(1000.0, 44100.0, 256);
        assert!(matches!(
            analyzer.analyze_signal(&sig),
            Err(AnalysisError::SignalLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_db_relative_to_peak() {
        let spectrum = Spectrum::new(vec![0.0, 1.0, 2.0], vec![2.0, 4.0, 0.4]).unwrap();
        let db = spectrum.db_relative_to(4.0);
        assert!((db[1]).abs() < 1e-12);
        assert!((db[2] + 20.0).abs() < 1e-9);
        assert!(Spectrum::new(vec![0.0], Vec::new()).is_err());
    }
}
