//! Input vs output spectral comparison of a filter capture
//!
//! Both sides are normalized to floats, transformed with one window and one
//! FFT length, optionally scaled so the input's strongest bin reads 0 dB, and
//! optionally cut to a band.

use crate::data::Signal;
use crate::error::{AnalysisError, Result};
use crate::filters::windows::WindowType;
use crate::spectrum::band::select;
use crate::spectrum::{to_db_vec, AnalyzerConfig, Band, SpectrumAnalyzer};

/// Upper bound of the derived FFT length
pub const DEFAULT_MAX_FFT_LEN: usize = 4096;

/// Comparison options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// FFT length; `None` picks `min(len(output), 4096)`
    pub fft_len: Option<usize>,

    pub window: WindowType,

    /// Scale both spectra by the input's peak bin before dB conversion.
    /// Turn off only when both captures share a meaningful absolute scale.
    pub reference_normalization: bool,

    /// Restrict the result to this band (inclusive)
    pub band: Option<Band>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            fft_len: None,
            window: WindowType::Hann,
            reference_normalization: true,
            band: None,
        }
    }
}

/// Input and output dB magnitudes on a shared frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub frequencies: Vec<f64>,
    pub input_db: Vec<f64>,
    pub output_db: Vec<f64>,

    /// Linear input peak used as 0 dB, when reference normalization applied
    pub reference_peak: Option<f64>,

    /// FFT length the spectra were computed with
    pub fft_len: usize,
}

impl Comparison {
    fn empty() -> Self {
        Self {
            frequencies: Vec::new(),
            input_db: Vec::new(),
            output_db: Vec::new(),
            reference_peak: None,
            fft_len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Output minus input per bin, i.e. the measured filter gain in dB
    pub fn difference_db(&self) -> Vec<f64> {
        self.output_db
            .iter()
            .zip(&self.input_db)
            .map(|(out, inp)| out - inp)
            .collect()
    }

    /// Bins inside `band` (inclusive); may be empty
    pub fn band(&self, band: Band) -> Comparison {
        let mask = band.mask(&self.frequencies);
        Comparison {
            frequencies: select(&self.frequencies, &mask),
            input_db: select(&self.input_db, &mask),
            output_db: select(&self.output_db, &mask),
            reference_peak: self.reference_peak,
            fft_len: self.fft_len,
        }
    }
}

/// Compare a capture before and after the filter
///
/// # Errors
/// * `SignalLengthMismatch` when the two sample rates differ
/// * `InvalidParameter` for an explicit FFT length of 0
pub fn compare(input: &Signal, output: &Signal, options: &CompareOptions) -> Result<Comparison> {
    if input.sample_rate() != output.sample_rate() {
        return Err(AnalysisError::SignalLengthMismatch {
            input_rate: input.sample_rate(),
            output_rate: output.sample_rate(),
        });
    }

    let input = input.normalized()?;
    let output = output.normalized()?;

    let fft_len = match options.fft_len {
        Some(0) => {
            return Err(AnalysisError::InvalidParameter(
                "FFT length must be positive".to_string(),
            ))
        }
        Some(n) => n,
        None => output.len().min(DEFAULT_MAX_FFT_LEN),
    };
    // Either side empty: no shared axis to report on
    if fft_len == 0 || input.is_empty() || output.is_empty() {
        log::debug!("nothing to compare: empty capture");
        return Ok(Comparison::empty());
    }

    log::debug!(
        "comparing {} input / {} output samples, {} window, FFT length {}",
        input.len(),
        output.len(),
        options.window.name(),
        fft_len
    );

    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size: fft_len,
        window_type: options.window,
        sample_rate: input.sample_rate(),
    })?;
    let in_spec = analyzer.analyze(input.samples())?;
    let out_spec = analyzer.analyze(output.samples())?;

    let peak = in_spec.peak().map(|(_, mag)| mag).unwrap_or(0.0);
    let reference_peak = if options.reference_normalization && peak > 0.0 {
        Some(peak)
    } else {
        if options.reference_normalization {
            log::debug!("input spectrum is silent; skipping reference normalization");
        }
        None
    };

    let (input_db, output_db) = match reference_peak {
        Some(peak) => (in_spec.db_relative_to(peak), out_spec.db_relative_to(peak)),
        None => (to_db_vec(in_spec.magnitudes()), to_db_vec(out_spec.magnitudes())),
    };

    let comparison = Comparison {
        frequencies: in_spec.frequencies().to_vec(),
        input_db,
        output_db,
        reference_peak,
        fft_len,
    };

    Ok(match options.band {
        Some(band) => comparison.band(band),
        None => comparison,
    })
}

/// Compare one input against several filter outputs (e.g. MA4 and [1,2,2,1])
pub fn compare_many(
    input: &Signal,
    outputs: &[Signal],
    options: &CompareOptions,
) -> Result<Vec<Comparison>> {
    outputs
        .iter()
        .map(|output| compare(input, output, options))
        .collect()
}
