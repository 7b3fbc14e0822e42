//! Sampled signal with its rate and fixed-point encoding

use std::ops::Range;

use crate::error::{AnalysisError, Result};
use crate::fixed_point;

/// Ordered samples captured at a fixed rate
///
/// `bit_depth` is `Some(b)` while the samples still hold raw `b`-bit codes.
/// A signal without a bit depth is already normalized to floats.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
    bit_depth: Option<u32>,
}

pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    Ok(())
}

impl Signal {
    /// Create a float signal
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
            bit_depth: None,
        })
    }

    /// Create a signal holding raw `bits`-wide integer codes
    pub fn from_codes(codes: Vec<f64>, sample_rate: f64, bits: u32) -> Result<Self> {
        Self::new(codes, sample_rate)?.with_bit_depth(bits)
    }

    /// Tag the samples as `bits`-wide codes
    pub fn with_bit_depth(mut self, bits: u32) -> Result<Self> {
        fixed_point::full_scale(bits)?;
        self.bit_depth = Some(bits);
        Ok(self)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn bit_depth(&self) -> Option<u32> {
        self.bit_depth
    }

    pub fn is_normalized(&self) -> bool {
        self.bit_depth.is_none()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Float version of this signal (full-scale normalized if tagged)
    pub fn normalized(&self) -> Result<Signal> {
        match self.bit_depth {
            Some(bits) => Ok(Signal {
                samples: fixed_point::normalize_codes(&self.samples, bits)?,
                sample_rate: self.sample_rate,
                bit_depth: None,
            }),
            None => Ok(self.clone()),
        }
    }

    /// Copy of the samples in `range`, clamped to the signal length
    pub fn segment(&self, range: Range<usize>) -> Signal {
        let end = range.end.min(self.samples.len());
        let start = range.start.min(end);
        Signal {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
        }
    }

    /// Same rate and encoding, new samples
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Signal {
        Signal {
            samples,
            sample_rate: self.sample_rate,
            bit_depth: self.bit_depth,
        }
    }
}
