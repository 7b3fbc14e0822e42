//! Inclusive frequency band used for zoomed views

use serde::Deserialize;

use crate::error::{AnalysisError, Result};

/// Frequency interval `[lo_hz, hi_hz]`, both ends included
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "(f64, f64)")]
pub struct Band {
    lo_hz: f64,
    hi_hz: f64,
}

impl Band {
    /// Audio band zoom, 100 Hz to 20 kHz
    pub const AUDIO: Band = Band {
        lo_hz: 100.0,
        hi_hz: 20_000.0,
    };

    pub fn new(lo_hz: f64, hi_hz: f64) -> Result<Self> {
        if !(lo_hz.is_finite() && hi_hz.is_finite() && lo_hz >= 0.0 && lo_hz <= hi_hz) {
            return Err(AnalysisError::InvalidParameter(format!(
                "band must satisfy 0 <= lo <= hi, got [{lo_hz}, {hi_hz}]"
            )));
        }
        Ok(Self { lo_hz, hi_hz })
    }

    pub fn lo_hz(&self) -> f64 {
        self.lo_hz
    }

    pub fn hi_hz(&self) -> f64 {
        self.hi_hz
    }

    #[inline]
    pub fn contains(&self, freq_hz: f64) -> bool {
        freq_hz >= self.lo_hz && freq_hz <= self.hi_hz
    }

    /// Boolean mask over a frequency axis
    pub fn mask(&self, frequencies: &[f64]) -> Vec<bool> {
        frequencies.iter().map(|&f| self.contains(f)).collect()
    }
}

impl TryFrom<(f64, f64)> for Band {
    type Error = AnalysisError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self> {
        Band::new(lo, hi)
    }
}

/// Keep the entries of `values` whose mask entry is set
pub(crate) fn select(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}
