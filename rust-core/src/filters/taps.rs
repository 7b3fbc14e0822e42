//! FIR coefficient sets

use serde::Deserialize;

use crate::error::{AnalysisError, Result};

/// FIR impulse response h[n]
///
/// Gain is left as given: `[1, 2, 2, 1]` has a DC gain of 6 until the caller
/// asks for [`FilterTaps::normalized_to_unity_gain`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct FilterTaps {
    coefficients: Vec<f64>,
}

impl FilterTaps {
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(AnalysisError::InvalidParameter(
                "filter needs at least one tap".to_string(),
            ));
        }
        if let Some(bad) = coefficients.iter().find(|c| !c.is_finite()) {
            return Err(AnalysisError::InvalidParameter(format!(
                "filter tap {bad} is not finite"
            )));
        }
        Ok(Self { coefficients })
    }

    /// Integer coefficients as programmed into the hardware
    pub fn from_integers(coefficients: &[i64]) -> Result<Self> {
        Self::new(coefficients.iter().map(|&c| c as f64).collect())
    }

    /// Moving average of `length` taps with unity DC gain
    pub fn moving_average(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(AnalysisError::InvalidParameter(
                "moving average needs at least one tap".to_string(),
            ));
        }
        Self::new(vec![1.0 / length as f64; length])
    }

    /// Divide every tap by the coefficient sum so DC passes at 0 dB
    pub fn normalized_to_unity_gain(&self) -> Result<Self> {
        let gain = self.dc_gain();
        if gain == 0.0 {
            return Err(AnalysisError::InvalidParameter(
                "taps sum to zero, DC gain cannot be normalized".to_string(),
            ));
        }
        Ok(Self {
            coefficients: self.coefficients.iter().map(|c| c / gain).collect(),
        })
    }

    /// Response at 0 Hz: the coefficient sum
    pub fn dc_gain(&self) -> f64 {
        self.coefficients.iter().sum()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Never true for a constructed tap set
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Delay of a linear-phase (symmetric) design
    pub fn group_delay_samples(&self) -> f64 {
        (self.coefficients.len() - 1) as f64 / 2.0
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.coefficients.len();
        (0..n / 2).all(|i| (self.coefficients[i] - self.coefficients[n - 1 - i]).abs() < 1e-12)
    }
}

impl TryFrom<Vec<f64>> for FilterTaps {
    type Error = AnalysisError;

    fn try_from(coefficients: Vec<f64>) -> Result<Self> {
        Self::new(coefficients)
    }
}

impl AsRef<[f64]> for FilterTaps {
    fn as_ref(&self) -> &[f64] {
        &self.coefficients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert!(FilterTaps::new(Vec::new()).is_err());
        assert!(FilterTaps::new(vec![1.0, f64::NAN]).is_err());
        assert!(FilterTaps::moving_average(0).is_err());
    }

    #[test]
    fn test_dc_gain_and_normalization() {
        let taps = FilterTaps::from_integers(&[1, 2, 2, 1]).unwrap();
        assert_eq!(taps.dc_gain(), 6.0);
        assert!(taps.is_symmetric());
        assert_eq!(taps.group_delay_samples(), 1.5);

        let unity = taps.normalized_to_unity_gain().unwrap();
        assert!((unity.dc_gain() - 1.0).abs() < 1e-12);
        assert!((unity.coefficients()[1] - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sum_cannot_be_normalized() {
        let taps = FilterTaps::new(vec![1.0, -1.0]).unwrap();
        assert!(taps.normalized_to_unity_gain().is_err());
    }

    #[test]
    fn test_moving_average() {
        let ma = FilterTaps::moving_average(4).unwrap();
        assert_eq!(ma.coefficients(), &[0.25; 4]);
        assert!((ma.dc_gain() - 1.0).abs() < 1e-12);
    }
}
