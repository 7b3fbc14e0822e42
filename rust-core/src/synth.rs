//! Synthetic test signals
//!
//! Stand-ins for a capture when no log is available, and stimulus for the
//! software filter model. Nothing in the analysis path calls into here.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::data::Signal;
use crate::error::{AnalysisError, Result};
use crate::filters::{convolve, ConvolutionMode, FilterTaps};
use crate::fixed_point;

fn phase(freq_hz: f64, sample_rate: f64, n: usize) -> f64 {
    2.0 * PI * freq_hz * n as f64 / sample_rate
}

/// `amplitude * sin(2π f t)`
pub fn sine(freq_hz: f64, amplitude: f64, sample_rate: f64, len: usize) -> Result<Signal> {
    let samples = (0..len)
        .map(|n| amplitude * phase(freq_hz, sample_rate, n).sin())
        .collect();
    Signal::new(samples, sample_rate)
}

/// `amplitude * sign(sin(2π f t))`; exact zero crossings stay at 0
pub fn square(freq_hz: f64, amplitude: f64, sample_rate: f64, len: usize) -> Result<Signal> {
    let samples = (0..len)
        .map(|n| {
            let s = phase(freq_hz, sample_rate, n).sin();
            if s > 0.0 {
                amplitude
            } else if s < 0.0 {
                -amplitude
            } else {
                0.0
            }
        })
        .collect();
    Signal::new(samples, sample_rate)
}

/// Zeros with `amplitude` on samples `start..end`
pub fn rectangular_pulse(
    len: usize,
    start: usize,
    end: usize,
    amplitude: f64,
    sample_rate: f64,
) -> Result<Signal> {
    if start > end {
        return Err(AnalysisError::InvalidParameter(format!(
            "pulse starts at {start} after it ends at {end}"
        )));
    }
    let end = end.min(len);
    let samples = (0..len)
        .map(|n| if n >= start.min(end) && n < end { amplitude } else { 0.0 })
        .collect();
    Signal::new(samples, sample_rate)
}

/// Gaussian noise, reproducible for a given `seed`
pub fn white_noise(len: usize, std_dev: f64, sample_rate: f64, seed: u64) -> Result<Signal> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| AnalysisError::InvalidParameter(format!("noise std dev {std_dev}: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = (0..len).map(|_| normal.sample(&mut rng)).collect();
    Signal::new(samples, sample_rate)
}

/// Sample-wise sum, truncated to the shorter signal
pub fn sum(a: &Signal, b: &Signal) -> Result<Signal> {
    if a.sample_rate() != b.sample_rate() {
        return Err(AnalysisError::SignalLengthMismatch {
            input_rate: a.sample_rate(),
            output_rate: b.sample_rate(),
        });
    }
    let samples = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(x, y)| x + y)
        .collect();
    Signal::new(samples, a.sample_rate())
}

/// Round a float signal to `bits`-wide codes, saturating at the code range
pub fn quantize(signal: &Signal, bits: u32) -> Result<Signal> {
    let scale = fixed_point::full_scale(bits)?;
    let (min, max) = fixed_point::code_range(bits)?;
    let source = signal.normalized()?;
    let codes = source
        .samples()
        .iter()
        .map(|&x| (x * scale).round().clamp(min, max))
        .collect();
    Signal::from_codes(codes, signal.sample_rate(), bits)
}

/// Frequency of the demo square wave
pub const DEMO_FREQ_HZ: f64 = 1000.0;
/// Length of the demo capture
pub const DEMO_LEN: usize = 5000;

/// Fake capture pair: 8-bit 1 kHz square wave and its causally filtered copy
///
/// The output is divided by the taps' DC gain so both sides stay 8-bit codes.
pub fn demo_capture(taps: &FilterTaps, sample_rate: f64) -> Result<(Signal, Signal)> {
    let input = quantize(&square(DEMO_FREQ_HZ, 1.0, sample_rate, DEMO_LEN)?, 8)?;

    let gain = taps.dc_gain();
    let taps = if gain != 0.0 {
        taps.normalized_to_unity_gain()?
    } else {
        taps.clone()
    };

    let filtered = convolve(input.samples(), &taps, ConvolutionMode::Causal);
    let output = Signal::from_codes(filtered, sample_rate, 8)?;
    Ok((input, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine() {
        let s = sine(1000.0, 0.5, 48000.0, 48).unwrap();
        assert_eq!(s.len(), 48);
        assert_eq!(s.samples()[0], 0.0);
        // Quarter period at sample 12
        assert!((s.samples()[12] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_square_follows_sign_of_sine() {
        let sq = square(1000.0, 127.0, 8000.0, 16).unwrap();
        assert_eq!(sq.samples()[0], 0.0);
        assert_eq!(sq.samples()[1], 127.0);
        assert_eq!(sq.samples()[3], 127.0);
        assert_eq!(sq.samples()[5], -127.0);
        assert!(sq.samples().iter().all(|v| [0.0, 127.0, -127.0].contains(v)));
    }

    #[test]
    fn test_rectangular_pulse() {
        let p = rectangular_pulse(10, 3, 6, 1.0, 44100.0).unwrap();
        assert_eq!(
            p.samples(),
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert!(rectangular_pulse(10, 6, 3, 1.0, 44100.0).is_err());
        assert_eq!(rectangular_pulse(4, 2, 99, 1.0, 44100.0).unwrap().samples()[3], 1.0);
    }

    #[test]
    fn test_white_noise_is_seeded() {
        let a = white_noise(4096, 0.3, 44100.0, 0).unwrap();
        let b = white_noise(4096, 0.3, 44100.0, 0).unwrap();
        let c = white_noise(4096, 0.3, 44100.0, 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mean = a.samples().iter().sum::<f64>() / a.len() as f64;
        let var = a.samples().iter().map(|x| (x - mean).powi(2)).sum::<f64>() / a.len() as f64;
        assert!(mean.abs() < 0.05);
        assert!((var.sqrt() - 0.3).abs() < 0.03);

        assert!(white_noise(16, -1.0, 44100.0, 0).is_err());
    }

    #[test]
    fn test_sum() {
        let tone = sine(1000.0, 1.0, 44100.0, 100).unwrap();
        let noise = white_noise(80, 0.1, 44100.0, 7).unwrap();
        let mixed = sum(&tone, &noise).unwrap();
        assert_eq!(mixed.len(), 80);
        assert_eq!(mixed.samples()[5], tone.samples()[5] + noise.samples()[5]);

        let other_rate = sine(1000.0, 1.0, 48000.0, 100).unwrap();
        assert!(sum(&tone, &other_rate).is_err());
    }

    #[test]
    fn test_quantize_saturates() {
        let s = Signal::new(vec![1.0, -1.0, 0.5, 2.0, -2.0], 48000.0).unwrap();
        let q = quantize(&s, 8).unwrap();
        assert_eq!(q.bit_depth(), Some(8));
        assert_eq!(q.samples(), &[127.0, -127.0, 64.0, 127.0, -128.0]);
    }

    #[test]
    fn test_demo_capture() {
        let taps = FilterTaps::from_integers(&[1, 2, 2, 1]).unwrap();
        let (input, output) = demo_capture(&taps, 48820.0).unwrap();

        assert_eq!(input.len(), DEMO_LEN);
        assert_eq!(output.len(), DEMO_LEN);
        assert_eq!(input.bit_depth(), Some(8));
        assert_eq!(output.bit_depth(), Some(8));
        // Steady high half-period passes at full level
        assert!((output.samples()[10] - 127.0).abs() < 1e-9);
        assert!(output.samples().iter().all(|v| v.abs() <= 127.0 + 1e-9));
    }
}
