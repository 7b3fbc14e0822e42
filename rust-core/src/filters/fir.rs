//! Software model of the hardware FIR
//!
//! Direct-form convolution with a ring-buffer delay line, plus the one-shot
//! `convolve` used to build reference outputs for synthetic inputs.

use super::fast_fir::FastFirFilter;
use super::taps::FilterTaps;
use crate::data::Signal;

/// Tap count above which `convolve` switches to FFT overlap-add
pub const FAST_CONVOLUTION_THRESHOLD: usize = 128;

/// Block size used by the overlap-add path
const FAST_BLOCK_SIZE: usize = 2048;

/// Streaming FIR filter with zero-allocation ring buffer
pub struct FirFilter {
    /// Filter coefficients h[n]
    coefficients: Vec<f64>,

    /// Delay line holding the last M inputs
    state_buffer: Vec<f64>,

    /// Current write position in ring buffer
    cursor: usize,

    /// Filter length
    length: usize,
}

impl FirFilter {
    /// Create a new FIR filter with the given taps
    pub fn new(taps: &FilterTaps) -> Self {
        let length = taps.len();

        Self {
            coefficients: taps.coefficients().to_vec(),
            state_buffer: vec![0.0; length],
            cursor: 0,
            length,
        }
    }

    /// Process single sample
    ///
    /// # Arguments
    /// * `input` - Input sample x[n]
    ///
    /// # Returns
    /// Filtered output sample y[n]
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        self.state_buffer[self.cursor] = input;

        // y[n] = Σ h[k] * x[n-k]
        let mut output = 0.0;
        for (k, &coeff) in self.coefficients.iter().enumerate() {
            let idx = (self.cursor + self.length - k) % self.length;
            output += coeff * self.state_buffer[idx];
        }

        self.cursor = (self.cursor + 1) % self.length;

        output
    }

    /// Process a block of samples
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.state_buffer.fill(0.0);
        self.cursor = 0;
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Which part of the full linear convolution to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolutionMode {
    /// All N + M - 1 samples
    Full,
    /// N samples centred on the full result, offset (M-1)/2
    Same,
    /// First N samples, what a causal hardware filter emits
    Causal,
}

/// Linear convolution of `samples` with `taps`
pub fn convolve(samples: &[f64], taps: &FilterTaps, mode: ConvolutionMode) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    let full = if taps.len() > FAST_CONVOLUTION_THRESHOLD {
        let mut filter = FastFirFilter::new(taps, FAST_BLOCK_SIZE);
        let mut out = Vec::with_capacity(samples.len() + taps.len() - 1);
        for block in samples.chunks(FAST_BLOCK_SIZE) {
            out.extend(filter.process_block(block));
        }
        out.extend(filter.flush());
        out
    } else {
        let mut filter = FirFilter::new(taps);
        let mut out = filter.process_block(samples);
        // Drain the delay line with zeros for the tail
        out.extend((1..taps.len()).map(|_| filter.process_sample(0.0)));
        out
    };

    let n = samples.len();
    match mode {
        ConvolutionMode::Full => full,
        ConvolutionMode::Causal => full[..n].to_vec(),
        ConvolutionMode::Same => {
            let offset = (taps.len() - 1) / 2;
            full[offset..offset + n].to_vec()
        }
    }
}

/// Filter a signal, keeping its rate and encoding
pub fn filter_signal(signal: &Signal, taps: &FilterTaps, mode: ConvolutionMode) -> Signal {
    signal.with_samples(convolve(signal.samples(), taps, mode))
}
