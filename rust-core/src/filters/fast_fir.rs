//! FFT-based fast convolution for long FIR filters
//!
//! Overlap-add with frequency-domain multiplication, O(N log N) against the
//! O(N*M) of the direct form.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use super::taps::FilterTaps;

/// Overlap-add block filter
pub struct FastFirFilter {
    /// Filter coefficients in frequency domain
    h_fft: Vec<Complex<f64>>,

    /// FFT size (power of 2, >= block_size + filter_length - 1)
    fft_size: usize,

    /// Largest input block accepted per call
    block_size: usize,

    filter_length: usize,

    /// Tail of previous blocks not yet emitted
    overlap: Vec<f64>,

    fft: Arc<dyn Fft<f64>>,
    ifft: Arc<dyn Fft<f64>>,

    /// Reusable buffer
    work_buffer: Vec<Complex<f64>>,
}

impl FastFirFilter {
    /// Create new FFT-based filter
    ///
    /// # Arguments
    /// * `taps` - Filter coefficients h[n]
    /// * `block_size` - Input block size (e.g., 2048)
    pub fn new(taps: &FilterTaps, block_size: usize) -> Self {
        let filter_length = taps.len();
        let block_size = block_size.max(1);
        let fft_size = (block_size + filter_length - 1).next_power_of_two();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let ifft = planner.plan_fft_inverse(fft_size);

        let mut h_fft = vec![Complex::new(0.0, 0.0); fft_size];
        for (slot, &coeff) in h_fft.iter_mut().zip(taps.coefficients()) {
            *slot = Complex::new(coeff, 0.0);
        }
        fft.process(&mut h_fft);

        Self {
            h_fft,
            fft_size,
            block_size,
            filter_length,
            overlap: vec![0.0; filter_length - 1],
            fft,
            ifft,
            work_buffer: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }

    /// Filter one block; output has the same length as the consumed input
    ///
    /// Inputs longer than `block_size` are cut to `block_size`.
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        let n = input.len().min(self.block_size);

        for (slot, &x) in self.work_buffer.iter_mut().zip(&input[..n]) {
            *slot = Complex::new(x, 0.0);
        }
        self.work_buffer[n..].fill(Complex::new(0.0, 0.0));

        self.fft.process(&mut self.work_buffer);
        for (x, h) in self.work_buffer.iter_mut().zip(self.h_fft.iter()) {
            *x *= *h;
        }
        self.ifft.process(&mut self.work_buffer);

        let scale = 1.0 / self.fft_size as f64;
        let carried = |overlap: &[f64], i: usize| overlap.get(i).copied().unwrap_or(0.0);

        let output: Vec<f64> = (0..n)
            .map(|i| self.work_buffer[i].re * scale + carried(&self.overlap, i))
            .collect();

        // New tail: this block's spill plus whatever older tail reaches past n
        let tail: Vec<f64> = (0..self.filter_length - 1)
            .map(|i| self.work_buffer[n + i].re * scale + carried(&self.overlap, n + i))
            .collect();
        self.overlap = tail;

        output
    }

    /// Emit the remaining M - 1 tail samples and clear the state
    pub fn flush(&mut self) -> Vec<f64> {
        std::mem::replace(&mut self.overlap, vec![0.0; self.filter_length - 1])
    }
}
