//! Windowing applied to time-domain signals before the FFT

use crate::filters::windows::{generate_window, WindowType};

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal, tapered over its own length
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let mut windowed = signal.to_vec();
    apply_window_inplace(&mut windowed, window_type);
    windowed
}

/// Apply window in-place
pub fn apply_window_inplace(signal: &mut [f64], window_type: WindowType) {
    if window_type == WindowType::Rectangular {
        return;
    }

    let window = generate_window(window_type, signal.len());
    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Coherent gain of a window (mean coefficient)
///
/// A sine of amplitude A windowed this way peaks at `A * N * gain / 2`.
pub fn coherent_gain(window_type: WindowType, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }
    let window = generate_window(window_type, length);
    window.iter().sum::<f64>() / length as f64
}
