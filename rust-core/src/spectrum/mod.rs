//! Spectral analysis with FFT

pub mod analysis;
pub mod band;
pub mod decibel;
pub mod fft;
pub mod windowing;

pub use analysis::{
    compute_spectrum, whole_signal_spectrum, AnalyzerConfig, Spectrum, SpectrumAnalyzer,
};
pub use band::Band;
pub use decibel::{to_db, to_db_vec, DB_FLOOR};
pub use fft::FftEngine;
pub use windowing::apply_window;
