//! FIR Analysis - spectral verification of fixed-point FIR filter captures
//!
//! Loads simulation or hardware logs, normalizes fixed-point codes, and
//! compares input/output spectra against the designed filter response.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod compare;
pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod fixed_point;
pub mod pipeline;
pub mod spectrum;
pub mod synth;

#[cfg(feature = "python")]
mod python_bindings;

pub use compare::{compare, compare_many, CompareOptions, Comparison};
pub use config::AnalysisConfig;
pub use data::{load_log, LogRecord, Signal};
pub use error::{AnalysisError, Result};
pub use filters::{fir_response, FilterTaps, FirFilter, WindowType};
pub use pipeline::AnalysisReport;
pub use spectrum::{compute_spectrum, Band, Spectrum, SpectrumAnalyzer};
