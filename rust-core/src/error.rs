//! Error taxonomy shared by every analysis stage

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The log file is missing, unreadable or not delimited data.
    /// Callers recover from this one (fallback signal or abort the run).
    #[error("could not load '{}': {reason}", path.display())]
    LoadFailure { path: PathBuf, reason: String },

    #[error("missing column '{name}'; columns found: {available:?}")]
    MissingColumn { name: String, available: Vec<String> },

    #[error("column '{0}' does not hold numeric data")]
    NonNumericColumn(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("sample rate mismatch: input at {input_rate} Hz, output at {output_rate} Hz")]
    SignalLengthMismatch { input_rate: f64, output_rate: f64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("FFT failed: {0}")]
    Transform(String),
}

impl AnalysisError {
    /// Load and column failures are environmental; everything else is a caller bug
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::LoadFailure { .. }
                | AnalysisError::MissingColumn { .. }
                | AnalysisError::NonNumericColumn(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
