//! Per-capture analysis configuration
//!
//! One TOML file describes one capture: where the samples come from, how they
//! are encoded, and how the spectra are computed.
//!
//! ```toml
//! sample_rate = 48820.0
//! bit_width = 8
//! output_bit_width = 10
//! band = [100.0, 20000.0]
//! taps = [1.0, 2.0, 2.0, 1.0]
//!
//! [source]
//! path = "log_simulations/fir_squarewave_sim_logs.csv"
//! input_column = "in_l_8"
//! output_column = "out_l_10"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::compare::CompareOptions;
use crate::data::signal::check_sample_rate;
use crate::data::LoaderOptions;
use crate::error::{AnalysisError, Result};
use crate::filters::{FilterTaps, WindowType, DEFAULT_RESPONSE_LEN};
use crate::fixed_point;
use crate::spectrum::Band;

fn default_true() -> bool {
    true
}

fn default_response_length() -> usize {
    DEFAULT_RESPONSE_LEN
}

fn default_delimiter() -> char {
    ','
}

/// Where the input/output samples come from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SampleSource {
    /// Columns of a capture log
    File(FileSource),

    /// Samples given inline
    Data { input: Vec<f64>, output: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSource {
    pub path: PathBuf,
    pub input_column: String,
    pub output_column: String,

    /// Annotation rows after the header to drop
    #[serde(default)]
    pub skip_rows: usize,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// First sample analyzed
    #[serde(default)]
    pub start: usize,

    /// One past the last sample analyzed
    #[serde(default)]
    pub end: Option<usize>,
}

impl FileSource {
    pub fn loader_options(&self) -> Result<LoaderOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                AnalysisError::Config(format!("delimiter {:?} is not ASCII", self.delimiter))
            })?;
        Ok(LoaderOptions {
            delimiter,
            skip_rows: self.skip_rows,
        })
    }

    /// Selected sample range for a column of `len` samples
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        self.start..self.end.unwrap_or(len)
    }
}

/// Everything one pipeline invocation needs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    pub source: SampleSource,

    /// Sample rate in Hz (the I2S word-select clock)
    pub sample_rate: f64,

    /// FFT length; unset uses min(output length, 4096)
    #[serde(default)]
    pub fft_length: Option<usize>,

    #[serde(default)]
    pub window: WindowType,

    /// Fixed-point width of the input codes; unset means already float
    #[serde(default)]
    pub bit_width: Option<u32>,

    /// Width of the output codes when it differs from the input
    #[serde(default)]
    pub output_bit_width: Option<u32>,

    #[serde(default = "default_true")]
    pub reference_normalization: bool,

    /// Zoom band `[lo_hz, hi_hz]`
    #[serde(default)]
    pub band: Option<Band>,

    /// Filter design to characterize alongside the capture
    #[serde(default)]
    pub taps: Option<FilterTaps>,

    /// Divide the taps by their sum before computing the response
    #[serde(default)]
    pub normalize_taps: bool,

    #[serde(default = "default_response_length")]
    pub response_length: usize,
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig =
            toml::from_str(text).map_err(|e| AnalysisError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file; relative source paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::Config(format!("reading {}: {e}", path.display())))?;
        let mut config = Self::from_toml_str(&text)?;

        if let SampleSource::File(source) = &mut config.source {
            if source.path.is_relative() {
                if let Some(dir) = path.parent() {
                    source.path = dir.join(&source.path);
                }
            }
        }
        Ok(config)
    }

    /// Reject degenerate numeric settings up front
    pub fn validate(&self) -> Result<()> {
        check_sample_rate(self.sample_rate)?;
        if self.fft_length == Some(0) {
            return Err(AnalysisError::InvalidParameter(
                "fft_length must be positive".to_string(),
            ));
        }
        if self.response_length == 0 {
            return Err(AnalysisError::InvalidParameter(
                "response_length must be positive".to_string(),
            ));
        }
        for bits in [self.bit_width, self.output_bit_width].into_iter().flatten() {
            fixed_point::full_scale(bits)?;
        }
        if let SampleSource::File(source) = &self.source {
            source.loader_options()?;
            if matches!(source.end, Some(end) if end < source.start) {
                return Err(AnalysisError::Config(format!(
                    "sample range {}..{:?} is reversed",
                    source.start, source.end
                )));
            }
        }
        Ok(())
    }

    /// Bit width of the output codes
    pub fn output_bits(&self) -> Option<u32> {
        self.output_bit_width.or(self.bit_width)
    }

    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            fft_len: self.fft_length,
            window: self.window,
            reference_normalization: self.reference_normalization,
            band: self.band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUAREWAVE: &str = r#"
        sample_rate = 48820.0
        bit_width = 8
        output_bit_width = 10
        window = "none"
        band = [100.0, 20000.0]
        taps = [1.0, 2.0, 2.0, 1.0]

        [source]
        path = "fir_squarewave_sim_logs.csv"
        input_column = "in_l_8"
        output_column = "out_l_10"
    "#;

    #[test]
    fn test_parse_file_source() {
        let config = AnalysisConfig::from_toml_str(SQUAREWAVE).unwrap();

        assert_eq!(config.sample_rate, 48820.0);
        assert_eq!(config.window, WindowType::Rectangular);
        assert_eq!(config.bit_width, Some(8));
        assert_eq!(config.output_bits(), Some(10));
        assert!(config.reference_normalization);
        assert_eq!(config.band, Some(Band::AUDIO));
        assert_eq!(config.taps.as_ref().unwrap().dc_gain(), 6.0);
        assert_eq!(config.response_length, 4096);

        match &config.source {
            SampleSource::File(src) => {
                assert_eq!(src.input_column, "in_l_8");
                assert_eq!(src.range(100), 0..100);
                assert_eq!(src.loader_options().unwrap(), LoaderOptions::default());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_inline_data_and_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            sample_rate = 44100.0
            [source]
            input = [0.0, 1.0, 0.0, -1.0]
            output = [0.0, 0.5, 0.5, -0.5]
            "#,
        )
        .unwrap();

        assert!(matches!(config.source, SampleSource::Data { .. }));
        assert_eq!(config.window, WindowType::Hann);
        assert_eq!(config.bit_width, None);
        assert_eq!(config.compare_options(), CompareOptions::default());
    }

    #[test]
    fn test_hardware_capture_segment() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            sample_rate = 48820.0
            bit_width = 24
            fft_length = 2048
            [source]
            path = "20TAPS.csv"
            input_column = "l_in230"
            output_column = "l_data_tx230"
            skip_rows = 1
            start = 4600
            end = 7600
            "#,
        )
        .unwrap();

        let SampleSource::File(src) = &config.source else {
            panic!("expected file source");
        };
        assert_eq!(src.range(10_000), 4600..7600);
        assert_eq!(src.loader_options().unwrap().skip_rows, 1);
        assert_eq!(config.compare_options().fft_len, Some(2048));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_rate = SQUAREWAVE.replace("48820.0", "0.0");
        assert!(matches!(
            AnalysisConfig::from_toml_str(&bad_rate),
            Err(AnalysisError::InvalidParameter(_))
        ));

        let bad_bits = SQUAREWAVE.replace("bit_width = 8", "bit_width = 1");
        assert!(AnalysisConfig::from_toml_str(&bad_bits).is_err());

        let bad_band = SQUAREWAVE.replace("[100.0, 20000.0]", "[20000.0, 100.0]");
        assert!(matches!(
            AnalysisConfig::from_toml_str(&bad_band),
            Err(AnalysisError::Config(_))
        ));

        let empty_taps = SQUAREWAVE.replace("[1.0, 2.0, 2.0, 1.0]", "[]");
        assert!(AnalysisConfig::from_toml_str(&empty_taps).is_err());

        let unknown = format!("{SQUAREWAVE}\nextra = 1");
        assert!(AnalysisConfig::from_toml_str(&unknown).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/capture.toml")).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
