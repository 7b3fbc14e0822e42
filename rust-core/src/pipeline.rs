//! One analysis run: load the capture, compare spectra, characterize the taps

use crate::compare::{compare, Comparison};
use crate::config::{AnalysisConfig, SampleSource};
use crate::data::{load_log_with, Signal};
use crate::error::Result;
use crate::filters::fir_response;
use crate::spectrum::Spectrum;

/// Everything a run produces
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub comparison: Comparison,

    /// |H(f)| of the configured taps, if any
    pub filter_response: Option<Spectrum>,
}

fn tagged(samples: Vec<f64>, sample_rate: f64, bits: Option<u32>) -> Result<Signal> {
    match bits {
        Some(bits) => Signal::from_codes(samples, sample_rate, bits),
        None => Signal::new(samples, sample_rate),
    }
}

/// Input and output signals described by `config.source`, still as codes
///
/// Load failures are returned as-is; falling back to a synthetic capture is
/// the caller's decision.
pub fn load_signals(config: &AnalysisConfig) -> Result<(Signal, Signal)> {
    let input_bits = config.bit_width;
    let output_bits = config.output_bits();

    match &config.source {
        SampleSource::Data { input, output } => Ok((
            tagged(input.clone(), config.sample_rate, input_bits)?,
            tagged(output.clone(), config.sample_rate, output_bits)?,
        )),
        SampleSource::File(source) => {
            let record = load_log_with(&source.path, &source.loader_options()?)?;
            record.require(&[source.input_column.as_str(), source.output_column.as_str()])?;

            let input = record.signal(&source.input_column, config.sample_rate, input_bits)?;
            let output = record.signal(&source.output_column, config.sample_rate, output_bits)?;

            let range = source.range(record.len());
            log::debug!(
                "{}: {} rows, analyzing samples {:?}",
                source.path.display(),
                record.len(),
                range
            );
            Ok((input.segment(range.clone()), output.segment(range)))
        }
    }
}

/// Analyze an already loaded capture with the settings in `config`
pub fn run_with_signals(
    config: &AnalysisConfig,
    input: &Signal,
    output: &Signal,
) -> Result<AnalysisReport> {
    let comparison = compare(input, output, &config.compare_options())?;

    let filter_response = match &config.taps {
        Some(taps) => {
            let taps = if config.normalize_taps {
                taps.normalized_to_unity_gain()?
            } else {
                taps.clone()
            };
            Some(fir_response(&taps, config.sample_rate, config.response_length)?)
        }
        None => None,
    };

    Ok(AnalysisReport {
        comparison,
        filter_response,
    })
}

/// Load and analyze
pub fn run(config: &AnalysisConfig) -> Result<AnalysisReport> {
    let (input, output) = load_signals(config)?;
    run_with_signals(config, &input, &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::filters::FilterTaps;
    use crate::synth;
    use std::io::Write;

    fn inline_config(extra: &str) -> AnalysisConfig {
        let input: Vec<String> = (0..256)
            .map(|i| format!("{:.1}", (100.0 * (i as f64 * 0.4).sin()).round()))
            .collect();
        let text = format!(
            "sample_rate = 48820.0\nbit_width = 8\n{extra}\n[source]\ninput = [{0}]\noutput = [{0}]\n",
            input.join(", ")
        );
        AnalysisConfig::from_toml_str(&text).unwrap()
    }

    #[test]
    fn test_inline_self_comparison() {
        let config = inline_config("");
        let report = run(&config).unwrap();

        assert_eq!(report.comparison.fft_len, 256);
        assert_eq!(report.comparison.len(), 129);
        assert!(report.comparison.difference_db().iter().all(|&d| d == 0.0));
        assert!(report.filter_response.is_none());
    }

    #[test]
    fn test_load_signals_tags_bit_depths() {
        let config = inline_config("output_bit_width = 10");
        let (input, output) = load_signals(&config).unwrap();
        assert_eq!(input.bit_depth(), Some(8));
        assert_eq!(output.bit_depth(), Some(10));
    }

    #[test]
    fn test_filter_response_included() {
        let config = inline_config("taps = [1.0, 2.0, 2.0, 1.0]\nresponse_length = 1024");
        let response = run(&config).unwrap().filter_response.unwrap();
        assert_eq!(response.len(), 513);
        assert!((response.magnitudes()[0] - 6.0).abs() < 1e-9);

        let config = inline_config("taps = [1.0, 2.0, 2.0, 1.0]\nnormalize_taps = true");
        let response = run(&config).unwrap().filter_response.unwrap();
        assert!((response.magnitudes()[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_file_source_with_segment() {
        let dir = std::env::temp_dir().join(format!("fir-pipeline-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let log_path = dir.join("capture.csv");

        let mut file = std::fs::File::create(&log_path).unwrap();
        writeln!(file, "sample,in_l_8,out_l_10").unwrap();
        writeln!(file, "radix,dec,dec").unwrap();
        for i in 0..600 {
            let v = if (i / 20) % 2 == 0 { 127 } else { -127 };
            writeln!(file, "{i},{v},{}", v * 4).unwrap();
        }
        drop(file);

        let config_path = dir.join("capture.toml");
        std::fs::write(
            &config_path,
            r#"
            sample_rate = 48820.0
            bit_width = 8
            output_bit_width = 10
            window = "rectangular"
            [source]
            path = "capture.csv"
            input_column = "in_l_8"
            output_column = "out_l_10"
            skip_rows = 1
            start = 100
            end = 500
            "#,
        )
        .unwrap();

        let config = AnalysisConfig::from_file(&config_path).unwrap();
        let (input, output) = load_signals(&config).unwrap();
        assert_eq!(input.len(), 400);
        assert_eq!(output.len(), 400);

        let report = run(&config).unwrap();
        assert_eq!(report.comparison.fft_len, 400);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_log_is_recoverable() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            sample_rate = 48820.0
            [source]
            path = "/nonexistent/fir_sim_logs.csv"
            input_column = "in"
            output_column = "out"
            "#,
        )
        .unwrap();

        let err = run(&config).unwrap_err();
        assert!(matches!(err, AnalysisError::LoadFailure { .. }));
        assert!(err.is_recoverable());

        // The caller may substitute the synthetic capture
        let taps = FilterTaps::from_integers(&[1, 2, 2, 1]).unwrap();
        let (input, output) = synth::demo_capture(&taps, config.sample_rate).unwrap();
        let report = run_with_signals(&config, &input, &output).unwrap();
        assert_eq!(report.comparison.fft_len, 4096);
    }
}
