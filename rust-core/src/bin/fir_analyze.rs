//! # fir-analyze
//!
//! Command-line front end: compare a capture's input and output spectra, or
//! print the designed response of a tap set.
//!
//! ```text
//! fir-analyze compare capture.toml --output spectra.csv
//! fir-analyze response --taps 1,2,2,1 --sample-rate 48820 --normalize
//! ```

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use fir_analysis::{
    compare::Comparison,
    filters::{fir_response, FilterTaps, WindowType, DEFAULT_RESPONSE_LEN},
    pipeline, synth, AnalysisConfig, AnalysisError, Spectrum,
};

#[derive(Parser, Debug)]
#[command(name = "fir-analyze")]
#[command(about = "Spectral verification of fixed-point FIR filter captures", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare input and output spectra of a capture
    Compare(CompareArgs),
    /// Magnitude response of a tap set
    Response(ResponseArgs),
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Capture configuration (TOML)
    config: PathBuf,

    /// Write frequency_hz,input_db,output_db rows here instead of a summary
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the configured window
    #[arg(short, long)]
    window: Option<WindowType>,

    /// Analyze a synthetic square-wave capture when the log cannot be used
    #[arg(long)]
    demo_fallback: bool,
}

#[derive(Args, Debug)]
struct ResponseArgs {
    /// Comma-separated tap values
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    taps: Vec<f64>,

    #[arg(long, default_value_t = 48820.0)]
    sample_rate: f64,

    #[arg(long, default_value_t = DEFAULT_RESPONSE_LEN)]
    fft_len: usize,

    /// Scale the taps to unity DC gain first
    #[arg(long)]
    normalize: bool,

    /// Write frequency_hz,magnitude_db rows here instead of a summary
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Compare(args) => cmd_compare(args),
        Command::Response(args) => cmd_response(args),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn cmd_compare(args: CompareArgs) -> Result<(), CliError> {
    let mut config = AnalysisConfig::from_file(&args.config)?;
    if let Some(window) = args.window {
        config.window = window;
    }

    let (input, output) = match pipeline::load_signals(&config) {
        Ok(signals) => signals,
        Err(e) if args.demo_fallback && e.is_recoverable() => {
            log::warn!("{e}; analyzing a synthetic square-wave capture instead");
            let taps = match &config.taps {
                Some(taps) => taps.clone(),
                None => FilterTaps::from_integers(&[1, 2, 2, 1])?,
            };
            synth::demo_capture(&taps, config.sample_rate)?
        }
        Err(e) => return Err(e.into()),
    };
    log::info!(
        "input: {} samples, output: {} samples at {} Hz",
        input.len(),
        output.len(),
        config.sample_rate
    );

    let report = pipeline::run_with_signals(&config, &input, &output)?;

    match &args.output {
        Some(path) => {
            write_comparison(path, &report.comparison)?;
            log::info!("wrote {} bins to {}", report.comparison.len(), path.display());
        }
        None => print_comparison(&report.comparison)?,
    }
    if let Some(response) = &report.filter_response {
        print_response(response)?;
    }
    Ok(())
}

fn cmd_response(args: ResponseArgs) -> Result<(), CliError> {
    let mut taps = FilterTaps::new(args.taps)?;
    if args.normalize {
        taps = taps.normalized_to_unity_gain()?;
    }
    let response = fir_response(&taps, args.sample_rate, args.fft_len)?;

    match &args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(["frequency_hz", "magnitude_db"])?;
            for (f, db) in response.frequencies().iter().zip(response.to_db()) {
                writer.write_record([f.to_string(), db.to_string()])?;
            }
            writer.flush()?;
            log::info!("wrote {} bins to {}", response.len(), path.display());
        }
        None => print_response(&response)?,
    }
    Ok(())
}

fn write_comparison(path: &Path, comparison: &Comparison) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["frequency_hz", "input_db", "output_db"])?;
    for ((f, i), o) in comparison
        .frequencies
        .iter()
        .zip(&comparison.input_db)
        .zip(&comparison.output_db)
    {
        writer.write_record([f.to_string(), i.to_string(), o.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_comparison(comparison: &Comparison) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if comparison.is_empty() {
        writeln!(out, "no bins to compare")?;
        return Ok(());
    }

    writeln!(
        out,
        "FFT length {} ({} bins, {:.1} .. {:.1} Hz)",
        comparison.fft_len,
        comparison.len(),
        comparison.frequencies[0],
        comparison.frequencies[comparison.len() - 1]
    )?;

    let diff = comparison.difference_db();
    let peak = comparison
        .input_db
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(idx, _)| idx);
    if let Some(idx) = peak {
        writeln!(
            out,
            "input peak at {:.1} Hz: output {:+.2} dB relative to input",
            comparison.frequencies[idx], diff[idx]
        )?;
    }
    if let Some((idx, worst)) = diff
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
    {
        writeln!(
            out,
            "strongest attenuation {:+.2} dB at {:.1} Hz",
            worst, comparison.frequencies[idx]
        )?;
    }
    Ok(())
}

fn print_response(response: &Spectrum) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    let db = response.to_db();
    if db.is_empty() {
        return Ok(());
    }

    writeln!(out, "filter response: DC {:+.2} dB, Nyquist {:+.2} dB", db[0], db[db.len() - 1])?;
    if let Some((idx, min)) = db.iter().enumerate().min_by(|a, b| a.1.total_cmp(b.1)) {
        writeln!(out, "deepest null {:+.2} dB at {:.1} Hz", min, response.frequencies()[idx])?;
    }
    Ok(())
}
